//! Composition of every lead-list dimension into one request.

use serde::Serialize;

use crate::domain::filter::FilterSet;
use crate::domain::sort::SortState;
use crate::domain::types::HubId;
use crate::query::field::{ParamCodec, reset_page};
use crate::query::filters::{
    DateRangeFilter, OwnerFilter, PaginationParams, SearchFilter, SourceFilter, StatusFilter,
};
use crate::query::location::Location;
use crate::query::params::QueryParams;
use crate::query::sort::SortParam;
use crate::repository::LeadListQuery;

/// Lead list state derived from the URL on every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeadListState {
    pub page: usize,
    pub limit: usize,
    pub sort: SortState,
    pub filters: FilterSet,
}

impl LeadListState {
    pub fn read(params: &QueryParams) -> Self {
        let PaginationParams { page, limit } = PaginationParams::decode(params);

        Self {
            page,
            limit,
            sort: SortParam::decode(params),
            filters: decode_filters(params),
        }
    }

    pub fn from_location<L: Location + ?Sized>(location: &L) -> Self {
        Self::read(&location.search())
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Repository request for the current page.
    pub fn to_list_query(&self, hub_id: HubId) -> LeadListQuery {
        LeadListQuery::new(hub_id)
            .filters(self.filters.clone())
            .sort(self.sort)
            .paginate(self.page, self.limit)
    }
}

pub fn decode_filters(params: &QueryParams) -> FilterSet {
    FilterSet {
        statuses: StatusFilter::decode(params),
        owners: OwnerFilter::decode(params),
        date_range: DateRangeFilter::decode(params),
        source: SourceFilter::decode(params),
        search: SearchFilter::decode(params),
    }
}

pub fn encode_filters(filters: &FilterSet, params: &mut QueryParams) {
    StatusFilter::encode(&filters.statuses, params);
    OwnerFilter::encode(&filters.owners, params);
    DateRangeFilter::encode(&filters.date_range, params);
    SourceFilter::encode(&filters.source, params);
    SearchFilter::encode(&filters.search, params);
}

/// Rewrites every filter key at once with a single replace. Sort, limit and
/// unrelated keys are preserved; the page goes back to 1.
pub fn apply_filters<L: Location + ?Sized>(location: &mut L, filters: &FilterSet) {
    let mut params = location.search();
    encode_filters(filters, &mut params);
    reset_page(&mut params);
    location.replace(params);
}

/// "Clear all": drops every filter key in one replace.
pub fn clear_filters<L: Location + ?Sized>(location: &mut L) {
    apply_filters(location, &FilterSet::default());
}
