//! Codecs for the individual lead filters and the pagination keys.

use chrono::NaiveDate;

use crate::domain::filter::{DatePreset, DateRange};
use crate::domain::lead::LeadStatus;
use crate::domain::owner::OwnerRef;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::query::field::{
    ParamCodec, QueryField, decode_list, decode_text, encode_list, encode_text, reset_page,
};
use crate::query::location::Location;
use crate::query::params::QueryParams;
use crate::query::{
    FROM_KEY, LIMIT_KEY, OWNER_KEY, PAGE_KEY, SEARCH_KEY, SOURCE_KEY, STATUS_KEY, TO_KEY,
};

/// Calendar-date format used by `from`/`to`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Page sizes a list may be switched to.
pub const ALLOWED_LIMITS: [usize; 4] = [10, 20, 50, 100];

pub struct StatusFilter;

impl ParamCodec for StatusFilter {
    type Value = Vec<LeadStatus>;

    fn decode(params: &QueryParams) -> Self::Value {
        decode_list(params, STATUS_KEY)
            .iter()
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        encode_list(params, STATUS_KEY, value.iter().map(|status| status.as_str()));
    }
}

pub struct OwnerFilter;

impl ParamCodec for OwnerFilter {
    type Value = Vec<OwnerRef>;

    fn decode(params: &QueryParams) -> Self::Value {
        decode_list(params, OWNER_KEY)
            .iter()
            .filter_map(|token| OwnerRef::parse(token))
            .collect()
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        encode_list(params, OWNER_KEY, value.iter().map(OwnerRef::as_str));
    }
}

/// `from`/`to` pair. Both must be valid dates in order, otherwise the filter
/// is inactive as a whole.
pub struct DateRangeFilter;

impl DateRangeFilter {
    fn parse_date(params: &QueryParams, key: &str) -> Option<NaiveDate> {
        params
            .get(key)
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())
    }
}

impl ParamCodec for DateRangeFilter {
    type Value = Option<DateRange>;

    fn decode(params: &QueryParams) -> Self::Value {
        let from = Self::parse_date(params, FROM_KEY)?;
        let to = Self::parse_date(params, TO_KEY)?;
        DateRange::new(from, to)
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        match value {
            Some(range) => {
                params.set(FROM_KEY, range.from().format(DATE_FORMAT).to_string());
                params.set(TO_KEY, range.to().format(DATE_FORMAT).to_string());
            }
            None => {
                params.remove(FROM_KEY);
                params.remove(TO_KEY);
            }
        }
    }
}

impl<L: Location + ?Sized> QueryField<'_, DateRangeFilter, L> {
    /// Writes the concrete range a preset resolves to on `today`.
    pub fn set_preset(&mut self, preset: DatePreset, today: NaiveDate) {
        self.set(Some(preset.resolve(today)));
    }
}

pub struct SourceFilter;

impl ParamCodec for SourceFilter {
    type Value = Option<String>;

    fn decode(params: &QueryParams) -> Self::Value {
        decode_text(params, SOURCE_KEY)
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        encode_text(params, SOURCE_KEY, value.as_deref());
    }
}

/// Free-text search over name, email and company.
pub struct SearchFilter;

impl ParamCodec for SearchFilter {
    type Value = Option<String>;

    fn decode(params: &QueryParams) -> Self::Value {
        decode_text(params, SEARCH_KEY)
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        encode_text(params, SEARCH_KEY, value.as_deref());
    }
}

/// `page` and `limit`. Not a filter: changing the page keeps every other key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: usize,
    pub limit: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PaginationParams {
    pub fn decode(params: &QueryParams) -> Self {
        let page = params
            .get(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);
        let limit = params
            .get(LIMIT_KEY)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|limit| ALLOWED_LIMITS.contains(limit))
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Self { page, limit }
    }

    pub fn from_location<L: Location + ?Sized>(location: &L) -> Self {
        Self::decode(&location.search())
    }

    /// Rewrites `page` only.
    pub fn set_page<L: Location + ?Sized>(location: &mut L, page: usize) {
        let mut params = location.search();
        params.set(PAGE_KEY, page.max(1).to_string());
        location.replace(params);
    }

    /// Switches page size and goes back to the first page. Sizes outside
    /// [`ALLOWED_LIMITS`] are ignored.
    pub fn set_limit<L: Location + ?Sized>(location: &mut L, limit: usize) -> bool {
        if !ALLOWED_LIMITS.contains(&limit) {
            log::debug!("Ignoring unsupported page size {limit}");
            return false;
        }
        let mut params = location.search();
        params.set(LIMIT_KEY, limit.to_string());
        reset_page(&mut params);
        location.replace(params);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::location::MemoryLocation;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unknown_statuses_are_dropped() {
        let params = QueryParams::parse("status=new,bogus,won");
        assert_eq!(
            StatusFilter::decode(&params),
            vec![LeadStatus::New, LeadStatus::Won]
        );
    }

    #[test]
    fn owner_filter_round_trips_through_url() {
        let mut location = MemoryLocation::new("/", "page=4&limit=50");
        let mut owners = QueryField::<OwnerFilter, _>::new(&mut location);
        assert!(!owners.has_filter());

        owners.set(vec![
            OwnerRef::Unassigned,
            OwnerRef::Handle("user-1".to_string()),
        ]);
        assert!(owners.has_filter());
        assert_eq!(
            owners.value(),
            &vec![OwnerRef::Unassigned, OwnerRef::Handle("user-1".to_string())]
        );

        assert_eq!(location.href(), "/?page=1&limit=50&owner=unassigned%2Cuser-1");
        assert_eq!(location.replacements(), 1);
    }

    #[test]
    fn clearing_a_list_filter_deletes_the_key() {
        let mut location = MemoryLocation::new("/", "status=new%2Cwon&sortBy=name&page=3");
        let mut statuses = QueryField::<StatusFilter, _>::new(&mut location);
        statuses.clear();
        assert!(statuses.value().is_empty());
        assert_eq!(location.params().to_query_string(), "sortBy=name&page=1");
    }

    #[test]
    fn date_range_requires_both_ordered_bounds() {
        let cases = [
            "from=2024-03-05&to=2024-03-01",
            "from=2024-03-01",
            "to=2024-03-01",
            "from=2024-13-01&to=2024-03-01",
            "from=yesterday&to=2024-03-01",
        ];
        for query in cases {
            assert_eq!(
                DateRangeFilter::decode(&QueryParams::parse(query)),
                None,
                "{query}"
            );
        }

        let range = DateRangeFilter::decode(&QueryParams::parse("from=2024-03-01&to=2024-03-05"));
        assert_eq!(range, DateRange::new(day(2024, 3, 1), day(2024, 3, 5)));
    }

    #[test]
    fn date_range_writes_calendar_dates() {
        let mut location = MemoryLocation::new("/", "q=acme");
        let mut dates = QueryField::<DateRangeFilter, _>::new(&mut location);
        dates.set_preset(DatePreset::Today, day(2024, 2, 29));
        assert_eq!(
            location.params().to_query_string(),
            "q=acme&from=2024-02-29&to=2024-02-29&page=1"
        );
    }

    #[test]
    fn pagination_falls_back_to_defaults() {
        let params = QueryParams::parse("page=-2&limit=7");
        assert_eq!(PaginationParams::decode(&params), PaginationParams::default());

        let params = QueryParams::parse("page=3&limit=50");
        assert_eq!(
            PaginationParams::decode(&params),
            PaginationParams { page: 3, limit: 50 }
        );
    }

    #[test]
    fn set_page_keeps_other_keys() {
        let mut location = MemoryLocation::new("/", "status=won&page=1&sortBy=name");
        PaginationParams::set_page(&mut location, 4);
        assert_eq!(
            location.params().to_query_string(),
            "status=won&page=4&sortBy=name"
        );
    }

    #[test]
    fn set_limit_resets_page_and_rejects_odd_sizes() {
        let mut location = MemoryLocation::new("/", "page=5");
        assert!(!PaginationParams::set_limit(&mut location, 13));
        assert_eq!(location.replacements(), 0);

        assert!(PaginationParams::set_limit(&mut location, 50));
        assert_eq!(location.params().to_query_string(), "page=1&limit=50");
    }
}
