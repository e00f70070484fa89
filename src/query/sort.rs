//! `sortBy`/`sortOrder` handling.

use crate::domain::sort::{SortColumn, SortOrder, SortState};
use crate::query::field::{ParamCodec, QueryField};
use crate::query::location::Location;
use crate::query::params::QueryParams;
use crate::query::{SORT_BY_KEY, SORT_ORDER_KEY};

/// Sort codec. Each key falls back to its default on its own, and the
/// default pair is never written to the URL.
pub struct SortParam;

impl ParamCodec for SortParam {
    type Value = SortState;

    fn decode(params: &QueryParams) -> Self::Value {
        let sort_by = params
            .get(SORT_BY_KEY)
            .and_then(|raw| raw.parse::<SortColumn>().ok())
            .unwrap_or(SortState::DEFAULT_COLUMN);
        let sort_order = params
            .get(SORT_ORDER_KEY)
            .and_then(SortOrder::parse)
            .unwrap_or(SortState::DEFAULT_ORDER);

        SortState::new(sort_by, sort_order)
    }

    fn encode(value: &Self::Value, params: &mut QueryParams) {
        if value.is_default() {
            params.remove(SORT_BY_KEY);
            params.remove(SORT_ORDER_KEY);
        } else {
            params.set(SORT_BY_KEY, value.sort_by.as_str());
            params.set(SORT_ORDER_KEY, value.sort_order.as_str());
        }
    }
}

pub type SortField<'a, L> = QueryField<'a, SortParam, L>;

impl<L: Location + ?Sized> QueryField<'_, SortParam, L> {
    pub fn is_default_sort(&self) -> bool {
        self.value().is_default()
    }

    /// Sorts by `column` in `order`. Column ids outside the allow-list leave
    /// the URL untouched and return `false`.
    pub fn set_sort(&mut self, column: &str, order: SortOrder) -> bool {
        match column.parse::<SortColumn>() {
            Ok(column) => {
                self.set(SortState::new(column, order));
                true
            }
            Err(err) => {
                log::debug!("Ignoring sort by unknown column `{}`", err.0);
                false
            }
        }
    }

    /// Flips the active column or switches to `column` in its default order.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        match column.parse::<SortColumn>() {
            Ok(column) => {
                let next = self.value().toggled(column);
                self.set(next);
                true
            }
            Err(err) => {
                log::debug!("Ignoring sort toggle on unknown column `{}`", err.0);
                false
            }
        }
    }
}
