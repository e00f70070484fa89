//! Lead-list state kept in the URL query string.
//!
//! Every request derives filters, sort and pagination from the query string
//! and every change produces a rewritten query string. Nothing is cached
//! server-side, so the address bar is the only store of list state.

pub mod field;
pub mod filters;
pub mod list;
pub mod location;
pub mod params;
pub mod sort;

pub use field::{ParamCodec, QueryField};
pub use list::{LeadListState, apply_filters, clear_filters};
pub use location::{Location, MemoryLocation};
pub use params::QueryParams;

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";
pub const STATUS_KEY: &str = "status";
pub const OWNER_KEY: &str = "owner";
pub const FROM_KEY: &str = "from";
pub const TO_KEY: &str = "to";
pub const SOURCE_KEY: &str = "source";
pub const SEARCH_KEY: &str = "q";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_ORDER_KEY: &str = "sortOrder";
