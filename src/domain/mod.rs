//! Domain types for leads, their owners and list filtering.

pub mod filter;
pub mod lead;
pub mod owner;
pub mod sort;
pub mod types;
