pub mod api;
pub mod export;
pub mod leads;

pub use pushkind_common::services::errors::{ServiceError, ServiceResult};
