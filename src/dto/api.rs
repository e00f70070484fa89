//! JSON envelopes exposed by the `/api/v1` endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pagination::Paginated;
use crate::services::ServiceError;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> From<&Paginated<T>> for ApiPagination {
    fn from(page: &Paginated<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}

/// `{success, data, pagination}` on success, `{success, error}` on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<ApiPagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            error: None,
        }
    }

    pub fn paginated(data: T, pagination: ApiPagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Stable machine-readable code used in JSON error envelopes.
pub fn error_code(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::Unauthorized => "unauthorized",
        ServiceError::NotFound => "not_found",
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => "invalid_input",
        _ => "internal_error",
    }
}

impl<T> From<&ServiceError> for ApiResponse<T> {
    fn from(err: &ServiceError) -> Self {
        let code = error_code(err);
        // Storage and internal failures keep their details in the log.
        let message = match code {
            "internal_error" => "internal server error".to_string(),
            _ => err.to_string(),
        };
        Self::error(code, message)
    }
}

/// Campaign analytics over the leads matching the current filters.
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: usize,
    /// Every status appears, including those with zero leads.
    pub by_status: BTreeMap<String, usize>,
    /// Leads without a source are counted under `unknown`.
    pub by_source: BTreeMap<String, usize>,
    /// `won / (won + lost)`; `None` until a lead is closed.
    pub win_rate: Option<f64>,
}
