//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use pushkind_common::routes::redirect;

use crate::services::ServiceError;

pub mod api;
pub mod leads;

/// Page shown to signed-in users without the access role.
pub const NOT_ASSIGNED_PATH: &str = "/na";

/// HTML rendering of a failed service call. Form errors go back to `back`
/// with a flash message.
pub fn html_error_response(err: ServiceError, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect(NOT_ASSIGNED_PATH),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        err => {
            log::error!("Lead page request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
