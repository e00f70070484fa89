use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::dto::api::{ApiPagination, ApiResponse, error_code};
use crate::models::auth::SessionUser;
use crate::query::QueryParams;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::api::{get_lead, lead_stats, list_leads};

fn status_for(err: &ServiceError) -> StatusCode {
    match error_code(err) {
        "unauthorized" => StatusCode::UNAUTHORIZED,
        "not_found" => StatusCode::NOT_FOUND,
        "invalid_input" => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error envelope with the matching status code.
pub fn api_error(err: &ServiceError) -> HttpResponse {
    if status_for(err) == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("API request failed: {err}");
    }
    HttpResponse::build(status_for(err)).json(ApiResponse::<()>::from(err))
}

fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
        error_code(&ServiceError::Unauthorized),
        "authentication required",
    ))
}

#[get("/v1/leads")]
pub async fn api_v1_leads(
    req: HttpRequest,
    user: Option<SessionUser>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let Some(SessionUser(user)) = user else {
        return unauthenticated();
    };

    match list_leads(repo.get_ref(), &user, QueryParams::parse(req.query_string())) {
        Ok(page) => {
            let pagination = ApiPagination::from(&page);
            HttpResponse::Ok().json(ApiResponse::paginated(page.items, pagination))
        }
        Err(err) => api_error(&err),
    }
}

#[get("/v1/leads/stats")]
pub async fn api_v1_lead_stats(
    req: HttpRequest,
    user: Option<SessionUser>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let Some(SessionUser(user)) = user else {
        return unauthenticated();
    };

    match lead_stats(repo.get_ref(), &user, QueryParams::parse(req.query_string())) {
        Ok(stats) => HttpResponse::Ok().json(ApiResponse::ok(stats)),
        Err(err) => api_error(&err),
    }
}

/// Registered after `/v1/leads/stats` so `stats` is never read as an id.
#[get("/v1/leads/{lead_id}")]
pub async fn api_v1_lead(
    lead_id: web::Path<i32>,
    user: Option<SessionUser>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let Some(SessionUser(user)) = user else {
        return unauthenticated();
    };

    match get_lead(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(lead) => HttpResponse::Ok().json(ApiResponse::ok(lead)),
        Err(err) => api_error(&err),
    }
}
