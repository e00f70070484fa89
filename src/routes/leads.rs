use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::leads::{ClearFiltersForm, LeadFilterForm};
use crate::models::auth::SessionUser;
use crate::query::{MemoryLocation, QueryParams};
use crate::repository::DieselRepository;
use crate::routes::html_error_response;
use crate::services::export::export_leads;
use crate::services::leads::{
    LEADS_PATH, clear_lead_filters, filter_leads, leads_href, load_leads_page,
};

#[get("/")]
pub async fn show_leads(
    req: HttpRequest,
    SessionUser(user): SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let location = MemoryLocation::new(LEADS_PATH, req.query_string());
    let today = Utc::now().date_naive();

    match load_leads_page(repo.get_ref(), &user, &location, today) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leads",
                &server_config.auth_service_url,
            );
            context.insert("page", &data);
            render_template(&tera, "leads/index.html", &context)
        }
        Err(err) => html_error_response(err, LEADS_PATH),
    }
}

/// Filter panels submit repeated checkbox keys, which `web::Form` cannot
/// collect, so the body is decoded with `serde_html_form`.
#[post("/leads/filter")]
pub async fn apply_lead_filters(SessionUser(user): SessionUser, body: web::Bytes) -> impl Responder {
    let form: LeadFilterForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Malformed filter form: {err}");
            FlashMessage::error("Could not read the filter form.").send();
            return redirect(LEADS_PATH);
        }
    };

    let back = leads_href(&form.query);
    match filter_leads(&user, form, Utc::now().date_naive()) {
        Ok(href) => redirect(&href),
        Err(err) => html_error_response(err, &back),
    }
}

#[post("/leads/clear")]
pub async fn clear_leads_filters(
    SessionUser(user): SessionUser,
    web::Form(form): web::Form<ClearFiltersForm>,
) -> impl Responder {
    let back = leads_href(&form.query);
    match clear_lead_filters(&user, form) {
        Ok(href) => redirect(&href),
        Err(err) => html_error_response(err, &back),
    }
}

#[get("/leads/export")]
pub async fn export_leads_csv(
    req: HttpRequest,
    SessionUser(user): SessionUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = QueryParams::parse(req.query_string());
    let back = leads_href(req.query_string());

    let export = match export_leads(repo.get_ref(), &user, params) {
        Ok(export) => export,
        Err(err) => return html_error_response(err, &back),
    };

    match export.to_csv() {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"leads.csv\"",
            ))
            .body(bytes),
        Err(err) => {
            log::error!("Failed to write CSV export: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
