use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::{Compress, Logger};
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::{api_v1_lead, api_v1_lead_stats, api_v1_leads};
use crate::routes::leads::{apply_lead_filters, clear_leads_filters, export_leads_csv, show_leads};

pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "leads";

/// Registers every route. The API scope answers 401 with JSON; the HTML
/// scope turns 401 into a redirect to the sign-in page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(not_assigned)
        .service(
            web::scope("/api")
                .service(api_v1_leads)
                .service(api_v1_lead_stats)
                .service(api_v1_lead),
        )
        .service(
            web::scope("")
                .wrap(RedirectUnauthorized)
                .service(show_leads)
                .service(apply_lead_filters)
                .service(clear_leads_filters)
                .service(export_leads_csv)
                .service(logout),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let common_config = CommonServerConfig {
        auth_service_url: server_config.auth_service_url.to_string(),
        secret: server_config.secret.clone(),
    };

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Session secret is too short: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
