//! Request user extracted from a bearer token or the identity session.
//!
//! Claims are the shared [`AuthenticatedUser`]. The extractor here adds two
//! things the shared one does not do: `Authorization: Bearer` tokens for API
//! clients, and sliding the session expiry when it is close to running out.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, web};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::models::config::ServerConfig;

/// Signs `user` as an HS256 token.
pub fn encode_token(user: &AuthenticatedUser, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decodes and validates an HS256 token, including its expiry.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// True when the token is still valid but expires within `window` seconds.
pub fn needs_refresh(user: &AuthenticatedUser, now: i64, window: i64) -> bool {
    user.exp > now && user.exp - now <= window
}

/// Same claims with the expiry moved to `now + ttl`.
pub fn refreshed(user: &AuthenticatedUser, now: i64, ttl: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: user.sub.clone(),
        email: user.email.clone(),
        hub_id: user.hub_id,
        name: user.name.clone(),
        roles: user.roles.clone(),
        exp: now + ttl,
    }
}

/// Signed-in user of the current request.
pub struct SessionUser(pub AuthenticatedUser);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn refresh_session(req: &HttpRequest, user: &AuthenticatedUser, now: i64, config: &ServerConfig) {
    let token = match encode_token(&refreshed(user, now, config.session_ttl_secs), &config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::warn!("Failed to sign refreshed session for {}: {err}", user.email);
            return;
        }
    };

    match Identity::login(&req.extensions(), token) {
        Ok(_) => log::debug!("Refreshed session for {}", user.email),
        Err(err) => log::warn!("Failed to store refreshed session for {}: {err}", user.email),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("ServerConfig is not registered as app data");
        ErrorInternalServerError("server is misconfigured")
    })?;

    if let Some(token) = bearer_token(req) {
        return decode_token(&token, &config.secret).map_err(|err| {
            log::debug!("Rejected bearer token: {err}");
            ErrorUnauthorized("invalid token")
        });
    }

    let token = req
        .get_identity()
        .ok()
        .and_then(|identity| identity.id().ok())
        .ok_or_else(|| ErrorUnauthorized("not signed in"))?;

    let user = decode_token(&token, &config.secret).map_err(|err| {
        log::debug!("Rejected session token: {err}");
        ErrorUnauthorized("invalid session")
    })?;

    let now = Utc::now().timestamp();
    if needs_refresh(&user, now, config.session_refresh_window_secs) {
        refresh_session(req, &user, now, config);
    }

    Ok(user)
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(SessionUser))
    }
}
