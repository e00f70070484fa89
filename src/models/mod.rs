//! Database models and request-scoped models shared across the service.

pub mod auth;
pub mod config;
pub mod lead;
pub mod owner;
