//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes split into two groups: [`configure_public`] for the welcome
//! message and health probes, and [`configure_api`] for everything that sits
//! behind the API key.

use actix_web::web;

pub mod admin;
pub mod error;
pub mod feed;
pub mod games;
pub mod health;
pub mod recommendations;
pub mod reviews;
pub mod root;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;
pub use error::configure_extractors;

/// Routes served without an API key.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(root::root).configure(health::configure);
}

/// Routes gated by the API key.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure)
        .configure(games::configure)
        .configure(reviews::configure)
        .configure(feed::configure)
        .configure(recommendations::configure)
        .configure(admin::configure);
}
