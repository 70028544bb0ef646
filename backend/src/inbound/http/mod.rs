//! HTTP inbound adapter exposing the user REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

use crate::domain::Error;
use error::INVALID_PAYLOAD_MESSAGE;

/// Register the user routes, `/healthcheck` and the JSON body policy.
///
/// Callers provide [`state::HttpState`] as app data. Orchestration probes are
/// registered separately because they need [`health::HealthState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected request body");
        Error::invalid_request(INVALID_PAYLOAD_MESSAGE).into()
    });

    cfg.app_data(json)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(health::healthcheck);
}
