//! Users service entry-point: loads settings, wires adapters, and runs the
//! HTTP and gRPC listeners side by side.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, serve_grpc};
use users_service::inbound::http::health::HealthState;
use users_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = ServerConfig::from_settings(&settings).await?;
    let users = Arc::clone(&config.http_state.users);

    let health_state = web::Data::new(HealthState::new());
    let http = create_server(health_state.clone(), &config).wrap_err("failed to bind http server")?;
    let grpc = serve_grpc(users, config.grpc_bind());

    let outcome = tokio::try_join!(
        async { http.await.wrap_err("http server failed") },
        async { grpc.await.wrap_err("grpc server failed") },
    );
    health_state.mark_unhealthy();
    outcome.map(|_| ())
}
