use std::net::SocketAddr;

use agency_core_health_contracts::HealthFeatureService;
use agency_core_submission_contracts::SubmissionFeatureService;
use agency_di::Build;
use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Submission> {
    health: Health,
    submission: Submission,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Health, Submission> RestServer<Health, Submission>
where
    Health: HealthFeatureService,
    Submission: SubmissionFeatureService,
{
    /// Serve the API until the process receives Ctrl-C. Requests that are in
    /// flight at that point are allowed to finish.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::submission::router(self.submission.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::cors::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(err) => warn!("Failed to listen for Ctrl-C: {err}"),
    }
}
