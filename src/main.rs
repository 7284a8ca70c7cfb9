use std::{env, net::SocketAddr, sync::Arc};

#[macro_use]
extern crate lazy_static;

use tracing_subscriber::EnvFilter;

use crate::{
    app::{env::Envy, util::rate_limit::RateLimits},
    images::{apis::gemini::service::GeminiClient, provider::ImageProvider},
};

mod app;
mod images;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub provider: Arc<dyn ImageProvider>,
    pub rate_limits: Arc<RateLimits>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port();

    let provider: Arc<dyn ImageProvider> = Arc::new(GeminiClient::from_envy(&envy));
    let rate_limits = Arc::new(RateLimits::from_envy(&envy));
    tracing::info!(
        "rate limits: default {:?}, generate {:?}",
        rate_limits.default.labels(),
        rate_limits.generate.labels()
    );

    app::util::janitor::spawn(rate_limits.clone());

    let probe = provider.clone();
    tokio::spawn(async move {
        if probe.test_connection().await {
            tracing::info!("{} connection test passed", probe.name());
        } else {
            tracing::warn!("{} connection test failed", probe.name());
        }
    });

    let state = AppState {
        envy: Arc::new(envy),
        provider,
        rate_limits,
    };

    // app
    let app = app::router::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
