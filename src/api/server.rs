use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();
    let body_limit = DefaultBodyLimit::max(shared_state.config.max_upload_bytes);

    Router::new()
        // API routes
        .nest("/api", routes::router())
        // The timesheet endpoints are also served at the root for
        // clients that predate the /api prefix
        .merge(routes::timesheet::router())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Bucketing meetings in {} with allowed calendar hosts {:?}",
        config.local_tz,
        config.allowed_ics_hosts
    );

    let app_state = AppState::new(config)?;
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
