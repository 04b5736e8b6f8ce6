use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod report;
pub mod state;

pub use report::{AlertLevel, Filters, Report, SourceFilter, Summary};
pub use state::{AppState, ArticleSource};

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/report", get(handlers::get_report))
        .route("/api/articles", get(handlers::list_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the dashboard API until the process exits.
pub async fn serve(state: AppState, addr: &str) -> mw_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "dashboard API listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::report::{AlertLevel, Filters, Report, SourceFilter};
    pub use crate::AppState;
    pub use mw_core::{Article, Error, Result};
}
