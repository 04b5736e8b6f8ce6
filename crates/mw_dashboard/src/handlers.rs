use crate::report::{self, Filters, Report};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use mw_core::{Article, Error};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// Comma-separated sentiment labels; absent means all three.
    pub sentiments: Option<String>,
    /// A specific source name, or "all" (the default).
    pub source: Option<String>,
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Report>, (StatusCode, String)> {
    let filters = Filters::parse(params.sentiments.as_deref(), params.source.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let articles = match state.source.load_articles().await {
        Ok(articles) => articles,
        Err(Error::DatabaseMissing(_)) => return Ok(Json(Report::NoDatabase)),
        Err(e) => {
            // Recovered: the viewer stays up and reports the broken store.
            error!(error = %e, "failed to load articles for report");
            return Ok(Json(Report::StoreUnreadable {
                error: e.to_string(),
            }));
        }
    };

    // An empty store reads the same as a missing one from the viewer's side.
    if articles.is_empty() {
        return Ok(Json(Report::NoDatabase));
    }

    Ok(Json(report::build(&articles, &filters)))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    match state.source.load_articles().await {
        Ok(articles) => Ok(Json(articles)),
        Err(Error::DatabaseMissing(_)) => Ok(Json(Vec::new())),
        Err(e) => {
            error!(error = %e, "failed to load articles");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
