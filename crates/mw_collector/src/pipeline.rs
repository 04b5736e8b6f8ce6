use crate::client::{NewsApiClient, RawArticle};
use chrono::{DateTime, Utc};
use mw_core::{Article, NewsStore, Result, Sentiment, SentimentModel};
use tracing::{info, warn};

/// Article after normalization, before the sentiment column exists.
#[derive(Debug, Clone)]
pub struct NormalizedArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub full_text: String,
}

/// Normalizes raw records into the uniform shape: missing title and
/// description coerce to empty strings before `full_text` is derived, and
/// the result is sorted newest first.
///
/// Records missing url, publish time, or source name are dropped with a
/// warning. A row without a timestamp cannot be ordered and a row without
/// a source cannot be filtered, so nulls are not propagated downstream.
pub fn process(raw: Vec<RawArticle>) -> Vec<NormalizedArticle> {
    let mut articles: Vec<NormalizedArticle> = raw
        .into_iter()
        .filter_map(|record| {
            let title = record.title.unwrap_or_default();
            let description = record.description.unwrap_or_default();

            let (url, published_at, source) =
                match (record.url, record.published_at, record.source.name) {
                    (Some(url), Some(published_at), Some(source)) => (url, published_at, source),
                    _ => {
                        warn!(title = %title, "dropping record missing url, publish time, or source");
                        return None;
                    }
                };

            let full_text = Article::full_text_of(&title, &description);
            Some(NormalizedArticle {
                title,
                description,
                url,
                published_at,
                source,
                full_text,
            })
        })
        .collect();

    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}

/// Adds the sentiment column: each row's `full_text` goes through the
/// classifier and the sign of the score picks the label. An empty input
/// short-circuits without ever invoking the classifier.
pub async fn label(
    articles: Vec<NormalizedArticle>,
    model: &dyn SentimentModel,
) -> Result<Vec<Article>> {
    if articles.is_empty() {
        return Ok(Vec::new());
    }

    let mut labeled = Vec::with_capacity(articles.len());
    for article in articles {
        let score = model.score(&article.full_text).await?;
        labeled.push(Article {
            title: article.title,
            description: article.description,
            url: article.url,
            published_at: article.published_at,
            source: article.source,
            full_text: article.full_text,
            sentiment: Sentiment::from_score(score),
        });
    }
    Ok(labeled)
}

/// Runs one collection end to end: fetch, normalize, label, replace the
/// stored dataset. Returns the number of rows persisted. A failed write is
/// fatal and propagates; an empty fetch degrades to a no-op persist.
pub async fn run(
    client: &NewsApiClient,
    model: &dyn SentimentModel,
    store: &dyn NewsStore,
) -> Result<usize> {
    let raw = client.fetch().await?;
    if raw.is_empty() {
        info!("no articles found for the lookback window");
    }

    let normalized = process(raw);
    let labeled = label(normalized, model).await?;

    store.replace_all(&labeled).await?;
    if !labeled.is_empty() {
        info!(count = labeled.len(), model = model.name(), "articles labeled and stored");
    }
    Ok(labeled.len())
}
