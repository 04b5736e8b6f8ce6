use async_trait::async_trait;
use mw_core::{Article, NewsStore, Result};
use std::sync::Arc;

/// Read-only seam between the viewer and the store. The viewer never
/// mutates the dataset, so handlers only ever see this trait, not the
/// write half of `NewsStore`.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn load_articles(&self) -> Result<Vec<Article>>;
}

#[async_trait]
impl<T: NewsStore> ArticleSource for T {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        self.load_all().await
    }
}

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
}
