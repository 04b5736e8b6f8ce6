use async_trait::async_trait;
use mw_core::{Article, NewsStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process store used in tests and as the default backend when the
/// sqlite feature is off. Same replace semantics as the durable backend.
pub struct MemoryStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn replace_all(&self, articles: &[Article]) -> Result<()> {
        if articles.is_empty() {
            return Ok(());
        }
        let mut store = self.articles.write().await;
        *store = articles.to_vec();
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Article>> {
        let store = self.articles.read().await;
        let mut articles = store.clone();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }
}
