use crate::types::Article;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Wholesale-replace the stored dataset with `articles`.
    ///
    /// This is an explicit replace, not an append or upsert: after a
    /// successful call a fresh `load_all` returns exactly these rows.
    /// An empty slice is a no-op and leaves prior contents untouched.
    async fn replace_all(&self, articles: &[Article]) -> Result<()>;

    /// Full-table read, ordered by publish time descending.
    async fn load_all(&self) -> Result<Vec<Article>>;
}
