use crate::Result;
use async_trait::async_trait;
use std::fmt;

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    /// Returns the name of the classifier
    fn name(&self) -> &str;

    /// Score a piece of text on a signed polarity scale. Only the sign is
    /// contractual: > 0 reads positive, < 0 negative, 0 neutral.
    async fn score(&self, text: &str) -> Result<f32>;
}
