use async_trait::async_trait;
use mw_core::{Result, SentimentModel};
use std::fmt;

/// Scores everything 0.0, so every article labels neutral. Useful as a
/// stand-in when labeling should be inert (tests, dry runs).
pub struct NeutralModel;

impl fmt::Debug for NeutralModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeutralModel").finish()
    }
}

#[async_trait]
impl SentimentModel for NeutralModel {
    fn name(&self) -> &str {
        "Neutral"
    }

    async fn score(&self, _text: &str) -> Result<f32> {
        Ok(0.0)
    }
}
