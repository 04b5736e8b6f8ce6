use mw_core::{Result, SentimentModel};
use std::sync::Arc;

pub mod lexicon;
pub mod neutral;

pub use lexicon::LexiconModel;
pub use neutral::NeutralModel;

/// Builds a classifier by CLI name. Swapping classifiers changes labels,
/// never the shape of the pipeline.
pub fn create_model(name: &str) -> Result<Arc<dyn SentimentModel>> {
    match name {
        "lexicon" => Ok(Arc::new(LexiconModel::new())),
        "neutral" => Ok(Arc::new(NeutralModel)),
        other => Err(mw_core::Error::Classifier(format!(
            "unknown sentiment model: {} (available: lexicon, neutral)",
            other
        ))),
    }
}
