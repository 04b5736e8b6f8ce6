use async_trait::async_trait;
use mw_core::{Result, SentimentModel};
use std::fmt;

/// Weighted polarity entries. Values stay in [-1, 1]; the mean over matched
/// tokens is the article score, so the sign contract of the trait holds.
const LEXICON: &[(&str, f32)] = &[
    ("amazing", 0.9),
    ("awful", -0.9),
    ("bad", -0.6),
    ("best", 0.9),
    ("boost", 0.5),
    ("brilliant", 0.9),
    ("champion", 0.7),
    ("collapse", -0.7),
    ("crisis", -0.8),
    ("defeat", -0.6),
    ("disaster", -0.9),
    ("excellent", 0.9),
    ("failure", -0.8),
    ("fantastic", 0.9),
    ("fear", -0.5),
    ("good", 0.6),
    ("great", 0.8),
    ("happy", 0.7),
    ("hope", 0.4),
    ("horrible", -0.9),
    ("improve", 0.5),
    ("injury", -0.5),
    ("lose", -0.6),
    ("loss", -0.6),
    ("optimistic", 0.6),
    ("poor", -0.5),
    ("problem", -0.4),
    ("progress", 0.5),
    ("record", 0.3),
    ("recover", 0.4),
    ("risk", -0.4),
    ("scandal", -0.8),
    ("strong", 0.5),
    ("success", 0.8),
    ("terrible", -0.9),
    ("threat", -0.6),
    ("triumph", 0.8),
    ("victory", 0.7),
    ("weak", -0.5),
    ("win", 0.7),
    ("wins", 0.7),
    ("worst", -0.9),
];

/// Default classifier: a small embedded polarity lexicon. Scores the mean
/// polarity of the matched tokens, 0 when nothing matches.
pub struct LexiconModel;

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    fn polarity_of(token: &str) -> Option<f32> {
        LEXICON
            .binary_search_by(|(word, _)| (*word).cmp(&token))
            .ok()
            .map(|i| LEXICON[i].1)
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel")
            .field("entries", &LEXICON.len())
            .finish()
    }
}

#[async_trait]
impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "Lexicon"
    }

    async fn score(&self, text: &str) -> Result<f32> {
        let mut sum = 0.0f32;
        let mut matched = 0usize;

        for raw in text.split_whitespace() {
            let token: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            if let Some(polarity) = Self::polarity_of(&token) {
                sum += polarity;
                matched += 1;
            }
        }

        if matched == 0 {
            return Ok(0.0);
        }
        Ok(sum / matched as f32)
    }
}
