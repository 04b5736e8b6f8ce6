use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete sentiment label attached to every persisted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Maps a signed polarity score to a label. The sign is the whole
    /// contract: strictly positive scores are positive, strictly negative
    /// are negative, exactly zero is neutral.
    pub fn from_score(score: f32) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(crate::Error::Database(format!(
                "unknown sentiment label: {}",
                other
            ))),
        }
    }
}

/// One normalized news record. `full_text` is derived from title and
/// description at normalization time and is never null; the whole row is
/// immutable once the sentiment label is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub full_text: String,
    pub sentiment: Sentiment,
}

impl Article {
    /// Joins title and description into the text the classifier sees.
    /// Callers coerce missing values to empty strings first.
    pub fn full_text_of(title: &str, description: &str) -> String {
        format!("{} {}", title, description)
    }
}
