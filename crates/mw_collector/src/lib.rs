pub mod client;
pub mod config;
pub mod pipeline;

pub use client::{NewsApiClient, RawArticle};
pub use config::CollectorConfig;
pub use pipeline::{label, process, run, NormalizedArticle};

pub mod prelude {
    pub use super::client::NewsApiClient;
    pub use super::config::CollectorConfig;
    pub use mw_core::{Article, Error, Result};
}
