pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::SentimentModel;
pub use storage::NewsStore;
pub use types::{Article, Sentiment};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::models::SentimentModel;
    pub use crate::storage::NewsStore;
    pub use crate::types::{Article, Sentiment};
    pub use crate::{Error, Result};
}
