pub mod models;

pub use models::create_model;

pub mod prelude {
    pub use super::models::create_model;
    pub use mw_core::{Result, SentimentModel};
}
