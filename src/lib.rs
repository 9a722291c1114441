pub mod config;
pub mod error;
pub mod model;
pub mod utils;

pub use config::RatingConfig;
pub use error::EngineError;
