pub mod catalog;
pub mod config;

pub use catalog::{MlFeature, Strategy};
pub use config::StrategyConfig;
