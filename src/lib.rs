pub mod config;
pub mod core;
pub mod domain;
pub mod model;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{storage::LocalStorage, Settings};
pub use core::{batch_pipeline::BatchPipeline, engine::PredictionEngine};
pub use domain::customer::CustomerProfile;
pub use model::ChurnModel;
pub use utils::error::{ChurnError, Result};
