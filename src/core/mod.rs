pub mod batch_pipeline;
pub mod cleaning;
pub mod engine;
pub mod online;

pub use crate::domain::model::{CustomerTable, Prediction, Record, ScoredTable};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RiskModel, Storage};
pub use crate::utils::error::Result;
