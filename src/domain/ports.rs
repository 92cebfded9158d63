use crate::domain::model::{CustomerTable, Record, ScoredTable};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn threshold(&self) -> f64;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
}

/// Pre-trained scorer: maps each record to its churn probability.
pub trait RiskModel: Send + Sync {
    fn predict_proba(&self, records: &[Record]) -> Result<Vec<f64>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CustomerTable>;
    async fn transform(&self, data: CustomerTable) -> Result<ScoredTable>;
    async fn load(&self, result: ScoredTable) -> Result<String>;
}
