use crate::core::cleaning::{clean_customer_table, read_customer_table};
use crate::core::{ConfigProvider, CustomerTable, Pipeline, RiskModel, ScoredTable, Storage};
use crate::domain::model::Prediction;
use crate::utils::error::{ChurnError, Result};
use serde_json::Value;
use std::path::Path;

pub const DEFAULT_OUTPUT_FILENAME: &str = "churn_predictions.csv";

/// Reads a customer CSV, scores every clean row and writes the results back out.
pub struct BatchPipeline<S: Storage, C: ConfigProvider, M: RiskModel> {
    storage: S,
    config: C,
    model: M,
    input_path: String,
}

impl<S: Storage, C: ConfigProvider, M: RiskModel> BatchPipeline<S, C, M> {
    pub fn new(storage: S, config: C, model: M, input_path: impl Into<String>) -> Self {
        Self {
            storage,
            config,
            model,
            input_path: input_path.into(),
        }
    }
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 將結果表輸出成 CSV（含表頭、無索引欄）
pub fn scored_table_to_csv(result: &ScoredTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(result.output_columns())?;

    for (record, prediction) in result.table.records.iter().zip(&result.predictions) {
        let mut row: Vec<String> = result
            .table
            .columns
            .iter()
            .map(|c| record.get(c).map(format_cell).unwrap_or_default())
            .collect();
        row.push(prediction.label().to_string());
        row.push(prediction.risk_score.to_string());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ChurnError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, M: RiskModel> Pipeline for BatchPipeline<S, C, M> {
    async fn extract(&self) -> Result<CustomerTable> {
        tracing::debug!("Reading customer file: {}", self.input_path);
        let bytes = self.storage.read_file(&self.input_path).await?;
        read_customer_table(&bytes)
    }

    async fn transform(&self, data: CustomerTable) -> Result<ScoredTable> {
        let cleaned = clean_customer_table(data)?;
        let threshold = self.config.threshold();

        let scores = if cleaned.table.is_empty() {
            Vec::new()
        } else {
            self.model.predict_proba(&cleaned.table.records)?
        };

        if scores.len() != cleaned.table.len() {
            return Err(ChurnError::processing(format!(
                "model returned {} scores for {} rows",
                scores.len(),
                cleaned.table.len()
            )));
        }

        let predictions: Vec<Prediction> = scores
            .into_iter()
            .map(|score| Prediction::from_score(score, threshold))
            .collect();

        Ok(ScoredTable {
            table: cleaned.table,
            predictions,
            rows_read: cleaned.rows_read,
            rows_dropped: cleaned.rows_dropped,
            generated_at: chrono::Utc::now(),
        })
    }

    async fn load(&self, result: ScoredTable) -> Result<String> {
        let filename = self.config.output_filename();
        let output_path = Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .to_string();

        let csv_data = scored_table_to_csv(&result)?;
        tracing::debug!("Writing {} bytes of predictions to storage", csv_data.len());
        self.storage.write_file(filename, &csv_data).await?;

        Ok(output_path)
    }
}
