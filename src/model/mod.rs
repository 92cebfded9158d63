//! Pre-trained churn model: a dictionary vectorizer feeding a logistic
//! regression classifier, loaded once from a JSON model file.

pub mod classifier;
pub mod vectorizer;

use crate::domain::model::Record;
use crate::domain::ports::RiskModel;
use crate::utils::error::{ChurnError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use classifier::LogisticRegression;
pub use vectorizer::DictVectorizer;

/// On-disk layout of a model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Regularization strength the model was trained with, informational only.
    #[serde(default)]
    pub c: Option<f64>,
}

fn default_separator() -> String {
    vectorizer::DEFAULT_SEPARATOR.to_string()
}

#[derive(Debug, Clone)]
pub struct ChurnModel {
    encoder: DictVectorizer,
    classifier: LogisticRegression,
}

impl ChurnModel {
    pub fn new(encoder: DictVectorizer, classifier: LogisticRegression) -> Result<Self> {
        if encoder.n_features() != classifier.n_features() {
            return Err(ChurnError::model(format!(
                "vocabulary has {} features but classifier has {} coefficients",
                encoder.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            encoder,
            classifier,
        })
    }

    pub fn from_model_file(file: ModelFile) -> Result<Self> {
        let encoder = DictVectorizer::new(file.feature_names, file.separator)?;
        let classifier = LogisticRegression::new(file.coefficients, file.intercept)?;
        Self::new(encoder, classifier)
    }

    /// 從 JSON 字串載入模型
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(content)
            .map_err(|e| ChurnError::model(format!("invalid model file: {}", e)))?;
        Self::from_model_file(file)
    }

    /// 從檔案載入模型
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChurnError::model(format!("cannot read model file '{}': {}", path.display(), e))
        })?;
        let model = Self::from_json_str(&content)?;

        tracing::debug!(
            "Loaded churn model from {} ({} features)",
            path.display(),
            model.n_features()
        );
        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.encoder.n_features()
    }

    pub fn encoder(&self) -> &DictVectorizer {
        &self.encoder
    }
}

impl RiskModel for ChurnModel {
    fn predict_proba(&self, records: &[Record]) -> Result<Vec<f64>> {
        let x = self.encoder.transform(records);
        self.classifier.predict_proba(&x)
    }
}
