use crate::domain::model::Record;
use crate::utils::error::{ChurnError, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_SEPARATOR: &str = "=";

/// One-hot / pass-through encoder fitted on dictionaries of features.
///
/// String values become indicator features named `field{separator}value`,
/// numbers and booleans keep the field name and carry their value. Features
/// outside the fitted vocabulary are ignored.
#[derive(Debug, Clone)]
pub struct DictVectorizer {
    feature_names: Vec<String>,
    vocabulary: HashMap<String, usize>,
    separator: String,
}

impl DictVectorizer {
    pub fn new(feature_names: Vec<String>, separator: impl Into<String>) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(ChurnError::model("feature vocabulary is empty"));
        }

        let mut vocabulary = HashMap::with_capacity(feature_names.len());
        for (index, name) in feature_names.iter().enumerate() {
            if vocabulary.insert(name.clone(), index).is_some() {
                return Err(ChurnError::model(format!(
                    "duplicate feature name in vocabulary: {}",
                    name
                )));
            }
        }

        Ok(Self {
            feature_names,
            vocabulary,
            separator: separator.into(),
        })
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn transform_one(&self, record: &Record) -> Vec<f64> {
        let mut row = vec![0.0; self.n_features()];

        for (field, value) in &record.data {
            let (name, x) = match value {
                Value::String(s) => (format!("{}{}{}", field, self.separator, s), 1.0),
                Value::Number(n) => match n.as_f64() {
                    Some(x) => (field.clone(), x),
                    None => continue,
                },
                Value::Bool(b) => (field.clone(), if *b { 1.0 } else { 0.0 }),
                // 缺值與巢狀結構不產生特徵
                Value::Null | Value::Array(_) | Value::Object(_) => continue,
            };

            match self.vocabulary.get(&name) {
                Some(&index) => row[index] = x,
                None => tracing::trace!("ignoring unseen feature '{}'", name),
            }
        }

        row
    }

    pub fn transform(&self, records: &[Record]) -> Vec<Vec<f64>> {
        records.iter().map(|r| self.transform_one(r)).collect()
    }
}
