use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column appended to every scored row: "Yes" / "No".
pub const CHURN_RISK_COLUMN: &str = "churn risk";
/// Column appended to every scored row: positive-class probability.
pub const RISK_SCORE_COLUMN: &str = "risk score";

/// One customer. Strings are categorical, numbers numeric, `null` means missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: serde_json::Value) {
        self.data.insert(field.into(), value);
    }

    pub fn has_missing_values(&self) -> bool {
        self.data.values().any(|v| v.is_null())
    }
}

/// A CSV file as read from disk, columns in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl CustomerTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub risk_score: f64,
    pub churn: bool,
}

impl Prediction {
    pub fn from_score(risk_score: f64, threshold: f64) -> Self {
        Self {
            risk_score,
            churn: risk_score >= threshold,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.churn {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Cleaned rows with their predictions, ready to be written out.
#[derive(Debug, Clone)]
pub struct ScoredTable {
    pub table: CustomerTable,
    pub predictions: Vec<Prediction>,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl ScoredTable {
    pub fn churn_count(&self) -> usize {
        self.predictions.iter().filter(|p| p.churn).count()
    }

    /// Output header: input columns followed by the two prediction columns.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = self.table.columns.clone();
        columns.push(CHURN_RISK_COLUMN.to_string());
        columns.push(RISK_SCORE_COLUMN.to_string());
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(Prediction::from_score(0.5, 0.5).churn);
        assert!(!Prediction::from_score(0.49, 0.5).churn);
        assert_eq!(Prediction::from_score(0.9, 0.5).label(), "Yes");
    }

    #[test]
    fn test_record_missing_values() {
        let mut record = Record::new();
        record.insert("tenure", json!(3));
        assert!(!record.has_missing_values());
        record.insert("gender", serde_json::Value::Null);
        assert!(record.has_missing_values());
    }
}
