use crate::utils::error::{ChurnError, Result};

/// Binary logistic regression with fixed, pre-trained weights.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(ChurnError::model(format!(
                "coefficient {} is not a finite number",
                i
            )));
        }
        if !intercept.is_finite() {
            return Err(ChurnError::model("intercept is not a finite number"));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.coefficients.len() {
            return Err(ChurnError::model(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                x.len()
            )));
        }

        Ok(self
            .coefficients
            .iter()
            .zip(x)
            .fold(self.intercept, |z, (w, xi)| z + w * xi))
    }

    /// Probability of the positive (churn) class for each row.
    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        x.iter()
            .map(|row| self.decision_function(row).map(sigmoid))
            .collect()
    }
}

/// σ(z) = 1 / (1 + e^(-z)), split on sign so neither branch overflows.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
