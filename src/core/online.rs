use crate::domain::customer::CustomerProfile;
use crate::domain::model::Prediction;
use crate::domain::ports::RiskModel;
use crate::utils::error::{ChurnError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::Serialize;

pub const MIN_THRESHOLD: f64 = 0.1;
pub const MAX_THRESHOLD: f64 = 0.9;
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub fn validate_threshold(threshold: f64) -> Result<()> {
    validate_range("threshold", threshold, MIN_THRESHOLD, MAX_THRESHOLD)
}

/// Scores a single customer against `threshold`.
pub fn predict_customer<M: RiskModel + ?Sized>(
    model: &M,
    profile: &CustomerProfile,
    threshold: f64,
) -> Result<Prediction> {
    validate_threshold(threshold)?;
    profile.validate()?;

    let record = profile.to_record();
    let scores = model.predict_proba(std::slice::from_ref(&record))?;
    let risk_score = scores
        .first()
        .copied()
        .ok_or_else(|| ChurnError::model("model returned no score"))?;

    let prediction = Prediction::from_score(risk_score, threshold);
    tracing::debug!(
        "Online prediction: score={:.4}, threshold={}, churn={}",
        risk_score,
        threshold,
        prediction.churn
    );
    Ok(prediction)
}

#[derive(Debug, Serialize)]
pub struct OnlineReport<'a> {
    pub churn_risk: &'static str,
    pub risk_score: f64,
    pub threshold: f64,
    pub customer: &'a CustomerProfile,
}

pub fn render_text(prediction: &Prediction) -> String {
    format!(
        "### Prediction Result\nChurn Risk: {}\nRisk Score: {:.2}",
        prediction.label(),
        prediction.risk_score
    )
}

pub fn render_json(prediction: &Prediction, threshold: f64, profile: &CustomerProfile) -> Result<String> {
    let report = OnlineReport {
        churn_risk: prediction.label(),
        risk_score: prediction.risk_score,
        threshold,
        customer: profile,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
