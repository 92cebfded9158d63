use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Outcome of a batch run, for the final summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: String,
    pub rows_read: usize,
    pub rows_scored: usize,
    pub rows_dropped: usize,
    pub churn_count: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

pub struct PredictionEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PredictionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting batch prediction...");

        // Extract
        let table = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", table.len());
        self.monitor.log_stats("Extract", table.len());

        // Transform
        let scored = self.pipeline.transform(table).await?;
        tracing::info!(
            "Scored {} rows ({} skipped, {} at risk)",
            scored.predictions.len(),
            scored.rows_dropped,
            scored.churn_count()
        );
        self.monitor.log_stats("Transform", scored.predictions.len());

        let summary = RunSummary {
            output_path: String::new(),
            rows_read: scored.rows_read,
            rows_scored: scored.predictions.len(),
            rows_dropped: scored.rows_dropped,
            churn_count: scored.churn_count(),
            generated_at: scored.generated_at,
        };

        // Load
        let output_path = self.pipeline.load(scored).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load", summary.rows_scored);
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            ..summary
        })
    }
}
