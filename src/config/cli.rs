use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::domain::customer::CustomerProfile;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "churn-predict")]
#[command(about = "Customer churn risk prediction for single customers or CSV batches")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the churn model JSON file
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Churn risk threshold (0.1 - 0.9)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Predict churn for a single customer
    Predict(PredictArgs),
    /// Predict churn for every customer in a CSV file
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub customer: CustomerProfile,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV file with customer data (needs tenure and monthlycharges columns)
    #[arg(short, long)]
    pub input: String,

    /// Directory for the results file
    #[arg(long)]
    pub output_path: Option<String>,

    /// Name of the results file
    #[arg(long)]
    pub output_filename: Option<String>,
}

impl CliConfig {
    /// 合併預設值、TOML 檔案與命令列參數
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };

        let (output_path, output_filename) = match &self.command {
            Command::Batch(args) => (args.output_path.clone(), args.output_filename.clone()),
            Command::Predict(_) => (None, None),
        };

        Ok(Settings::layered(
            file.as_ref(),
            Overrides {
                model_path: self.model.clone(),
                threshold: self.threshold,
                output_path,
                output_filename,
                monitor: self.monitor,
            },
        ))
    }
}

impl Validate for BatchArgs {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extension("input", &self.input, &["csv"])
    }
}
