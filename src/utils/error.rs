use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing columns in the uploaded file: {}", .columns.join(", "))]
    MissingColumnsError { columns: Vec<String> },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Model,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChurnError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::ModelError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_) | Self::MissingColumnsError { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Input
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ModelError { .. } => ErrorCategory::Model,
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Medium,
            Self::CsvError(_)
            | Self::MissingColumnsError { .. }
            | Self::ProcessingError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ModelError { .. }
            | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::CsvError(_) => {
                "Check that the input is a well-formed CSV file with a header row".to_string()
            }
            Self::IoError(_) => "Check that the file exists and the path is readable/writable".to_string(),
            Self::SerializationError(_) => "Check that the JSON document is well-formed".to_string(),
            Self::ConfigError { .. } => "Review the TOML configuration file and CLI flags".to_string(),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            Self::MissingColumnsError { columns } => format!(
                "Add the column(s) {} to the CSV header (names are case-insensitive)",
                columns.join(", ")
            ),
            Self::ModelError { .. } => {
                "Make sure --model points to a valid churn model JSON file".to_string()
            }
            Self::ProcessingError { .. } => "Inspect the input rows for unexpected values".to_string(),
            Self::ValidationError { .. } => "Adjust the input values to the allowed ranges".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            // 缺少欄位的訊息本身就是給使用者看的
            Self::MissingColumnsError { .. } => self.to_string(),
            _ => format!("Error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChurnError>;
