use crate::core::assigner::AssignError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("Assignment failed: {0}")]
    AssignmentError(#[from] AssignError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input in {file} (line {line}): {message}")]
    InputError {
        file: String,
        line: u64,
        message: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Assignment,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::AssignmentError(_) => ErrorCategory::Assignment,
            SantaError::CsvError(_)
            | SantaError::InputError { .. }
            | SantaError::ValidationError { .. } => ErrorCategory::Input,
            SantaError::ConfigError { .. }
            | SantaError::ConfigValidationError { .. }
            | SantaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SantaError::IoError(_) | SantaError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 換一次洗牌就可能成功
            SantaError::AssignmentError(AssignError::Stranded { .. }) => ErrorSeverity::Medium,
            SantaError::AssignmentError(AssignError::EmptyRoster) => ErrorSeverity::High,
            SantaError::IoError(_) | SantaError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 判斷錯誤是否可透過重新執行解決
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SantaError::AssignmentError(AssignError::Stranded { .. }) => {
                "Run again for a fresh shuffle, raise --max-attempts, or use --strategy matching"
                    .to_string()
            }
            SantaError::AssignmentError(AssignError::EmptyRoster) => {
                "Add at least two participants to the participants file".to_string()
            }
            SantaError::CsvError(_) | SantaError::InputError { .. } => {
                "Check that the CSV has the expected header columns and no empty id or name fields"
                    .to_string()
            }
            SantaError::ValidationError { .. } => "Fix the input data and try again".to_string(),
            SantaError::ConfigError { .. }
            | SantaError::ConfigValidationError { .. }
            | SantaError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the TOML configuration file".to_string()
            }
            SantaError::IoError(_) => {
                "Check that the file paths exist and are readable/writable".to_string()
            }
            SantaError::SerializationError(_) => {
                "Try the csv output format instead".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SantaError::AssignmentError(AssignError::Stranded { giver_name, giver_id }) => {
                format!(
                    "Could not find a valid recipient for {} <{}>",
                    giver_name, giver_id
                )
            }
            SantaError::AssignmentError(AssignError::EmptyRoster) => {
                "The participants file contains no participants".to_string()
            }
            SantaError::InputError { file, line, message } => {
                format!("Problem in '{}' at line {}: {}", file, line, message)
            }
            SantaError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
