use crate::core::{ConfigProvider, OutputFormat, Strategy};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_path, validate_positive_number, Validate,
};

pub const DEFAULT_PARTICIPANTS_FILE: &str = "current_employee.csv";
pub const DEFAULT_HISTORY_FILE: &str = "previous_employee.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "employee.csv";

/// 合併預設值、TOML 檔與命令列參數之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub participants_path: String,
    pub history_path: String,
    pub output_path: String,
    pub output_format: OutputFormat,
    pub strategy: Strategy,
    pub max_attempts: usize,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            participants_path: DEFAULT_PARTICIPANTS_FILE.to_string(),
            history_path: DEFAULT_HISTORY_FILE.to_string(),
            output_path: DEFAULT_OUTPUT_FILE.to_string(),
            output_format: OutputFormat::Csv,
            strategy: Strategy::Greedy,
            max_attempts: 1,
            seed: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn participants_path(&self) -> &str {
        &self.participants_path
    }

    fn history_path(&self) -> &str {
        &self.history_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("input.participants", &self.participants_path)?;
        validate_path("input.history", &self.history_path)?;
        validate_path("output.path", &self.output_path)?;
        validate_positive_number("assignment.max_attempts", self.max_attempts, 1)?;
        validate_distinct_paths("output.path", &self.output_path, &[&self.participants_path])?;
        Ok(())
    }
}
