use crate::config::settings::Settings;
use crate::core::{OutputFormat, Strategy};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub assignment: AssignmentConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    pub participants: Option<String>,
    pub history: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentConfig {
    pub strategy: Option<Strategy>,
    pub max_attempts: Option<usize>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SantaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SantaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SANTA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SantaError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 只覆蓋檔案中有寫的欄位
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(participants) = &self.input.participants {
            settings.participants_path = participants.clone();
        }
        if let Some(history) = &self.input.history {
            settings.history_path = history.clone();
        }
        if let Some(path) = &self.output.path {
            settings.output_path = path.clone();
        }
        if let Some(format) = self.output.format {
            settings.output_format = format;
        }
        if let Some(strategy) = self.assignment.strategy {
            settings.strategy = strategy;
        }
        if let Some(max_attempts) = self.assignment.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if self.assignment.seed.is_some() {
            settings.seed = self.assignment.seed;
        }
    }

    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();
        self.apply_to(&mut settings);
        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings().validate()
    }
}
