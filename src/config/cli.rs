use crate::config::settings::Settings;
use crate::config::toml_config::TomlConfig;
use crate::core::{OutputFormat, Strategy};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Assign secret santa recipients without repeating last round's pairings")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Participants CSV (Employee_Name, Employee_EmailID)
    #[arg(long)]
    pub participants: Option<String>,

    /// Previous round's assignments CSV; a missing file means no history
    #[arg(long)]
    pub history: Option<String>,

    /// Where to write the new assignments
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Reshuffle and retry up to this many times when a giver is stranded
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Fixed shuffle seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the pairings to stdout without writing the output file.
    /// A normal run keeps them secret: they only go to the output file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 預設值 < TOML 檔 < 命令列參數
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.to_settings()
            }
            None => Settings::default(),
        };
        self.apply_to(&mut settings);
        Ok(settings)
    }

    fn apply_to(&self, settings: &mut Settings) {
        if let Some(participants) = &self.participants {
            settings.participants_path = participants.clone();
        }
        if let Some(history) = &self.history {
            settings.history_path = history.clone();
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        if let Some(format) = self.format {
            settings.output_format = format;
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::try_parse_from(["secret-santa"]).unwrap();

        assert_eq!(cli.resolve().unwrap(), Settings::default());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags_parse() {
        let cli = CliConfig::try_parse_from([
            "secret-santa",
            "--participants",
            "team.csv",
            "--strategy",
            "matching",
            "--format",
            "json",
            "--seed",
            "5",
            "--dry-run",
        ])
        .unwrap();

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.participants_path, "team.csv");
        assert_eq!(settings.strategy, Strategy::Matching);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.seed, Some(5));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[output]
path = "from-file.csv"

[assignment]
max_attempts = 10
seed = 1
"#,
            )
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "secret-santa",
            "--config",
            config_path.as_str(),
            "--max-attempts",
            "2",
        ])
        .unwrap();

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.output_path, "from-file.csv");
        assert_eq!(settings.max_attempts, 2);
        assert_eq!(settings.seed, Some(1));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(CliConfig::try_parse_from(["secret-santa", "--strategy", "random"]).is_err());
    }

    #[test]
    fn test_dry_run_help_says_where_pairings_go() {
        use clap::CommandFactory;

        let command = CliConfig::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "dry_run")
            .and_then(|arg| arg.get_long_help().or(arg.get_help()))
            .map(|help| help.to_string())
            .unwrap_or_default();

        assert!(help.contains("stdout"));
        assert!(help.contains("output file"));
    }
}
