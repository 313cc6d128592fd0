use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FormConfig;
use crate::validation::ValidationRules;

/// signup-tui - A terminal account-creation form
#[derive(Parser, Debug)]
#[command(name = "signup-tui")]
#[command(about = "Account creation form with live credential validation")]
#[command(version)]
pub struct Cli {
    /// JSON file overriding the validation limits
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append logs to this file. Interactive runs are silent without it.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Username debounce window in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive form (default)
    Run,
    /// Run the validation pipeline once without a terminal UI
    Check {
        /// Username to validate
        #[arg(short, long)]
        username: String,
        /// Password to validate
        #[arg(short, long)]
        password: String,
        /// Password confirmation (defaults to the password)
        #[arg(short, long)]
        confirm: Option<String>,
    },
    /// Validate a configuration file
    ValidateConfig {
        /// Path to configuration file to validate
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Whether this invocation takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }

    /// Validation limits from `--config` and `--debounce-ms`, validated
    pub fn rules(&self) -> anyhow::Result<ValidationRules> {
        let mut config = match &self.config {
            Some(path) => FormConfig::load_from_file(path)?,
            None => FormConfig::default(),
        };
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        config.validate()?;
        Ok(config.rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the form)
        let result = Cli::try_parse_from(["signup-tui"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_cli_check_command() {
        let cli = Cli::try_parse_from([
            "signup-tui",
            "check",
            "--username",
            "alice123",
            "-p",
            "secretpw",
        ])
        .unwrap();
        assert!(!cli.is_interactive());
        assert_eq!(
            cli.command,
            Some(Commands::Check {
                username: "alice123".to_string(),
                password: "secretpw".to_string(),
                confirm: None,
            })
        );
    }

    #[test]
    fn test_cli_check_requires_username() {
        let result = Cli::try_parse_from(["signup-tui", "check", "--password", "secretpw"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_validate_config_command() {
        let cli = Cli::try_parse_from(["signup-tui", "validate-config", "/path/to/form.json"])
            .unwrap();
        match cli.command {
            Some(Commands::ValidateConfig { path }) => {
                assert_eq!(path.to_str().unwrap(), "/path/to/form.json");
            }
            _ => panic!("Expected ValidateConfig command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["signup-tui", "run", "--debounce-ms", "40"]).unwrap();
        assert_eq!(cli.debounce_ms, Some(40));
        assert_eq!(cli.rules().unwrap().debounce, Duration::from_millis(40));
    }

    #[test]
    fn test_rules_load_config_file() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(
            file.path(),
            r#"{ "username_min_len": 3, "username_max_len": 8, "debounce_ms": 20 }"#,
        )
        .expect("write");
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["signup-tui", "--config", path]).unwrap();
        let rules = cli.rules().unwrap();
        assert_eq!(rules.username_min_len, 3);
        assert_eq!(rules.username_max_len, 8);
        assert_eq!(rules.password_min_len, 8);
        assert_eq!(rules.debounce, Duration::from_millis(20));

        // The flag wins over the file
        let cli =
            Cli::try_parse_from(["signup-tui", "--config", path, "--debounce-ms", "70"]).unwrap();
        assert_eq!(cli.rules().unwrap().debounce, Duration::from_millis(70));
    }

    #[test]
    fn test_rules_reject_invalid_config_file() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), r#"{ "username_min_len": 0 }"#).expect("write");
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "signup-tui",
            "check",
            "-u",
            "alice123",
            "-p",
            "secretpw",
            "--config",
            path,
        ])
        .unwrap();
        let err = cli.rules().unwrap_err();
        assert!(err.to_string().contains("username_min_len"));
    }

    #[test]
    fn test_rules_reject_invalid_override() {
        let cli = Cli::try_parse_from(["signup-tui", "--debounce-ms", "60000"]).unwrap();
        assert!(cli.rules().is_err());
    }
}
