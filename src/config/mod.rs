pub mod cli;
pub mod lambda;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::MissingColumnPolicy;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "s3-csv-cleaner")]
#[command(about = "Increments the Age column of a CSV file and writes the cleaned copy")]
pub struct CliConfig {
    /// CSV file to clean
    #[arg(long)]
    pub input: String,

    /// Directory the cleaned copy is written under
    #[arg(long, default_value = "./output")]
    pub output_dir: String,

    /// Prefix prepended to the object key on write
    #[arg(long, default_value = "cleaned/")]
    pub output_prefix: String,

    /// Column holding the ages to increment
    #[arg(long, default_value = "Age")]
    pub age_column: String,

    /// Behavior when the age column is absent from the input
    #[arg(long, value_enum, default_value = "skip")]
    pub missing_column_policy: MissingColumnPolicy,

    /// Upper bound for a single read or write, in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn age_column(&self) -> &str {
        &self.age_column
    }

    fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    fn missing_column_policy(&self) -> MissingColumnPolicy {
        self.missing_column_policy
    }

    fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extensions("input", std::slice::from_ref(&self.input), &["csv"])?;
        validate_non_empty_string("output_dir", &self.output_dir)?;
        validate_non_empty_string("age_column", &self.age_column)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 900)?;

        tracing::info!("✅ CLI configuration validation passed");
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            input: "people.csv".to_string(),
            output_dir: "./output".to_string(),
            output_prefix: "cleaned/".to_string(),
            age_column: "Age".to_string(),
            missing_column_policy: MissingColumnPolicy::Skip,
            timeout_secs: 30,
            verbose: false,
        }
    }

    #[test]
    fn test_cli_config_validation_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_cli_config_rejects_non_csv_input() {
        let config = CliConfig {
            input: "people.parquet".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_config_rejects_zero_timeout() {
        let config = CliConfig {
            timeout_secs: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_config_rejects_blank_age_column() {
        let config = CliConfig {
            age_column: "   ".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parsing_with_defaults() {
        let config =
            CliConfig::try_parse_from(["s3-csv-cleaner", "--input", "people.csv"]).unwrap();

        assert_eq!(config.input, "people.csv");
        assert_eq!(config.output_dir, "./output");
        assert_eq!(config.output_prefix, "cleaned/");
        assert_eq!(config.age_column, "Age");
        assert_eq!(config.missing_column_policy, MissingColumnPolicy::Skip);
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_parsing_with_overrides() {
        let config = CliConfig::try_parse_from([
            "s3-csv-cleaner",
            "--input",
            "data/people.csv",
            "--output-dir",
            "/tmp/cleaned",
            "--age-column",
            "age",
            "--missing-column-policy",
            "fail",
            "--timeout-secs",
            "120",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(config.output_dir, "/tmp/cleaned");
        assert_eq!(config.age_column, "age");
        assert_eq!(config.missing_column_policy, MissingColumnPolicy::Fail);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.verbose);
    }
}
