//! CLI module for the exoplanet classifier
//!
//! Provides subcommands:
//! - `serve`: HTTP inference service
//! - `predict`: classify a local CSV/Excel file and print the batch as JSON
//! - `inspect`: load the model artifact and print its description

pub mod inspect;
pub mod predict;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging::{init_logging, LoggingConfig};

/// Exoplanet classifier - disposition inference over a pre-trained model
#[derive(Parser)]
#[command(name = "exoplanet-classifier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP inference service
    Serve,

    /// Classify every row of a local CSV/Excel file
    Predict(predict::PredictArgs),

    /// Print the loaded model's features and classes
    Inspect,
}

/// Load configuration for a one-shot command, logging to stderr
fn load_config_for_command() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&LoggingConfig::from_app_config(&config));

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict_args() {
        let cli = Cli::try_parse_from([
            "exoplanet-classifier",
            "predict",
            "--file",
            "koi.csv",
            "--per-row",
        ])
        .unwrap();

        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.file.to_str(), Some("koi.csv"));
                assert!(args.per_row);
            }
            _ => panic!("expected predict command"),
        }
    }

    #[test]
    fn test_predict_requires_file() {
        assert!(Cli::try_parse_from(["exoplanet-classifier", "predict"]).is_err());
    }

    #[test]
    fn test_parse_serve_and_inspect() {
        let cli = Cli::try_parse_from(["exoplanet-classifier", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["exoplanet-classifier", "inspect"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect));
    }
}
