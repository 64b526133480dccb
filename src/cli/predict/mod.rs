//! Predict command - classify a local table with the configured model

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::api::exoplanet::SUCCESS_MESSAGE;
use crate::api::types::ResponseEnvelope;
use crate::domain::BatchMode;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// CSV, XLSX or XLS file with one candidate per row
    #[arg(short, long)]
    pub file: PathBuf,

    /// Report failing rows inline instead of failing the whole file
    #[arg(long)]
    pub per_row: bool,
}

impl PredictArgs {
    fn mode(&self) -> BatchMode {
        if self.per_row {
            BatchMode::PerRow
        } else {
            BatchMode::AllOrNothing
        }
    }
}

/// Score the file and print the batch envelope to stdout
pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = super::load_config_for_command()?;
    let service = crate::create_prediction_service(&config)?;

    let filename = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .context("File path has no usable file name")?
        .to_string();
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;

    info!(file = %args.file.display(), bytes = content.len(), "Classifying file");

    let mode = args.mode();
    let batch = tokio::task::spawn_blocking(move || service.predict_batch(&filename, &content, mode))
        .await??;

    let envelope = ResponseEnvelope::batch(SUCCESS_MESSAGE, batch);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        let args = PredictArgs {
            file: PathBuf::from("koi.csv"),
            per_row: false,
        };
        assert_eq!(args.mode(), BatchMode::AllOrNothing);

        let args = PredictArgs {
            file: PathBuf::from("koi.csv"),
            per_row: true,
        };
        assert_eq!(args.mode(), BatchMode::PerRow);
    }
}
