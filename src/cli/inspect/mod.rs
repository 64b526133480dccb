//! Inspect command - print the model contract

/// Load the configured artifact and print its description as JSON
pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config_for_command()?;
    let service = crate::create_prediction_service(&config)?;

    println!("{}", serde_json::to_string_pretty(&service.model_info())?);

    Ok(())
}
