//! Show or initialize configuration.

use uidrive_common::config::AppConfig;

pub fn run(config: AppConfig, init: bool) -> anyhow::Result<()> {
    if init {
        let defaults = AppConfig::default();
        defaults
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        println!("Wrote default configuration to {}", AppConfig::path().display());
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
