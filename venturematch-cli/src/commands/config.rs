use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use shared::config::{ClientConfig, ConfigFormat};

/// Writes a default configuration in `format`.
///
/// # Errors
/// Returns an error if serializing or writing the file fails.
pub fn generate_config(format: ConfigFormat, output: Option<&Path>) -> Result<()> {
    let path = output.unwrap_or_else(|| Path::new(format.file_name()));
    let rendered = ClientConfig::with_defaults()
        .render(format)
        .context("failed to render configuration")?;
    fs::write(path, rendered)
        .with_context(|| format!("failed to write configuration to {}", path.display()))?;

    println!("Configuration file '{}' generated successfully.", path.display());
    Ok(())
}
