//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;

/// Ask a yes/no question, defaulting to yes on a plain Enter
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(true)
        .show_default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt before any artifacts are written to the output directory
pub fn confirm_run(output_dir: &Path) -> Result<bool> {
    let message = format!(
        "Write exports and reports under '{}'?",
        output_dir.display()
    );
    confirm_step(&message)
}
