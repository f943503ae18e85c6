//! Spinner helpers using indicatif

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a pipeline step is in flight
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan.bold} {msg}")
            .unwrap()
            .tick_chars("◐◓◑◒·"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Stop a spinner and leave a success line behind
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", style("✔").green().bold(), message));
}

/// Stop a spinner and leave a warning line behind
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!(
        "{} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    ));
}
