//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SIEVE: Emoji<'_, '_> = Emoji("🔎 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗      ██████╗  █████╗ ███╗   ██╗███████╗██╗███████╗████████╗
    ██║     ██╔═══██╗██╔══██╗████╗  ██║██╔════╝██║██╔════╝╚══██╔══╝
    ██║     ██║   ██║███████║██╔██╗ ██║███████╗██║█████╗     ██║
    ██║     ██║   ██║██╔══██║██║╚██╗██║╚════██║██║██╔══╝     ██║
    ███████╗╚██████╔╝██║  ██║██║ ╚████║███████║██║██║        ██║
    ╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝╚═╝╚═╝        ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("◆").magenta().bold(),
        style("Sift mortgage data: merge, filter, quality-check").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(60)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    data_dir: &Path,
    output_dir: &Path,
    source: &str,
    states: Option<&str>,
    conforming: Option<&str>,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Data:   {:<39}│",
        FOLDER,
        truncate_path(data_dir, 38)
    );
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_path(output_dir, 38)
    );
    println!(
        "    │  {} Source: {:<39}│",
        CHART,
        truncate_string(source, 38)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} State filter:      {:<27}│",
        SIEVE,
        style(truncate_string(states.unwrap_or("(none)"), 26)).yellow()
    );
    println!(
        "    │  {} Conforming flag:   {:<27}│",
        SIEVE,
        style(truncate_string(conforming.unwrap_or("(none)"), 26)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).magenta().bold(),
        style("▸").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("┄".repeat(54)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message for recoverable failures
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Loansift screening complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, threshold_info: Option<&str>) {
    let tally = style(count).yellow().bold();
    match threshold_info {
        Some(info) => println!("      {} {} {}", tally, description, style(info).dim()),
        None => println!("      {} {}", tally, description),
    }
}

/// Print the elapsed time of a pipeline step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("took {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    format!("...{}", &s[s.len() - max_len + 3..])
}
