//! Quality run summary display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::quality::{DuplicateCheck, QualityReport};

/// Terminal summary of one quality-check run
#[derive(Debug)]
pub struct QualitySummary {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub report: QualityReport,
}

impl QualitySummary {
    pub fn new(source: &str, shape: (usize, usize), report: &QualityReport) -> Self {
        Self {
            source: source.to_string(),
            rows: shape.0,
            columns: shape.1,
            report: report.clone(),
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("QUALITY SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Check").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Source"),
            Cell::new(format!(
                "{} ({} rows, {} columns)",
                self.source, self.rows, self.columns
            )),
        ]);

        let duplicates = match &self.report.duplicates {
            None => Cell::new("not checked").fg(Color::White),
            Some(DuplicateCheck::Clean) => Cell::new("no duplicates").fg(Color::Green),
            Some(found) => Cell::new(format!("{} duplicate key(s)", found.count()))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![Cell::new("🔑 Duplicate keys"), duplicates]);

        table.add_row(vec![
            Cell::new("🕳️  Missing values"),
            profile_cell(&self.report.missing_values),
        ]);
        table.add_row(vec![
            Cell::new("📈 Outliers"),
            profile_cell(&self.report.outliers),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if self.report.has_reportable_results() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("TOP FINDINGS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            if let Some(DuplicateCheck::Found { keys, .. }) = &self.report.duplicates {
                println!();
                println!(
                    "      {} {}:",
                    style("Duplicate keys").yellow(),
                    style(format!("({})", keys.len())).dim()
                );
                for key in keys.iter().take(5) {
                    println!("        {} {}", style("•").dim(), key.join(", "));
                }
                if keys.len() > 5 {
                    println!("        {} {} more", style("…").dim(), keys.len() - 5);
                }
            }

            list_profile("Missing values (%)", &self.report.missing_values);
            list_profile("Outliers (%)", &self.report.outliers);
        }
    }
}

fn profile_cell(profile: &Option<Vec<(String, f64)>>) -> Cell {
    match profile {
        None => Cell::new("not checked").fg(Color::White),
        Some(entries) if entries.is_empty() => Cell::new("none flagged").fg(Color::Green),
        Some(entries) => Cell::new(format!("{} column(s) flagged", entries.len()))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn list_profile(title: &str, profile: &Option<Vec<(String, f64)>>) {
    let Some(entries) = profile else {
        return;
    };
    if entries.is_empty() {
        return;
    }

    println!();
    println!(
        "      {} {}:",
        style(title).yellow(),
        style(format!("({})", entries.len())).dim()
    );
    for (name, pct) in entries.iter().take(5) {
        println!("        {} {}: {:.2}", style("•").dim(), name, pct);
    }
    if entries.len() > 5 {
        println!(
            "        {} {} more column(s)",
            style("…").dim(),
            entries.len() - 5
        );
    }
}
