//! Loansift: HMDA Loan Data Screening CLI Tool
//!
//! A command-line tool that loads the paired loan and institution
//! datasets, merges them, optionally exports filtered JSON slices and
//! runs duplicate, missing-value and outlier quality checks.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use cli::{confirm_run, Cli, Source};
use pipeline::{
    builtin_schemas, display_store_stats, export_filtered, merged_view, DatasetStore,
    QualityChecker, JOIN_KEYS,
};
use report::{write_quality_report, QualitySummary};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_dir = cli.output_dir();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    let states_display = if cli.states.is_empty() {
        None
    } else {
        Some(cli.states.join(","))
    };
    print_config(
        &cli.data_dir,
        &output_dir,
        cli.source.as_str(),
        states_display.as_deref(),
        cli.conforming.as_deref(),
    );

    if !cli.no_confirm && !confirm_run(&output_dir)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load the typed datasets
    print_step_header(1, "Load Datasets");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading typed CSV tables...");
    let schemas = builtin_schemas();
    let store = DatasetStore::load(&cli.data_dir, &schemas)?;
    finish_with_success(&spinner, "Datasets loaded");

    display_store_stats(&store);
    print_step_time(step_start.elapsed());

    // Step 2: Merge loans onto their institutions
    print_step_header(2, "Merge Datasets");

    let step_start = Instant::now();
    let merged = merged_view(&store, cli.full_size)?;
    print_step_time(step_start.elapsed());

    // Step 3: Optional filtered JSON export
    if cli.wants_export() {
        print_step_header(3, "Export JSON Slice");

        let step_start = Instant::now();
        std::fs::create_dir_all(&output_dir)?;
        // Export failures leave the screening run intact
        match export_filtered(
            &merged,
            cli.state_filter(),
            cli.conforming.as_deref(),
            &output_dir,
        ) {
            Ok(path) => print_success(&format!("Exported to {}", path.display())),
            Err(e) => print_warning(&e.to_string()),
        }
        print_step_time(step_start.elapsed());
    }

    // Step 4: Quality checks on the selected source
    print_step_header(4, "Quality Checks");

    let step_start = Instant::now();
    let source_df = match cli.source {
        Source::Merged => merged.clone(),
        Source::Loans => store.table("loans")?.clone(),
        Source::Institutions => store.table("institutions")?.clone(),
    };
    let shape = source_df.shape();
    let mut checker = QualityChecker::new(source_df);

    // The institutions table has no sequence number; its natural key is
    // the respondent identity per year
    let duplicate_keys: Option<&[&str]> = match cli.source {
        Source::Institutions => Some(&JOIN_KEYS),
        _ => None,
    };

    let spinner = create_spinner("Scanning for duplicate keys...");
    let duplicates = checker.check_duplicate(duplicate_keys)?;
    if duplicates.is_clean() {
        finish_with_success(&spinner, "No duplicate keys found");
    } else {
        finish_with_warning(&spinner, "Duplicate keys found");
        print_count("distinct duplicated key(s)", duplicates.count(), None);
    }

    let spinner = create_spinner("Profiling missing values...");
    let missing = checker.check_missing_value(None)?;
    if missing.is_empty() {
        finish_with_success(&spinner, "No columns with missing values");
    } else {
        finish_with_success(
            &spinner,
            &format!("{} column(s) carry missing values", missing.len()),
        );
    }

    let spinner = create_spinner("Scanning numeric columns for outliers...");
    let outliers = checker.check_outlier(None)?;
    if outliers.is_empty() {
        finish_with_success(&spinner, "No outliers flagged");
    } else {
        finish_with_success(
            &spinner,
            &format!("{} column(s) carry outliers", outliers.len()),
        );
    }
    print_step_time(step_start.elapsed());

    // Step 5: Spreadsheet report
    if !cli.skip_report {
        print_step_header(5, "Write Quality Report");

        let step_start = Instant::now();
        if checker.report().has_reportable_results() {
            std::fs::create_dir_all(&output_dir)?;
            let path = write_quality_report(checker.report(), &output_dir)?;
            print_success(&format!("Report written to {}", path.display()));
        } else {
            print_info("All checks came back clean; nothing to report");
        }
        print_step_time(step_start.elapsed());
    }

    // Display summary
    let summary = QualitySummary::new(cli.source.as_str(), shape, checker.report());
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}
