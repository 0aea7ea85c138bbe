//! CLI commands for data export
//!
//! Writes the dashboard report in one of several formats, or dumps the
//! whole enriched table for debugging.

use crate::cli::filter::FilterArgs;
use crate::cli::report::create_output;
use crate::error::DashboardResult;
use crate::export::{csv, json, yaml, ReportExport};
use crate::reports::DashboardReport;
use crate::services::{filter_sales, DateRange, DatasetCache};
use clap::{Args, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (every aggregate in one long table)
    Csv,
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Arguments of the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(
    cache: &mut DatasetCache,
    filter_args: &FilterArgs,
    args: ExportArgs,
) -> DashboardResult<()> {
    let year = cache.settings().year;
    let sales = cache.get()?;
    let filter = filter_args.resolve(sales, year)?;
    let filtered = filter_sales(sales, &filter);
    let period = DateRange::covering(&filtered);
    let report = DashboardReport::build(&filtered, filter);

    match &args.output {
        Some(path) => {
            let mut writer = create_output(path)?;
            write_report(&report, period, args.format, args.pretty, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, period, args.format, args.pretty, &mut writer)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &DashboardReport,
    period: Option<DateRange>,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> DashboardResult<()> {
    let export = ReportExport::new(report, period);
    match format {
        ExportFormat::Csv => csv::export_report_csv(report, writer),
        ExportFormat::Json => json::export_report_json(&export, writer, pretty),
        ExportFormat::Yaml => yaml::export_report_yaml(&export, writer),
    }
}

/// Handle the dump command: write the full enriched table, unfiltered
pub fn handle_dump_command(cache: &mut DatasetCache, path: &Path) -> DashboardResult<()> {
    let sales = cache.get()?;
    let mut writer = create_output(path)?;
    csv::export_enriched_csv(sales, &mut writer)?;
    println!("Dumped {} sales to: {}", sales.len(), path.display());
    Ok(())
}
