//! CLI commands for reports
//!
//! Every report command loads the (cached) enriched table, applies the
//! filter arguments and prints one view of the dashboard, or writes it as
//! CSV with `--output`.

use crate::cli::filter::FilterArgs;
use crate::display;
use crate::error::{DashboardError, DashboardResult};
use crate::export::export_enriched_csv;
use crate::reports::DashboardReport;
use crate::services::{filter_sales, product_options, DatasetCache};
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show total sales, total profit and average ticket
    Summary,

    /// Show sales and profit by day
    Daily {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show sales by supplier, overall and by day
    Suppliers {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the product ranking
    Products {
        /// Show top N products only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show paid versus outstanding sales and what is left to receive
    Payments {
        /// Export the outstanding sales to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the filtered sales with product and supplier details
    #[command(alias = "sales")]
    Data {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the product descriptions accepted by --product
    ProductOptions,
}

/// Handle report commands
pub fn handle_report_command(
    cache: &mut DatasetCache,
    filter_args: &FilterArgs,
    cmd: ReportCommands,
) -> DashboardResult<()> {
    let symbol = cache.settings().currency_symbol.clone();
    let year = cache.settings().year;
    let sales = cache.get()?;

    if let ReportCommands::ProductOptions = cmd {
        println!("{}", display::format_product_options(&product_options(sales)));
        return Ok(());
    }

    let filter = filter_args.resolve(sales, year)?;
    let filtered = filter_sales(sales, &filter);

    if let ReportCommands::Data { output } = &cmd {
        return match output {
            Some(path) => {
                let mut writer = create_output(path)?;
                export_enriched_csv(&filtered, &mut writer)?;
                println!("Sales exported to: {}", path.display());
                Ok(())
            }
            None => {
                println!("{}", display::format_sales(&filtered, &symbol));
                Ok(())
            }
        };
    }

    let report = DashboardReport::build(&filtered, filter);

    match cmd {
        ReportCommands::Summary => {
            println!("{}", display::format_summary(&report.summary, &symbol));
        }
        ReportCommands::Daily { output: Some(path) } => {
            report.daily.export_csv(&mut create_output(&path)?)?;
            println!("Daily report exported to: {}", path.display());
        }
        ReportCommands::Daily { output: None } => {
            println!("{}", display::format_daily(&report.daily, &symbol));
        }
        ReportCommands::Suppliers { output: Some(path) } => {
            report.suppliers.export_csv(&mut create_output(&path)?)?;
            println!("Supplier report exported to: {}", path.display());
        }
        ReportCommands::Suppliers { output: None } => {
            println!("{}", display::format_suppliers(&report.suppliers, &symbol));
        }
        ReportCommands::Products {
            output: Some(path), ..
        } => {
            report.products.export_csv(&mut create_output(&path)?)?;
            println!("Product report exported to: {}", path.display());
        }
        ReportCommands::Products { top, output: None } => {
            println!("{}", display::format_products(&report.products, top, &symbol));
        }
        ReportCommands::Payments { output: Some(path) } => {
            report.payments.export_csv(&mut create_output(&path)?)?;
            println!("Outstanding sales exported to: {}", path.display());
        }
        ReportCommands::Payments { output: None } => {
            println!("{}", display::format_payments(&report.payments, &symbol));
        }
        ReportCommands::Data { .. } | ReportCommands::ProductOptions => {}
    }

    Ok(())
}

/// Create an output file wrapped in a buffered writer
pub(crate) fn create_output(path: &Path) -> DashboardResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        DashboardError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
