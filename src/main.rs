use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::cli::{
    handle_dump_command, handle_export_command, handle_report_command, ExportArgs, FilterArgs,
    ReportCommands,
};
use sales_dashboard::config::paths::DATA_DIR_ENV;
use sales_dashboard::config::{DashboardPaths, Settings};
use sales_dashboard::services::DatasetCache;

#[derive(Parser)]
#[command(
    name = "dashboard",
    author = "Kaylee Beyene",
    version,
    about = "Terminal sales dashboard",
    long_about = "Joins the sales, products and suppliers CSV files of a small shop \
                  and reports sales and profit by day, supplier and product, plus \
                  what is still to be received."
)]
struct Cli {
    /// Directory holding the source files and dashboard.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Export the report as CSV, JSON or YAML
    Export(ExportArgs),

    /// Write the full enriched table to a CSV file
    Dump {
        /// Output file path
        path: PathBuf,
    },

    /// Write a default dashboard.json to the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = DashboardPaths::resolve(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)
        .with_context(|| format!("Failed to load {}", paths.settings_file().display()))?;
    let sources = paths.sources(&settings);

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let mut cache = DatasetCache::new(sources, settings);
            handle_report_command(&mut cache, &cli.filter, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let mut cache = DatasetCache::new(sources, settings);
            handle_export_command(&mut cache, &cli.filter, args)?;
        }
        Some(Commands::Dump { path }) => {
            let mut cache = DatasetCache::new(sources, settings);
            handle_dump_command(&mut cache, &path)?;
        }
        Some(Commands::Init) => {
            if paths.settings_file().exists() {
                println!("Settings already exist at: {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
            println!();
            println!("Place the source files in {}:", paths.data_dir().display());
            for (kind, path) in sources.iter() {
                println!("  {:<10} {}", kind.to_string(), path.display());
            }
        }
        Some(Commands::Config) => {
            println!("Sales Dashboard Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Sources:");
            for (kind, path) in sources.iter() {
                let state = if path.exists() { "" } else { " (missing)" };
                println!("  {:<10} {}{}", kind.to_string(), path.display(), state);
            }
            println!();
            println!("Settings:");
            println!("  Year:              {}", settings.year);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Affirmative flags: {}", settings.affirmative_flags.join(", "));
        }
        None => {
            println!("Sales Dashboard - terminal sales reporting");
            println!();
            println!("Run 'dashboard --help' for usage information.");
            println!("Run 'dashboard summary' for the headline numbers.");
        }
    }

    Ok(())
}
