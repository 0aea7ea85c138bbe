//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod filter;
pub mod report;

pub use export::{handle_dump_command, handle_export_command, ExportArgs, ExportFormat};
pub use filter::FilterArgs;
pub use report::{handle_report_command, ReportCommands};
