use clap::{Parser, Subcommand};
use ocr_sheet_common::ScreenPoint;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ocr-sheet")]
#[command(about = "Select a screen region, OCR it, and append the text to a spreadsheet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Overrides shared by the commands that write to the workbook
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SheetTarget {
    /// Workbook file (default: from config)
    #[arg(short, long)]
    pub workbook: Option<PathBuf>,

    /// Sheet name (default: from config)
    #[arg(short, long)]
    pub sheet: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture the region between two screen points, OCR it, and write the text
    Run {
        /// First corner, as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: ScreenPoint,

        /// Opposite corner, as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: ScreenPoint,

        #[command(flatten)]
        target: SheetTarget,

        /// Write the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// OCR an existing image file and write the text
    Image {
        /// Image file (png/jpg)
        #[arg(required = true)]
        path: PathBuf,

        #[command(flatten)]
        target: SheetTarget,

        /// Write the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Write a text file into the sheet (rows on newline, cells on tab)
    Write {
        /// UTF-8 text file
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        target: SheetTarget,
    },

    /// Show or create the config file
    Config {
        /// Show the effective config
        #[arg(long)]
        show: bool,

        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
}

fn parse_point(s: &str) -> Result<ScreenPoint, String> {
    s.parse::<ScreenPoint>().map_err(|e| e.to_string())
}
