//! Command-line interface for flowdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowdiff")]
#[command(about = "Locate, load and compare the flow and ML variants of a CSV traffic dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset base directory (overrides the config file)
    #[arg(long, global = true)]
    pub base: Option<PathBuf>,

    /// JSON config file describing the dataset layout
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file for the dataset layout
    Init {
        /// Config file to create
        #[arg(default_value = "flowdiff.json")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show where each dataset variant was found and how large it is
    Summary {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Compare the flow and ML variants
    Compare {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// File used for the label distribution
        #[arg(long)]
        sample_file: Option<String>,

        /// Label column name (exact, including leading spaces)
        #[arg(long)]
        label_column: Option<String>,

        /// Hide progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Run directory discovery and print what was found
    Probe {
        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Load a single CSV file from a dataset variant
    Load {
        /// File name (matched case-insensitively if no exact match)
        file: String,

        /// Dataset variant: "flow" or "ml"
        #[arg(long, default_value = "ml")]
        variant: String,

        /// Read at most this many data rows
        #[arg(long)]
        rows: Option<usize>,

        /// Field delimiter (single byte)
        #[arg(long, default_value = ",", value_parser = validate_delimiter)]
        delimiter: u8,

        /// Comma-separated list of columns to keep
        #[arg(long)]
        columns: Option<String>,

        /// Number of rows to print after loading
        #[arg(long, default_value = "5")]
        preview: usize,
    },

    /// Load and concatenate every CSV file of a dataset variant
    LoadAll {
        /// Dataset variant: "flow" or "ml"
        #[arg(long, default_value = "ml")]
        variant: String,

        /// Read at most this many data rows from each file
        #[arg(long)]
        rows: Option<usize>,

        /// Field delimiter (single byte)
        #[arg(long, default_value = ",", value_parser = validate_delimiter)]
        delimiter: u8,

        /// Number of rows to print after loading
        #[arg(long, default_value = "5")]
        preview: usize,
    },
}

/// Parse output format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Split a comma-separated column list, keeping names verbatim
pub fn parse_column_list(s: &str) -> Vec<String> {
    s.split(',').map(|c| c.to_string()).filter(|c| !c.is_empty()).collect()
}

/// Validate that the delimiter is a single ASCII character
fn validate_delimiter(s: &str) -> Result<u8, String> {
    let delimiter = match s {
        "\\t" | "tab" => "\t",
        other => other,
    };

    match delimiter.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("Invalid delimiter: '{}'. Must be a single ASCII character.", s)),
    }
}
