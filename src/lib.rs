//! # flowdiff
//!
//! Locates the CSV files of a network-traffic dataset shipped in two
//! representations (labelled flows with identifiers, and identifier-stripped
//! ML features), loads them, and reports how the two differ.

pub mod cli;
pub mod error;
pub mod config;
pub mod discovery;
pub mod data;
pub mod resolver;
pub mod compare;
pub mod commands;
pub mod output;
pub mod progress;

pub use config::{DatasetConfig, DatasetVariant};
pub use data::{CsvOptions, Table};
pub use discovery::{find_csv_directory, list_csv_files};
pub use error::{FlowdiffError, Result};
pub use resolver::DatasetResolver;
