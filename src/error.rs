//! Error types for flowdiff operations

use crate::config::DatasetVariant;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowdiffError>;

#[derive(Error, Debug)]
pub enum FlowdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "File '{filename}' not found in {variant} dataset. Available files: [{}]",
        .available.join(", ")
    )]
    FileNotFound {
        filename: String,
        variant: DatasetVariant,
        available: Vec<String>,
    },

    #[error("No files found in {variant} dataset")]
    EmptyDataset { variant: DatasetVariant },

    #[error("Column '{column}' not found in {}", .path.display())]
    ColumnNotFound { column: String, path: PathBuf },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl FlowdiffError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            path: path.into(),
        }
    }
}
