//! Structural comparison of the flow and ML dataset directories

use crate::config::{DatasetConfig, DatasetVariant};
use crate::data::{self, CsvOptions};
use crate::discovery::list_csv_files;
use crate::error::{FlowdiffError, Result};
use crate::progress::ProgressReporter;
use crate::resolver::{file_name, DatasetResolver};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What to compare beyond the file structure
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// File whose label distribution is reported
    pub sample_file: String,
    /// Column holding the traffic label
    pub label_column: String,
    pub csv: CsvOptions,
}

impl CompareOptions {
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self {
            sample_file: config.sample_file.clone(),
            label_column: config.label_column.clone(),
            csv: CsvOptions::default(),
        }
    }
}

/// A column together with its 1-based position in its own header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnPosition {
    pub position: usize,
    pub name: String,
}

/// Header-level comparison of one flow file against one ML file
#[derive(Debug, Clone, Serialize)]
pub struct ColumnComparison {
    pub flow_columns: Vec<String>,
    pub ml_columns: Vec<String>,
    /// Columns only in the flow header, sorted by name
    pub flow_only: Vec<ColumnPosition>,
    /// Columns only in the ML header, sorted by name
    pub ml_only: Vec<ColumnPosition>,
    /// Number of distinct names present in both
    pub common: usize,
    /// Number of distinct names present in either
    pub union: usize,
}

impl ColumnComparison {
    pub fn new(flow_columns: Vec<String>, ml_columns: Vec<String>) -> Self {
        let flow_set: BTreeSet<&str> = flow_columns.iter().map(String::as_str).collect();
        let ml_set: BTreeSet<&str> = ml_columns.iter().map(String::as_str).collect();

        let flow_only = positions(flow_set.difference(&ml_set).copied(), &flow_columns);
        let ml_only = positions(ml_set.difference(&flow_set).copied(), &ml_columns);
        let common = flow_set.intersection(&ml_set).count();
        let union = flow_set.union(&ml_set).count();

        Self {
            flow_columns,
            ml_columns,
            flow_only,
            ml_only,
            common,
            union,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.flow_only.is_empty() && self.ml_only.is_empty()
    }
}

fn positions<'a>(names: impl Iterator<Item = &'a str>, header: &[String]) -> Vec<ColumnPosition> {
    names
        .filter_map(|name| {
            header
                .iter()
                .position(|c| c == name)
                .map(|idx| ColumnPosition {
                    position: idx + 1,
                    name: name.to_string(),
                })
        })
        .collect()
}

/// Data row counts of a file present in both directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCountComparison {
    pub file: String,
    pub flow_rows: u64,
    pub ml_rows: u64,
}

impl RowCountComparison {
    pub fn is_match(&self) -> bool {
        self.flow_rows == self.ml_rows
    }

    /// Signed flow minus ML difference
    pub fn difference(&self) -> i64 {
        self.flow_rows as i64 - self.ml_rows as i64
    }

    pub fn abs_difference(&self) -> u64 {
        self.flow_rows.abs_diff(self.ml_rows)
    }

    /// Flow rows per ML row; `None` when the ML file has no data rows
    pub fn ratio(&self) -> Option<f64> {
        (self.ml_rows > 0).then(|| self.flow_rows as f64 / self.ml_rows as f64)
    }
}

/// Label frequencies of the sample file in both variants
#[derive(Debug, Clone, Serialize)]
pub struct LabelDistribution {
    pub file: String,
    pub column: String,
    pub flow: IndexMap<String, usize>,
    pub ml: IndexMap<String, usize>,
}

/// Everything the comparison report shows
#[derive(Debug, Clone, Serialize)]
pub struct DatasetComparison {
    pub generated_at: DateTime<Utc>,
    pub flow_dir: PathBuf,
    pub ml_dir: PathBuf,
    pub flow_file_count: usize,
    pub ml_file_count: usize,
    /// Header comparison of the first file on each side
    pub columns: Option<ColumnComparison>,
    /// One entry per flow file that also exists on the ML side
    pub row_counts: Vec<RowCountComparison>,
    /// Present only when the sample file exists on both sides
    pub labels: Option<LabelDistribution>,
}

impl DatasetComparison {
    pub fn mismatches(&self) -> impl Iterator<Item = &RowCountComparison> {
        self.row_counts.iter().filter(|r| !r.is_match())
    }

    pub fn has_mismatches(&self) -> bool {
        self.mismatches().next().is_some()
    }
}

/// Resolve both variant directories under `config` and compare them
pub fn run_comparison(config: &DatasetConfig, show_progress: bool) -> Result<DatasetComparison> {
    let resolver = DatasetResolver::new(config.clone());
    let flow_dir = required_dir(&resolver, DatasetVariant::Flow)?;
    let ml_dir = required_dir(&resolver, DatasetVariant::Ml)?;

    let mut progress = if show_progress {
        ProgressReporter::new_for_comparison(resolver.list_files(DatasetVariant::Flow).len() as u64)
    } else {
        ProgressReporter::new_minimal()
    };

    compare_datasets_with_progress(
        flow_dir,
        ml_dir,
        &CompareOptions::from_config(config),
        &mut progress,
    )
}

fn required_dir(resolver: &DatasetResolver, variant: DatasetVariant) -> Result<&Path> {
    resolver.resolved_dir(variant).ok_or_else(|| {
        FlowdiffError::config(format!(
            "No CSV files found for the {} dataset (searched: {})",
            variant,
            resolver.variant(variant).base.display()
        ))
    })
}

/// Compare two directories of CSV files
pub fn compare_datasets(flow_dir: &Path, ml_dir: &Path, options: &CompareOptions) -> Result<DatasetComparison> {
    compare_datasets_with_progress(flow_dir, ml_dir, options, &mut ProgressReporter::new_minimal())
}

pub fn compare_datasets_with_progress(
    flow_dir: &Path,
    ml_dir: &Path,
    options: &CompareOptions,
    progress: &mut ProgressReporter,
) -> Result<DatasetComparison> {
    let flow_files = list_csv_files(flow_dir);
    let ml_files = list_csv_files(ml_dir);
    log::info!(
        "Comparing {} flow files against {} ML files",
        flow_files.len(),
        ml_files.len()
    );

    let columns = match (flow_files.first(), ml_files.first()) {
        (Some(flow), Some(ml)) => Some(ColumnComparison::new(
            data::read_header(flow, &options.csv)?,
            data::read_header(ml, &options.csv)?,
        )),
        _ => None,
    };
    progress.finish_headers("Headers compared");

    let mut row_counts = Vec::new();
    for flow_file in &flow_files {
        let name = file_name(flow_file);
        progress.update_rows(&name);

        let ml_file = ml_dir.join(&name);
        if !ml_file.exists() {
            log::debug!("{} has no ML counterpart", name);
            continue;
        }

        row_counts.push(RowCountComparison {
            file: name,
            flow_rows: data::count_data_rows(flow_file)?,
            ml_rows: data::count_data_rows(&ml_file)?,
        });
    }
    progress.finish_rows("Rows counted");

    let labels = label_distribution(flow_dir, ml_dir, options, progress)?;

    Ok(DatasetComparison {
        generated_at: Utc::now(),
        flow_dir: flow_dir.to_path_buf(),
        ml_dir: ml_dir.to_path_buf(),
        flow_file_count: flow_files.len(),
        ml_file_count: ml_files.len(),
        columns,
        row_counts,
        labels,
    })
}

fn label_distribution(
    flow_dir: &Path,
    ml_dir: &Path,
    options: &CompareOptions,
    progress: &mut ProgressReporter,
) -> Result<Option<LabelDistribution>> {
    let flow_path = flow_dir.join(&options.sample_file);
    let ml_path = ml_dir.join(&options.sample_file);

    if !flow_path.exists() || !ml_path.exists() {
        log::info!(
            "Sample file {} missing on one side, skipping label distribution",
            options.sample_file
        );
        return Ok(None);
    }

    progress.start_labels(&options.sample_file);
    let csv = options.csv.clone().with_columns([options.label_column.as_str()]);
    let flow = data::read_csv(&flow_path, None, &csv)?;
    let ml = data::read_csv(&ml_path, None, &csv)?;
    progress.finish_labels("Labels counted");

    Ok(Some(LabelDistribution {
        file: options.sample_file.clone(),
        column: options.label_column.clone(),
        flow: flow.value_counts(&options.label_column).unwrap_or_default(),
        ml: ml.value_counts(&options.label_column).unwrap_or_default(),
    }))
}
