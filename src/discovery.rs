//! Locating the directory that actually holds a variant's CSV files
//!
//! The dataset archives unpack either flat (`MachineLearningCSV/*.csv`) or
//! with one wrapper directory (`MachineLearningCSV/MachineLearningCVE/*.csv`).
//! Discovery looks at the base directory and its immediate children only;
//! deeper nesting is never searched, so the winner stays predictable when
//! several nested CSV sets exist.

use crate::config::{DatasetConfig, DatasetVariant};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension matched by discovery (`*.csv`, case-sensitive)
pub const CSV_EXTENSION: &str = ".csv";

/// Find the directory holding CSV files for a variant.
///
/// Returns `base` itself when it directly contains a `*.csv` file, otherwise
/// the first immediate subdirectory (in enumeration order) that does.
/// A missing base, or no match at either level, yields `None`.
pub fn find_csv_directory(base: &Path) -> Option<PathBuf> {
    if !base.is_dir() {
        log::debug!("Dataset directory does not exist: {}", base.display());
        return None;
    }

    if has_csv_files(base) {
        return Some(base.to_path_buf());
    }

    let found = WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        // is_dir() follows symlinks, so linked dataset folders count too
        .filter(|entry| entry.path().is_dir())
        .map(DirEntry::into_path)
        .find(|dir| has_csv_files(dir));

    match &found {
        Some(dir) => log::debug!("Found CSV directory {} under {}", dir.display(), base.display()),
        None => log::debug!("No CSV files under {}", base.display()),
    }

    found
}

/// Sorted list of the `*.csv` files directly inside `dir`
pub fn list_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    csv_entries(dir, true).map(DirEntry::into_path).collect()
}

/// Whether `dir` directly contains at least one `*.csv` file
pub fn has_csv_files(dir: &Path) -> bool {
    csv_entries(dir, false).next().is_some()
}

/// Whether a file name matches `*.csv`
pub fn is_csv_name(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(CSV_EXTENSION)
}

/// What discovery finds for both variants, for manual inspection
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryProbe {
    pub base_path: PathBuf,
    pub base_exists: bool,
    pub variants: Vec<ProbeEntry>,
    /// Where the configured sample file would live in the ML directory
    pub expected_sample: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeEntry {
    pub variant: DatasetVariant,
    pub searched: PathBuf,
    pub found: Option<PathBuf>,
    pub file_count: usize,
    /// First file by name
    pub sample: Option<String>,
}

/// Run discovery for both variants of `config`
pub fn probe(config: &DatasetConfig) -> DiscoveryProbe {
    let variants: Vec<ProbeEntry> = DatasetVariant::ALL
        .iter()
        .map(|&variant| {
            let searched = config.variant_base(variant);
            let found = find_csv_directory(&searched);
            let files = found.as_deref().map(list_csv_files).unwrap_or_default();
            ProbeEntry {
                variant,
                searched,
                found,
                file_count: files.len(),
                sample: files
                    .first()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string()),
            }
        })
        .collect();

    let expected_sample = variants
        .iter()
        .find(|entry| entry.variant == DatasetVariant::Ml)
        .and_then(|entry| entry.found.as_ref())
        .map(|dir| dir.join(&config.sample_file));

    DiscoveryProbe {
        base_path: config.base_path.clone(),
        base_exists: config.base_path.exists(),
        variants,
        expected_sample,
    }
}

fn csv_entries(dir: &Path, sorted: bool) -> impl Iterator<Item = DirEntry> {
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    let walker = if sorted { walker.sort_by_file_name() } else { walker };

    walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_csv_name(entry.file_name()) && entry.path().is_file())
}
