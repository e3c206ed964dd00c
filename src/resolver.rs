//! Dataset resolution: which directory holds each variant, which files it
//! has, and convenience loaders on top

use crate::config::{DatasetConfig, DatasetVariant};
use crate::data::{self, CsvOptions, Table};
use crate::discovery::{find_csv_directory, list_csv_files};
use crate::error::{FlowdiffError, Result};
use crate::output::format_count;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Discovery result for one variant, captured once
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    pub variant: DatasetVariant,
    /// Directory that was searched (`<base>/<variant dir>`)
    pub base: PathBuf,
    /// Directory actually holding the CSV files, if any
    pub dir: Option<PathBuf>,
    /// CSV files in `dir`, sorted by name
    pub files: Vec<PathBuf>,
}

impl ResolvedVariant {
    fn discover(config: &DatasetConfig, variant: DatasetVariant) -> Self {
        let base = config.variant_base(variant);
        let dir = find_csv_directory(&base);
        let files = dir.as_deref().map(list_csv_files).unwrap_or_default();

        log::debug!(
            "{} dataset: base={} resolved={:?} files={}",
            variant,
            base.display(),
            dir,
            files.len()
        );

        Self {
            variant,
            base,
            dir,
            files,
        }
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|p| file_name(p)).collect()
    }
}

/// Resolves both dataset variants under a base directory.
///
/// The filesystem is inspected once at construction; later changes on disk
/// are not picked up.
#[derive(Debug, Clone)]
pub struct DatasetResolver {
    config: DatasetConfig,
    flow: ResolvedVariant,
    ml: ResolvedVariant,
}

impl DatasetResolver {
    pub fn new(config: DatasetConfig) -> Self {
        let flow = ResolvedVariant::discover(&config, DatasetVariant::Flow);
        let ml = ResolvedVariant::discover(&config, DatasetVariant::Ml);
        Self { config, flow, ml }
    }

    /// Resolver for the default layout under `base_path`
    pub fn from_base(base_path: impl Into<PathBuf>) -> Self {
        Self::new(DatasetConfig::with_base(base_path))
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn variant(&self, variant: DatasetVariant) -> &ResolvedVariant {
        match variant {
            DatasetVariant::Flow => &self.flow,
            DatasetVariant::Ml => &self.ml,
        }
    }

    /// Directory holding the variant's CSVs, if discovery found one
    pub fn resolved_dir(&self, variant: DatasetVariant) -> Option<&Path> {
        self.variant(variant).dir.as_deref()
    }

    /// Sorted CSV files of a variant (empty when unresolved)
    pub fn list_files(&self, variant: DatasetVariant) -> &[PathBuf] {
        &self.variant(variant).files
    }

    /// Locate a file by name: exact match first, then case-insensitive
    pub fn resolve_file(&self, filename: &str, variant: DatasetVariant) -> Option<PathBuf> {
        let resolved = self.variant(variant);
        let dir = resolved.dir.as_ref()?;

        let exact = dir.join(filename);
        if exact.exists() {
            return Some(exact);
        }

        let wanted = filename.to_lowercase();
        resolved
            .files
            .iter()
            .find(|path| file_name(path).to_lowercase() == wanted)
            .cloned()
    }

    /// Load one file of a variant, reading at most `row_limit` rows
    pub fn load_file(
        &self,
        filename: &str,
        variant: DatasetVariant,
        row_limit: Option<usize>,
        options: &CsvOptions,
    ) -> Result<Table> {
        let path = self
            .resolve_file(filename, variant)
            .ok_or_else(|| FlowdiffError::FileNotFound {
                filename: filename.to_string(),
                variant,
                available: self.variant(variant).file_names(),
            })?;

        println!("Loading: {}", file_name(&path));
        println!("  {}", reading_message(row_limit));

        let table = data::read_csv(&path, row_limit, options)?;
        println!(
            "  ✓ Loaded {} rows × {} columns",
            format_count(table.row_count() as u64),
            table.column_count()
        );

        Ok(table)
    }

    /// Load every file of a variant in name order and stack them
    pub fn load_all_files(
        &self,
        variant: DatasetVariant,
        row_limit: Option<usize>,
        options: &CsvOptions,
    ) -> Result<Table> {
        let files = self.list_files(variant);
        if files.is_empty() {
            return Err(FlowdiffError::EmptyDataset { variant });
        }

        println!("Loading {} files from {} dataset...", files.len(), variant);

        let mut tables = Vec::with_capacity(files.len());
        for path in files {
            println!("\n  Processing: {}", file_name(path));
            let table = data::read_csv(path, row_limit, options)?;
            println!("    ✓ {} rows", format_count(table.row_count() as u64));
            tables.push(table);
        }

        let combined = Table::concat(tables);
        println!(
            "\n✓ Combined dataset: {} rows × {} columns",
            format_count(combined.row_count() as u64),
            combined.column_count()
        );

        Ok(combined)
    }

    /// Existence, resolved paths and file sizes for both variants
    pub fn summary(&self) -> Result<DatasetSummary> {
        let variants = DatasetVariant::ALL
            .iter()
            .map(|&v| VariantSummary::collect(self.variant(v)))
            .collect::<Result<Vec<_>>>()?;

        Ok(DatasetSummary {
            base_path: self.config.base_path.clone(),
            base_exists: self.config.base_path.exists(),
            variants,
        })
    }
}

/// Snapshot of the dataset layout for reporting
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub base_path: PathBuf,
    pub base_exists: bool,
    pub variants: Vec<VariantSummary>,
}

impl DatasetSummary {
    pub fn variant(&self, variant: DatasetVariant) -> Option<&VariantSummary> {
        self.variants.iter().find(|v| v.variant == variant)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantSummary {
    pub variant: DatasetVariant,
    pub searched: PathBuf,
    pub resolved: Option<PathBuf>,
    pub files: Vec<FileEntry>,
    pub total_bytes: u64,
}

impl VariantSummary {
    fn collect(resolved: &ResolvedVariant) -> Result<Self> {
        let files = resolved
            .files
            .iter()
            .map(|path| -> Result<FileEntry> {
                Ok(FileEntry {
                    name: file_name(path),
                    size_bytes: fs::metadata(path)
                        .with_context(|| format!("Cannot read size of {}", path.display()))?
                        .len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let total_bytes = files.iter().map(|f| f.size_bytes).sum();

        Ok(Self {
            variant: resolved.variant,
            searched: resolved.base.clone(),
            resolved: resolved.dir.clone(),
            files,
            total_bytes,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size_bytes: u64,
}

/// Progress line shown before a file is read; a zero limit reads as "all rows"
fn reading_message(row_limit: Option<usize>) -> String {
    match row_limit {
        Some(limit) if limit > 0 => format!("Reading first {} rows...", format_count(limit as u64)),
        _ => "Reading all rows...".to_string(),
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
