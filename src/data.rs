//! CSV reading and the in-memory table produced from it

use crate::error::{FlowdiffError, Result};
use anyhow::Context;
use csv::{ByteRecord, ReaderBuilder, Trim};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse options forwarded to the CSV reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    /// Trim whitespace around headers and fields
    pub trim: bool,
    /// Accept records whose field count differs from the header
    pub flexible: bool,
    /// Keep only these columns, in this order
    pub columns: Option<Vec<String>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: false,
            flexible: false,
            columns: None,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn trimmed(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(self.flexible)
            .trim(if self.trim { Trim::All } else { Trim::None });
        builder
    }
}

/// Rows of string cells under named columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Frequency of each non-empty value in a column
    pub fn value_counts(&self, name: &str) -> Option<IndexMap<String, usize>> {
        self.column(name).map(|values| value_counts(values))
    }

    /// Stack tables in order.
    ///
    /// Columns are the union of all inputs in first-seen order; cells for a
    /// column a table lacks are left empty. Every row is kept.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let total_rows = tables.iter().map(Table::row_count).sum();
        let mut rows = Vec::with_capacity(total_rows);

        for table in tables {
            if table.columns == columns {
                rows.extend(table.rows);
                continue;
            }

            let positions: Vec<Option<usize>> =
                columns.iter().map(|c| table.column_index(c)).collect();
            for row in table.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|pos| pos.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                        .collect(),
                );
            }
        }

        Table { columns, rows }
    }
}

/// Count occurrences of each value, most frequent first.
///
/// Empty cells are skipped. Ties keep the order in which values first appeared.
pub fn value_counts<'a, I>(values: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Read a CSV file into a table, keeping at most `row_limit` data rows
pub fn read_csv(path: &Path, row_limit: Option<usize>, options: &CsvOptions) -> Result<Table> {
    let mut reader = options.reader_builder().from_path(path)?;
    let headers = unique_headers(reader.byte_headers()?.iter().map(decode).collect());

    let indices: Vec<usize> = match &options.columns {
        Some(wanted) => wanted
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| FlowdiffError::column_not_found(name.as_str(), path))
            })
            .collect::<Result<_>>()?,
        None => (0..headers.len()).collect(),
    };

    let columns = indices.iter().map(|&i| headers[i].clone()).collect();
    let mut rows = Vec::new();
    let mut record = ByteRecord::new();

    while row_limit.map_or(true, |limit| rows.len() < limit) && reader.read_byte_record(&mut record)? {
        rows.push(
            indices
                .iter()
                .map(|&i| record.get(i).map(decode).unwrap_or_default())
                .collect(),
        );
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(Table { columns, rows })
}

/// Column names from the header row only
pub fn read_header(path: &Path, options: &CsvOptions) -> Result<Vec<String>> {
    let mut reader = options.reader_builder().from_path(path)?;
    let headers = reader.byte_headers()?.iter().map(decode).collect();
    Ok(unique_headers(headers))
}

/// Rename repeated column names so every column stays addressable.
///
/// The first occurrence keeps its name; later ones become `name.1`,
/// `name.2`, ... skipping any suffix already taken by another column.
pub fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    let mut unique = Vec::with_capacity(headers.len());

    for name in headers {
        if seen.insert(name.clone()) {
            unique.push(name);
            continue;
        }

        let count = counts.entry(name.clone()).or_insert(0);
        let renamed = loop {
            *count += 1;
            let candidate = format!("{}.{}", name, count);
            if seen.insert(candidate.clone()) {
                break candidate;
            }
        };
        log::debug!("Repeated column '{}' renamed to '{}'", name, renamed);
        unique.push(renamed);
    }

    unique
}

/// Number of data rows, counted as lines minus the single header line.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. Quoted fields spanning
/// lines are counted per physical line. An empty file has zero data rows.
pub fn count_data_rows(path: &Path) -> Result<u64> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut lines: u64 = 0;
    let mut pending = false;
    let mut after_cr = false;

    loop {
        let buf = reader
            .fill_buf()
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if buf.is_empty() {
            break;
        }

        for &byte in buf {
            match byte {
                b'\n' if after_cr => after_cr = false,
                b'\n' => {
                    lines += 1;
                    pending = false;
                }
                b'\r' => {
                    lines += 1;
                    pending = false;
                    after_cr = true;
                }
                _ => {
                    pending = true;
                    after_cr = false;
                }
            }
        }

        let consumed = buf.len();
        reader.consume(consumed);
    }

    if pending {
        lines += 1;
    }

    Ok(lines.saturating_sub(1))
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
