//! Output formatting utilities

use crate::compare::{ColumnPosition, DatasetComparison, LabelDistribution};
use crate::config::DatasetVariant;
use crate::data::Table;
use crate::discovery::DiscoveryProbe;
use crate::error::Result;
use crate::resolver::DatasetSummary;
use indexmap::IndexMap;
use serde::Serialize;

const WIDTH: usize = 80;

const RECOMMENDATION: &str = "\
The two datasets represent different formats of the CICIDS2017 dataset:

1. GeneratedLabelledFlows (85 columns):
   - Full flow records including identifiers
   - Flow ID, Source IP, Source Port, Destination IP, Protocol, Timestamp
   - Suited to network analysis and flow tracking
   - Raw labelled flows as produced by the traffic analyser

2. MachineLearningCSV/MachineLearningCVE (79 columns):
   - Preprocessed for machine learning
   - Identifying fields (IPs, ports, timestamps) removed
   - Statistical flow features only
   - Privacy-preserving (no IP addresses)
   - Ready for model training

RECOMMENDATION:
- Use GeneratedLabelledFlows when complete flow information is needed
- Use MachineLearningCSV/MachineLearningCVE for model training
- The MachineLearningCSV version is the standard for ML-based intrusion detection

NOTE: the Thursday-WorkingHours-Morning-WebAttacks file has different row counts,
suggesting data cleaning or filtering in the ML version.";

/// Line-oriented text buffer for the console reports
#[derive(Debug, Default)]
struct Report {
    lines: Vec<String>,
}

impl Report {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn rule(&mut self, ch: char) {
        self.lines.push(ch.to_string().repeat(WIDTH));
    }

    fn banner(&mut self, title: &str) {
        self.rule('=');
        self.line(title);
        self.rule('=');
    }

    fn section(&mut self, title: &str) {
        self.line(title);
        self.rule('-');
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Pretty printer for flowdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the dataset layout summary
    pub fn print_summary(summary: &DatasetSummary) {
        print!("{}", Self::render_summary(summary));
    }

    /// Print the comparison report
    pub fn print_comparison(comparison: &DatasetComparison) {
        print!("{}", Self::render_comparison(comparison));
    }

    /// Print the discovery probe results
    pub fn print_probe(probe: &DiscoveryProbe) {
        print!("{}", Self::render_probe(probe));
    }

    /// Print the first `limit` rows of a table
    pub fn print_table(table: &Table, limit: usize) {
        print!("{}", Self::render_table(table, limit));
    }

    pub fn render_summary(summary: &DatasetSummary) -> String {
        let mut r = Report::default();
        r.banner("CICIDS2017 DATASET CONFIGURATION");
        r.blank();
        r.line(format!("Base directory: {}", summary.base_path.display()));
        r.line(format!("Exists: {}", check_mark(summary.base_exists)));

        for variant in &summary.variants {
            let title = match variant.variant {
                DatasetVariant::Flow => "GeneratedLabelledFlows Dataset",
                DatasetVariant::Ml => "MachineLearningCSV Dataset (Recommended for ML)",
            };
            r.blank();
            r.rule('-');
            r.section(title);

            match &variant.resolved {
                Some(path) => {
                    r.line(format!("✓ Path: {}", path.display()));
                    r.line(format!("  Files: {}", variant.files.len()));
                    if !variant.files.is_empty() {
                        r.line(format!("  Total size: {:.2} GB", bytes_to_gib(variant.total_bytes)));
                    }
                }
                None => r.line(format!("✗ Not found (searched: {})", variant.searched.display())),
            }
        }

        if let Some(ml) = summary.variant(DatasetVariant::Ml).filter(|v| !v.files.is_empty()) {
            r.blank();
            r.rule('-');
            r.section("Available CSV Files (MachineLearningCSV)");
            for (i, file) in ml.files.iter().enumerate() {
                r.line(format!(
                    "  {}. {:<55} ({:>7.1} MB)",
                    i + 1,
                    file.name,
                    bytes_to_mib(file.size_bytes)
                ));
            }
        }

        r.blank();
        r.rule('=');
        r.finish()
    }

    pub fn render_comparison(cmp: &DatasetComparison) -> String {
        let flow_name = DatasetVariant::Flow.display_name();
        let ml_name = DatasetVariant::Ml.display_name();

        let mut r = Report::default();
        r.banner("CICIDS2017 DATASET COMPARISON ANALYSIS");
        r.blank();

        r.section("1. FILE-LEVEL COMPARISON");
        r.line(format!("{} files: {}", flow_name, cmp.flow_file_count));
        r.line(format!("{} files: {}", ml_name, cmp.ml_file_count));
        r.blank();

        r.section("2. COLUMN STRUCTURE COMPARISON");
        match &cmp.columns {
            Some(columns) => {
                r.line(format!("{} columns: {}", flow_name, columns.flow_columns.len()));
                r.line(format!("{} columns: {}", ml_name, columns.ml_columns.len()));
                r.blank();
                render_column_list(&mut r, &format!("COLUMNS ONLY IN {}:", flow_name), &columns.flow_only);
                render_column_list(&mut r, &format!("COLUMNS ONLY IN {}:", ml_name), &columns.ml_only);
                r.line(format!("COMMON COLUMNS: {}/{}", columns.common, columns.union));
            }
            None => r.line("Skipped: one of the datasets has no CSV files"),
        }
        r.blank();

        r.section("3. ROW COUNT COMPARISON (per file)");
        r.line(format!("{:<55} {:<12} {:<12} {:<8}", "File Name", "Flow", "ML", "Match"));
        r.rule('-');
        for rc in &cmp.row_counts {
            r.line(format!(
                "{:<55} {:<12} {:<12} {:<8}",
                rc.file,
                format_count(rc.flow_rows),
                format_count(rc.ml_rows),
                check_mark(rc.is_match())
            ));
        }
        r.blank();

        if cmp.has_mismatches() {
            r.section("4. DETAILED ANALYSIS OF MISMATCHED FILES");
            for rc in cmp.mismatches() {
                r.blank();
                r.line(format!("File: {}", rc.file));
                r.line(format!("  {}: {} rows", flow_name, format_count(rc.flow_rows)));
                r.line(format!("  {}: {} rows", ml_name, format_count(rc.ml_rows)));
                r.line(format!("  Difference: {} rows", format_count(rc.abs_difference())));
                r.line(format!("  Ratio: {}", format_ratio(rc.ratio())));
            }
            r.blank();
        }

        if let Some(labels) = &cmp.labels {
            render_labels(&mut r, labels);
        }

        r.blank();
        r.banner("SUMMARY & RECOMMENDATION");
        r.blank();
        r.line(RECOMMENDATION);
        r.finish()
    }

    pub fn render_probe(probe: &DiscoveryProbe) -> String {
        let mut r = Report::default();
        r.banner("PATH DISCOVERY");
        r.blank();
        r.line(format!("Base path: {}", probe.base_path.display()));
        r.line(format!("  Exists: {}", probe.base_exists));

        for entry in &probe.variants {
            r.blank();
            r.line(format!("{}:", entry.variant.display_name()));
            r.line(format!("  Base: {}", entry.searched.display()));
            match &entry.found {
                Some(found) => {
                    r.line(format!("  Found: {}", found.display()));
                    r.line(format!("  Files: {}", entry.file_count));
                    if let Some(sample) = &entry.sample {
                        r.line(format!("  Sample: {}", sample));
                    }
                }
                None => r.line("  Found: none"),
            }
        }

        if let Some(expected) = &probe.expected_sample {
            r.blank();
            r.line("  Expected sample path:");
            r.line(format!("    {}", expected.display()));
        }

        r.blank();
        r.rule('=');
        let found = probe.variants.iter().filter(|e| e.found.is_some()).count();
        r.line(format!(
            "{} Path discovery complete: {}/{} datasets found",
            check_mark(found == probe.variants.len()),
            found,
            probe.variants.len()
        ));
        r.rule('=');
        r.finish()
    }

    pub fn render_table(table: &Table, limit: usize) -> String {
        let mut r = Report::default();
        r.line(table.columns().join(" | "));
        r.rule('-');
        for row in table.rows().iter().take(limit) {
            r.line(row.join(" | "));
        }
        if table.row_count() > limit {
            r.line(format!("... {} more rows", format_count((table.row_count() - limit) as u64)));
        }
        r.finish()
    }
}

fn render_column_list(r: &mut Report, title: &str, columns: &[ColumnPosition]) {
    r.line(title);
    if columns.is_empty() {
        r.line("  (none)");
    }
    for column in columns {
        r.line(format!("  [{}] {}", column.position, column.name));
    }
    r.blank();
}

fn render_labels(r: &mut Report, labels: &LabelDistribution) {
    r.section(&format!("5. LABEL DISTRIBUTION ({})", labels.file));
    for (name, counts) in [
        (DatasetVariant::Flow.display_name(), &labels.flow),
        (DatasetVariant::Ml.display_name(), &labels.ml),
    ] {
        r.blank();
        r.line(format!("{}:", name));
        render_counts(r, counts);
    }
}

fn render_counts(r: &mut Report, counts: &IndexMap<String, usize>) {
    let width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0).max(5);
    for (label, count) in counts {
        r.line(format!("  {:<width$}  {:>12}", label, format_count(*count as u64), width = width));
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn format_comparison(comparison: &DatasetComparison) -> Result<String> {
        Self::format(comparison)
    }

    pub fn format_summary(summary: &DatasetSummary) -> Result<String> {
        Self::format(summary)
    }
}

/// Format an integer with thousands separators (1234567 -> "1,234,567")
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.3}x", r),
        None => "n/a".to_string(),
    }
}

pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / (1024u64 * 1024 * 1024) as f64
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / (1024u64 * 1024) as f64
}

fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}
