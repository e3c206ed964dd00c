//! Command implementations for flowdiff CLI

use crate::cli::{parse_column_list, Commands, OutputFormat};
use crate::compare::run_comparison;
use crate::config::{DatasetConfig, DatasetVariant};
use crate::data::CsvOptions;
use crate::discovery::probe;
use crate::error::{FlowdiffError, Result};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::resolver::DatasetResolver;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands, base: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Init { path, force } => init_command(base, &path, force),
        Commands::Summary { format } => summary_command(load_config(base, config_path)?, &format),
        Commands::Compare {
            format,
            sample_file,
            label_column,
            no_progress,
        } => {
            let mut config = load_config(base, config_path)?;
            if let Some(sample_file) = sample_file {
                config.sample_file = sample_file;
            }
            if let Some(label_column) = label_column {
                config.label_column = label_column;
            }
            compare_command(config, &format, no_progress)
        }
        Commands::Probe { format } => probe_command(load_config(base, config_path)?, &format),
        Commands::Load {
            file,
            variant,
            rows,
            delimiter,
            columns,
            preview,
        } => {
            let mut options = CsvOptions::default().with_delimiter(delimiter);
            if let Some(columns) = columns {
                options = options.with_columns(parse_column_list(&columns));
            }
            load_command(load_config(base, config_path)?, &file, &variant, rows, &options, preview)
        }
        Commands::LoadAll {
            variant,
            rows,
            delimiter,
            preview,
        } => {
            let options = CsvOptions::default().with_delimiter(delimiter);
            load_all_command(load_config(base, config_path)?, &variant, rows, &options, preview)
        }
    }
}

/// Build the effective config: config file (if any), then the base override
pub fn load_config(base: Option<&Path>, config_path: Option<&Path>) -> Result<DatasetConfig> {
    let mut config = match config_path {
        Some(path) => DatasetConfig::load(path)?,
        None => DatasetConfig::default(),
    };

    if let Some(base) = base {
        config.base_path = base.to_path_buf();
    }

    log::debug!("Using dataset base {}", config.base_path.display());
    Ok(config)
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).map_err(FlowdiffError::invalid_input)
}

fn parse_variant(variant: &str) -> Result<DatasetVariant> {
    variant.parse().map_err(FlowdiffError::invalid_input)
}

/// Write a config file with the default layout
fn init_command(base: Option<&Path>, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FlowdiffError::config(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    let config = match base {
        Some(base) => DatasetConfig::with_base(base),
        None => DatasetConfig::default(),
    };
    config.save(path)?;

    log::info!("Wrote config to {}", path.display());
    println!("✓ Created config file: {}", path.display());
    println!("  Base directory: {}", config.base_path.display());
    Ok(())
}

fn summary_command(config: DatasetConfig, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let summary = DatasetResolver::new(config).summary()?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_summary(&summary),
        OutputFormat::Json => println!("{}", JsonFormatter::format_summary(&summary)?),
    }
    Ok(())
}

fn compare_command(config: DatasetConfig, format: &str, no_progress: bool) -> Result<()> {
    let format = parse_format(format)?;
    let show_progress = format == OutputFormat::Pretty && !no_progress;
    let comparison = run_comparison(&config, show_progress)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_comparison(&comparison),
        OutputFormat::Json => println!("{}", JsonFormatter::format_comparison(&comparison)?),
    }
    Ok(())
}

fn probe_command(config: DatasetConfig, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let report = probe(&config);

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_probe(&report),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&report)?),
    }
    Ok(())
}

fn load_command(
    config: DatasetConfig,
    file: &str,
    variant: &str,
    rows: Option<usize>,
    options: &CsvOptions,
    preview: usize,
) -> Result<()> {
    let variant = parse_variant(variant)?;
    let resolver = DatasetResolver::new(config);
    let table = resolver.load_file(file, variant, rows, options)?;

    if preview > 0 {
        println!();
        PrettyPrinter::print_table(&table, preview);
    }
    Ok(())
}

fn load_all_command(
    config: DatasetConfig,
    variant: &str,
    rows: Option<usize>,
    options: &CsvOptions,
    preview: usize,
) -> Result<()> {
    let variant = parse_variant(variant)?;
    let resolver = DatasetResolver::new(config);
    let table = resolver.load_all_files(variant, rows, options)?;

    if preview > 0 {
        println!();
        PrettyPrinter::print_table(&table, preview);
    }
    Ok(())
}
