//! Batch command - parse many recognized-text files in one run.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use bizcard_core::card::HeuristicCardParser;
use bizcard_core::models::card::{CardRecord, Field};

use super::load_config;
use super::parse::{format_record, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "cards/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of parsing a single file.
struct BatchResult {
    path: PathBuf,
    record: Option<CardRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = HeuristicCardParser::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match fs::read_to_string(&path) {
            Ok(text) => {
                let result = parser.parse(&text);
                debug!(
                    "Parsed {} with {} warnings",
                    path.display(),
                    result.warnings.len()
                );
                results.push(BatchResult {
                    path,
                    record: Some(result.record),
                    error: None,
                });
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                results.push(BatchResult {
                    path,
                    record: None,
                    error: Some(e.to_string()),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    for result in &results {
        if let (Some(record), Some(output_dir)) = (&result.record, &args.output_dir) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("card");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            fs::write(&output_path, format_record(record, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let parsed = results.iter().filter(|r| r.record.is_some()).count();
    let failed = results.len() - parsed;

    println!();
    println!(
        "{} Parsed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(parsed).green(),
        style(failed).red()
    );

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for result in results.iter().filter(|r| r.error.is_some()) {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    header.push("error");
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.record {
            Some(record) => {
                let mut row = vec![filename, "success"];
                row.extend(Field::ALL.iter().map(|f| record.get(*f)));
                row.push("");
                wtr.write_record(&row)?;
            }
            None => {
                let mut row = vec![filename.to_string(), "error".to_string()];
                row.extend(Field::ALL.iter().map(|_| String::new()));
                row.push(result.error.clone().unwrap_or_default());
                wtr.write_record(&row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
