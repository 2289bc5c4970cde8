//! Parse command - extract a contact record from one recognized-text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use bizcard_core::card::{CardExtractor, HeuristicCardParser};
use bizcard_core::models::card::{CardRecord, Field};
use bizcard_core::vision::VisionOutcome;

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Treat the input as a structured vision response rather than plain text
    #[arg(long)]
    structured: bool,

    /// Show fields the parser could not recognize
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    info!("Read {} characters of recognized text", text.len());

    let parser = HeuristicCardParser::from_config(&config.extraction);

    let (record, warnings) = if args.structured {
        let record = parser.extract(&VisionOutcome::structured(text))?;
        (record, Vec::new())
    } else {
        let result = parser.parse(&text);
        debug!("Parse finished in {}ms", result.processing_time_ms);
        (result.record, result.warnings)
    };

    let output = format_record(&record, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }

    if args.show_warnings {
        println!(
            "{} Recognized {} of {} fields",
            style("ℹ").blue(),
            record.filled_fields(),
            Field::ALL.len()
        );
        if !warnings.is_empty() {
            eprintln!("{}", style("Warnings:").yellow());
            for warning in &warnings {
                eprintln!("  - {}", warning);
            }
        }
    }

    Ok(())
}

pub(crate) fn format_record(record: &CardRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &CardRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(|f| f.key()))?;
    wtr.write_record(Field::ALL.iter().map(|f| record.get(*f)))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &CardRecord) -> String {
    let mut output = String::new();

    for field in Field::ALL {
        let value = record.get(field);
        if value.is_empty() {
            continue;
        }
        output.push_str(&format!("{:<9} {}\n", format!("{}:", field.key()), value));
    }

    if output.is_empty() {
        output.push_str("(no fields recognized)\n");
    }

    output
}
