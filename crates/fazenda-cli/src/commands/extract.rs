//! Extract command - find CPF/CNPJ numbers in a text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use fazenda_core::{extract_documents, AnyDocument, DocumentKind, ExtractionMatch};

use super::{load_config, write_output, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (default: stdin)
    input: Option<PathBuf>,

    /// Keep numbers with wrong check digits
    #[arg(long)]
    no_validate: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// One extracted number.
#[derive(Debug, Serialize)]
struct Found {
    kind: DocumentKind,
    masked_number: String,
    plain_number: String,
    valid: bool,
    confidence: f32,
    start: Option<usize>,
    end: Option<usize>,
    source: String,
}

impl From<&ExtractionMatch<AnyDocument>> for Found {
    fn from(m: &ExtractionMatch<AnyDocument>) -> Self {
        Self {
            kind: m.value.kind(),
            masked_number: m.value.masked_number().to_string(),
            plain_number: m.value.plain_number().to_string(),
            valid: m.value.is_valid(),
            confidence: m.confidence,
            start: m.position.map(|(start, _)| start),
            end: m.position.map(|(_, end)| end),
            source: m.source.clone(),
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
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

    let validate = config.extraction.validate && !args.no_validate;
    let found: Vec<Found> = extract_documents(&text, validate)
        .iter()
        .filter(|m| m.confidence >= config.extraction.min_confidence)
        .map(Found::from)
        .collect();

    info!("Found {} documents", found.len());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&found)?,
        OutputFormat::Csv => format_csv(&found)?,
        OutputFormat::Text => format_text(&found),
    };

    write_output(args.output.as_deref(), &output)
}

fn format_csv(found: &[Found]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["kind", "masked_number", "valid", "confidence", "start", "end"])?;

    for f in found {
        wtr.write_record([
            f.kind.to_string(),
            f.masked_number.clone(),
            f.valid.to_string(),
            format!("{:.2}", f.confidence),
            f.start.map(|s| s.to_string()).unwrap_or_default(),
            f.end.map(|e| e.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(found: &[Found]) -> String {
    if found.is_empty() {
        return format!("{} No documents found\n", style("ℹ").blue());
    }

    found
        .iter()
        .map(|f| {
            let mark = if f.valid {
                style("✓").green()
            } else {
                style("✗").red()
            };
            format!(
                "{} {} {} (confidence {:.0}%)\n",
                mark,
                f.kind,
                f.masked_number,
                f.confidence * 100.0
            )
        })
        .collect()
}
