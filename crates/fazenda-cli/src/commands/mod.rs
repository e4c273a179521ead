//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod generate;
pub mod states;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use console::style;
use serde::Serialize;
use tracing::debug;

use fazenda_core::{AlgorithmKind, AnyDocument, DocumentKind, DocumentSummary, FazendaConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Document type argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Detect from the input
    Auto,
    Cpf,
    Cnpj,
}

impl KindArg {
    fn document_kind(self) -> Option<DocumentKind> {
        match self {
            KindArg::Auto => None,
            KindArg::Cpf => Some(DocumentKind::Cpf),
            KindArg::Cnpj => Some(DocumentKind::Cnpj),
        }
    }
}

/// Check digit algorithm argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AlgorithmArg {
    Simple,
    WeightedSum,
}

impl From<AlgorithmArg> for AlgorithmKind {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Simple => AlgorithmKind::Simple,
            AlgorithmArg::WeightedSum => AlgorithmKind::WeightedSum,
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fazenda")
        .join("config.json")
}

/// Load the configuration from `--config`, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FazendaConfig> {
    if let Some(path) = config_path {
        return Ok(FazendaConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        Ok(FazendaConfig::from_file(&path)?)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(FazendaConfig::default())
    }
}

/// Outcome of validating one input string.
#[derive(Debug, Serialize)]
pub struct ValidationRow {
    pub input: String,

    #[serde(flatten)]
    pub summary: Option<DocumentSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationRow {
    /// Parse and validate `input`.
    pub fn check(
        input: &str,
        kind: KindArg,
        algorithm: AlgorithmKind,
        all_same_digits_are_valid: bool,
    ) -> Self {
        let parsed = match kind.document_kind() {
            Some(kind) => AnyDocument::parse_as(kind, input),
            None => AnyDocument::parse(input),
        };

        match parsed {
            Ok(document) => Self {
                input: input.to_string(),
                summary: Some(document.summary(algorithm, all_same_digits_are_valid)),
                error: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                summary: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.summary.as_ref().is_some_and(|s| s.valid)
    }
}

pub fn format_rows(rows: &[ValidationRow], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => format_rows_csv(rows),
        OutputFormat::Text => Ok(format_rows_text(rows)),
    }
}

fn format_rows_csv(rows: &[ValidationRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "input",
        "kind",
        "plain_number",
        "masked_number",
        "valid",
        "fiscal_region",
        "branch_number",
        "headquarters",
        "error",
    ])?;

    for row in rows {
        let summary = row.summary.as_ref();
        let kind = summary.map(|s| s.kind.to_string()).unwrap_or_default();
        let valid = row.is_valid().to_string();
        let fiscal_region = summary
            .and_then(|s| s.fiscal_region)
            .map(|r| r.to_string())
            .unwrap_or_default();
        let headquarters = summary
            .and_then(|s| s.headquarters)
            .map(|h| h.to_string())
            .unwrap_or_default();

        wtr.write_record([
            row.input.as_str(),
            kind.as_str(),
            summary.map(|s| s.plain_number.as_str()).unwrap_or_default(),
            summary.map(|s| s.masked_number.as_str()).unwrap_or_default(),
            valid.as_str(),
            fiscal_region.as_str(),
            summary.and_then(|s| s.branch_number.as_deref()).unwrap_or_default(),
            headquarters.as_str(),
            row.error.as_deref().unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_rows_text(rows: &[ValidationRow]) -> String {
    let mut output = String::new();

    for row in rows {
        match (&row.summary, &row.error) {
            (Some(summary), _) => {
                let mark = if summary.valid {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                let status = if summary.valid { "valid" } else { "invalid" };

                output.push_str(&format!(
                    "{} {} {} {}",
                    mark, summary.kind, summary.masked_number, status
                ));

                if let Some(region) = summary.fiscal_region {
                    output.push_str(&format!(" (fiscal region {}: {})", region, summary.states.join(", ")));
                }
                if let Some(branch) = &summary.branch_number {
                    let place = if summary.headquarters == Some(true) {
                        "headquarters"
                    } else {
                        "branch"
                    };
                    output.push_str(&format!(" ({} {})", place, branch));
                }
                output.push('\n');
            }
            (None, error) => {
                output.push_str(&format!(
                    "{} {} {}\n",
                    style("✗").red(),
                    row.input,
                    error.as_deref().unwrap_or("unknown error")
                ));
            }
        }
    }

    output
}

/// Write to `output` or stdout.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
