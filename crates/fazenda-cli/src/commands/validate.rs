//! Validate command - check one or more numbers given on the command line.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use fazenda_core::AlgorithmKind;

use super::{format_rows, load_config, write_output, AlgorithmArg, KindArg, OutputFormat, ValidationRow};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Numbers to validate, plain or masked
    #[arg(required = true)]
    numbers: Vec<String>,

    /// Document type
    #[arg(short, long, value_enum, default_value = "auto")]
    kind: KindArg,

    /// CPF check digit algorithm (default: from config)
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Accept numbers made of a single repeated digit
    #[arg(long)]
    allow_same_digits: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let algorithm = args
        .algorithm
        .map(AlgorithmKind::from)
        .unwrap_or(config.validation.cpf_algorithm);
    let allow_same_digits = args.allow_same_digits || config.validation.all_same_digits_are_valid;

    info!("Validating {} numbers with {:?}", args.numbers.len(), algorithm);

    let rows: Vec<ValidationRow> = args
        .numbers
        .iter()
        .map(|number| ValidationRow::check(number, args.kind, algorithm, allow_same_digits))
        .collect();

    let output = format_rows(&rows, args.format)?;
    write_output(args.output.as_deref(), &output)?;

    let invalid = rows.iter().filter(|r| !r.is_valid()).count();
    if invalid > 0 {
        anyhow::bail!("{} of {} numbers are invalid", invalid, rows.len());
    }

    Ok(())
}
