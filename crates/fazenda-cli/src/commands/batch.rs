//! Batch command - validate a file with one number per line.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use fazenda_core::AlgorithmKind;

use super::{format_rows, load_config, write_output, AlgorithmArg, KindArg, OutputFormat, ValidationRow};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input file, one number per line (`#` starts a comment)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Document type
    #[arg(short, long, value_enum, default_value = "auto")]
    kind: KindArg,

    /// CPF check digit algorithm (default: from config)
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Only report numbers that fail
    #[arg(long)]
    only_invalid: bool,

    /// Exit with an error when any number fails
    #[arg(long)]
    strict: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content = fs::read_to_string(&args.input)?;
    let numbers: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if numbers.is_empty() {
        anyhow::bail!("No numbers found in {}", args.input.display());
    }

    let algorithm = args
        .algorithm
        .map(AlgorithmKind::from)
        .unwrap_or(config.validation.cpf_algorithm);

    let pb = ProgressBar::new(numbers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} numbers")?
            .progress_chars("=>-"),
    );

    let mut rows = Vec::with_capacity(numbers.len());
    for number in numbers {
        let row = ValidationRow::check(
            number,
            args.kind,
            algorithm,
            config.validation.all_same_digits_are_valid,
        );

        if let Some(error) = &row.error {
            warn!("Malformed number {:?}: {}", number, error);
        }

        rows.push(row);
        pb.inc(1);
    }

    pb.finish_and_clear();

    let total = rows.len();
    let valid = rows.iter().filter(|r| r.is_valid()).count();
    let malformed = rows.iter().filter(|r| r.error.is_some()).count();
    debug!("Checked {} numbers in {:?}", total, start.elapsed());

    let reported: Vec<ValidationRow> = if args.only_invalid {
        rows.into_iter().filter(|r| !r.is_valid()).collect()
    } else {
        rows
    };

    let output = format_rows(&reported, args.format)?;
    write_output(args.output.as_deref(), &output)?;

    eprintln!();
    eprintln!(
        "{} Checked {} numbers in {:?}",
        style("✓").green(),
        total,
        start.elapsed()
    );
    eprintln!(
        "   {} valid, {} invalid, {} malformed",
        style(valid).green(),
        style(total - valid - malformed).red(),
        style(malformed).yellow()
    );

    if args.strict && valid < total {
        anyhow::bail!("{} of {} numbers failed validation", total - valid, total);
    }

    Ok(())
}
