//! Generate command - produce random valid numbers.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use fazenda_core::generator::generate_with;
use fazenda_core::{AlgorithmKind, AnyDocument, Cnpj, Cpf, FiscalRegion};

use super::{format_rows, load_config, write_output, KindArg, OutputFormat, ValidationRow};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Document type
    #[arg(value_enum)]
    kind: GenerateKind,

    /// Number of documents (default: from config)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print digits only, without the mask
    #[arg(long)]
    plain: bool,

    /// CPF fiscal region digit (0 is the 10th region)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    region: Option<u8>,

    /// Generate CNPJ headquarters numbers (branch 0001)
    #[arg(long)]
    headquarters: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GenerateKind {
    Cpf,
    Cnpj,
}

pub fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if args.region.is_some() && !matches!(args.kind, GenerateKind::Cpf) {
        anyhow::bail!("--region only applies to CPF");
    }
    if args.headquarters && !matches!(args.kind, GenerateKind::Cnpj) {
        anyhow::bail!("--headquarters only applies to CNPJ");
    }

    let count = args.count.unwrap_or(config.generation.count);
    let masked = config.generation.masked && !args.plain;

    let mut rng = match args.seed.or(config.generation.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let region = args.region.and_then(FiscalRegion::from_digit);

    let documents: Vec<AnyDocument> = (0..count)
        .map(|_| match args.kind {
            GenerateKind::Cpf => match region {
                Some(region) => Cpf::generate_in_region_with(region, &mut rng).into(),
                None => generate_with::<Cpf, _>(&mut rng).into(),
            },
            GenerateKind::Cnpj if args.headquarters => Cnpj::generate_headquarters_with(&mut rng).into(),
            GenerateKind::Cnpj => generate_with::<Cnpj, _>(&mut rng).into(),
        })
        .collect();

    debug!("Generated {} documents", documents.len());

    let output = match args.format {
        OutputFormat::Text => format_numbers(&documents, masked),
        format => {
            let rows: Vec<ValidationRow> = documents
                .iter()
                .map(|d| {
                    ValidationRow::check(d.masked_number(), KindArg::Auto, AlgorithmKind::WeightedSum, false)
                })
                .collect();
            format_rows(&rows, format)?
        }
    };

    write_output(args.output.as_deref(), &output)
}

fn format_numbers(documents: &[AnyDocument], masked: bool) -> String {
    documents
        .iter()
        .map(|d| {
            let number = if masked { d.masked_number() } else { d.plain_number() };
            format!("{}\n", number)
        })
        .collect()
}
