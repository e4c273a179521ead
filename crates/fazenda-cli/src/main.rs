//! CLI application for CPF/CNPJ validation and generation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, generate, states, validate};

/// Validate, generate and extract Brazilian CPF/CNPJ numbers
#[derive(Parser)]
#[command(name = "fazenda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more numbers
    Validate(validate::ValidateArgs),

    /// Generate random valid numbers
    Generate(generate::GenerateArgs),

    /// Find numbers in a text file
    Extract(extract::ExtractArgs),

    /// Validate a file with one number per line
    Batch(batch::BatchArgs),

    /// List states and their fiscal regions
    States(states::StatesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Validate(args) => validate::run(args, cli.config.as_deref()),
        Commands::Generate(args) => generate::run(args, cli.config.as_deref()),
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::States(args) => states::run(args),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
