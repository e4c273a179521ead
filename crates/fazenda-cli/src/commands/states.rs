//! States command - list states and their fiscal regions.

use clap::Args;

use fazenda_core::{FiscalRegion, State};

use super::{write_output, OutputFormat};

/// Arguments for the states command.
#[derive(Args)]
pub struct StatesArgs {
    /// Only states of this fiscal region (1-10)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
    region: Option<u8>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: StatesArgs) -> anyhow::Result<()> {
    let states: Vec<&State> = match args.region {
        Some(number) => {
            let region = FiscalRegion::from_digit(number % 10)
                .ok_or_else(|| anyhow::anyhow!("Unknown fiscal region: {}", number))?;
            region.states().into_iter().collect()
        }
        None => State::all().iter().collect(),
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&states)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["initials", "name", "fiscal_region"])?;
            for state in &states {
                wtr.write_record([state.initials, state.name, &state.fiscal_region.to_string()])?;
            }
            String::from_utf8(wtr.into_inner()?)?
        }
        OutputFormat::Text => states.iter().map(|s| format!("{}\n", s)).collect(),
    };

    write_output(None, &output)
}
