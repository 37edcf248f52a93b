//! Morse Command-Line Front End
//!
//! Builds the canonical tables once and runs one subcommand against them.

mod cli;

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use morse_core::Codec;

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morse_cli=info,morse_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let codec = Codec::with_config(cli.codec_config())?;
    tracing::debug!(
        "Loaded {} symbols, {} collisions",
        codec.tables().forward().len(),
        codec.tables().collisions().len()
    );

    let mut out = io::stdout().lock();
    match &cli.command {
        Commands::Encode { text } => {
            let lines = cli::input_lines(text)?;
            cli::encode(&codec, &lines, &mut out)?;
        }
        Commands::Decode { morse, strict } => {
            let lines = cli::input_lines(morse)?;
            cli::decode(&codec, &lines, *strict, &mut out)?;
        }
        Commands::Table { reverse } => {
            cli::print_table(codec.tables(), *reverse, &mut out)?;
        }
        Commands::Check => {
            cli::check(&mut out)?;
        }
    }

    Ok(())
}
