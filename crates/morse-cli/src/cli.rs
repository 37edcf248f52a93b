//! Command-Line Interface
//!
//! Argument definitions and the subcommand handlers behind `morse`.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use morse_core::config::DEFAULT_UNKNOWN_MARKER;
use morse_core::{build_tables, Codec, CodecConfig, GapPolicy, Tables};

#[derive(Parser)]
#[command(name = "morse")]
#[command(about = "Translate between text and International Morse code")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Encode text
    morse encode "SOS"

    # Decode Morse (dots may also be written as ·)
    morse decode "... --- ..."

    # Decode from stdin, failing on unknown codes
    echo ".... .. " | morse decode --strict

    # Print the symbol table
    morse table

    # Check the table for codes shared by two symbols
    morse check
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Text emitted in place of an unknown code when decoding
    #[arg(long, global = true, default_value = DEFAULT_UNKNOWN_MARKER)]
    pub marker: String,

    /// How runs of spaces are read when decoding
    #[arg(long, global = true, value_enum, default_value_t = Gap::Units)]
    pub gap: Gap,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode text to Morse
    Encode {
        /// Text to encode; read line by line from stdin if omitted
        text: Vec<String>,
    },

    /// Decode Morse to text
    Decode {
        /// Morse to decode; read line by line from stdin if omitted
        #[arg(allow_hyphen_values = true)]
        morse: Vec<String>,

        /// Exit with an error if any code is unknown
        #[arg(long)]
        strict: bool,
    },

    /// Print the translation table
    Table {
        /// Print code to symbol instead of symbol to code
        #[arg(long)]
        reverse: bool,
    },

    /// Report codes shared by more than one symbol
    Check,
}

/// Word-gap handling when decoding
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Gap {
    /// One space per empty token
    PerToken,
    /// Word spaces measured from the width of each blank run
    Units,
}

impl From<Gap> for GapPolicy {
    fn from(gap: Gap) -> Self {
        match gap {
            Gap::PerToken => GapPolicy::PerToken,
            Gap::Units => GapPolicy::Units,
        }
    }
}

impl Cli {
    /// Codec configuration from the global flags
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            unknown_marker: self.marker.clone(),
            gap_policy: self.gap.into(),
            ..CodecConfig::default()
        }
    }
}

/// Joined arguments as one line, or every line of stdin.
pub fn input_lines(args: &[String]) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(vec![args.join(" ")]);
    }

    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read stdin")
}

/// Encode each line and write one Morse line per input
pub fn encode(codec: &Codec, lines: &[String], out: &mut impl Write) -> Result<()> {
    for line in lines {
        let morse = codec
            .encode(line)
            .with_context(|| format!("Cannot encode {line:?}"))?;
        writeln!(out, "{morse}")?;
    }
    Ok(())
}

/// Decode each line; with `strict`, fail if any code was unknown
pub fn decode(codec: &Codec, lines: &[String], strict: bool, out: &mut impl Write) -> Result<()> {
    let mut unknown = 0;
    for line in lines {
        let decoded = codec.decode(line);
        unknown += decoded.warnings.len();
        writeln!(out, "{}", decoded.text)?;
    }

    if strict && unknown > 0 {
        bail!("{unknown} unknown Morse code(s) in input");
    }
    Ok(())
}

/// Write the forward table, or the reverse table if `reverse`
pub fn print_table(tables: &Tables, reverse: bool, out: &mut impl Write) -> Result<()> {
    if reverse {
        for (code, symbol) in tables.reverse().iter() {
            writeln!(out, "{code:<8} {symbol:?}")?;
        }
    } else {
        for (symbol, code) in tables.forward().iter() {
            writeln!(out, "{symbol:?}\t{code}")?;
        }
    }
    Ok(())
}

/// Build the canonical tables and report collisions; fail if there are any
pub fn check(out: &mut impl Write) -> Result<()> {
    let tables = build_tables()?;
    writeln!(
        out,
        "{} symbols, {} codes, {} collisions",
        tables.forward().len(),
        tables.reverse().len(),
        tables.collisions().len()
    )?;
    for collision in tables.collisions() {
        writeln!(out, "  {collision}")?;
    }

    if !tables.is_bijective() {
        bail!("Morse table has {} collision(s)", tables.collisions().len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_encode(text: &str) -> String {
        let codec = Codec::new().unwrap();
        let mut out = Vec::new();
        encode(&codec, &[text.to_string()], &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_encode_args() {
        let cli = Cli::try_parse_from(["morse", "encode", "hello", "world"]).unwrap();
        match cli.command {
            Commands::Encode { text } => assert_eq!(text, vec!["hello", "world"]),
            _ => panic!("expected encode"),
        }
        assert_eq!(cli.gap, Gap::Units);
        assert_eq!(cli.marker, DEFAULT_UNKNOWN_MARKER);
    }

    #[test]
    fn parse_decode_flags() {
        let cli = Cli::try_parse_from([
            "morse", "decode", "--strict", "--gap", "per-token", "--marker", "?", "...",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Decode { strict: true, .. }));
        let config = cli.codec_config();
        assert_eq!(config.gap_policy, GapPolicy::PerToken);
        assert_eq!(config.unknown_marker, "?");
    }

    #[test]
    fn parse_decode_leading_dash() {
        let cli = Cli::try_parse_from(["morse", "decode", "-.-. --.-"]).unwrap();
        match cli.command {
            Commands::Decode { morse, strict } => {
                assert_eq!(morse, vec!["-.-. --.-"]);
                assert!(!strict);
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn parse_rejects_unknown_gap() {
        assert!(Cli::try_parse_from(["morse", "decode", "--gap", "wide", "..."]).is_err());
    }

    #[test]
    fn input_lines_joins_args() {
        let args = vec!["cq".to_string(), "dx".to_string()];
        assert_eq!(input_lines(&args).unwrap(), vec!["cq dx"]);
    }

    #[test]
    fn encode_writes_one_line_per_input() {
        assert_eq!(run_encode("sos"), "... --- ... \n");
    }

    #[test]
    fn encode_unknown_symbol_fails() {
        let codec = Codec::new().unwrap();
        let mut out = Vec::new();
        let err = encode(&codec, &["50%".to_string()], &mut out).unwrap_err();
        assert!(format!("{err:#}").contains('%'));
    }

    #[test]
    fn decode_strict_fails_on_unknown() {
        let codec = Codec::new().unwrap();
        let lines = vec![".... .......".to_string()];

        let mut out = Vec::new();
        decode(&codec, &lines, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "h ### \n");

        let mut out = Vec::new();
        assert!(decode(&codec, &lines, true, &mut out).is_err());
    }

    #[test]
    fn table_lists_every_symbol() {
        let tables = build_tables().unwrap();
        let mut out = Vec::new();
        print_table(&tables, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), tables.forward().len());
        assert!(text.starts_with("'a'\t.-\n"));
    }

    #[test]
    fn check_canonical_passes() {
        let mut out = Vec::new();
        check(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("0 collisions"));
    }
}
