//! Text to Morse and Morse to text.
//!
//! Encoding appends one separator space after every symbol code, and the
//! word space encodes to a blank filler, so encoded words end up four
//! spaces apart. Decoding reads a single space as a letter boundary and a
//! wider run as word spaces (see [`GapPolicy`]).

use std::borrow::Cow;

use crate::config::{DEFAULT_UNKNOWN_MARKER, DOT, MID_DOT, SYMBOL_SEPARATOR, WORD_GAP_WIDTH};
use crate::error::{TableError, UnknownSymbolError, UnknownTokenWarning};
use crate::keying::{self, Element};
use crate::table::{self, ForwardTable, ReverseTable, Tables};

/// How the decoder turns runs of separator spaces into word spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Split on single spaces; every empty token becomes one space
    PerToken,
    /// Measure each run of spaces.
    ///
    /// Between two codes one space is a letter boundary and `g >= 2`
    /// spaces are `max(1, g / 3)` word spaces. At either end of the input
    /// `g` spaces are `g / 3` word spaces, which drops the separator the
    /// encoder leaves after the last symbol.
    #[default]
    Units,
}

/// Codec configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Text emitted in place of a code with no table entry
    pub unknown_marker: String,
    /// Accept U+00B7 MIDDLE DOT as a dot
    pub normalize_mid_dot: bool,
    /// Word-gap handling in the decoder
    pub gap_policy: GapPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unknown_marker: DEFAULT_UNKNOWN_MARKER.to_string(),
            normalize_mid_dot: true,
            gap_policy: GapPolicy::default(),
        }
    }
}

/// Decoder output: best-effort text plus one warning per unknown code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded text, with the unknown marker where a code was not found
    pub text: String,
    /// Codes that had no table entry, in input order
    pub warnings: Vec<UnknownTokenWarning>,
}

impl Decoded {
    /// True if every code was found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Split into `(text, warnings)`
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<UnknownTokenWarning>) {
        (self.text, self.warnings)
    }
}

/// Encode text using a forward table.
///
/// Input is lowercased before lookup. Every symbol's code is followed by
/// one separator space, including the last.
///
/// # Errors
///
/// Returns [`UnknownSymbolError`] for the first input character whose
/// lowercase form has no code.
pub fn encode(text: &str, table: &ForwardTable) -> Result<String, UnknownSymbolError> {
    let mut out = String::with_capacity(text.len() * 4);

    for (position, c) in text.chars().enumerate() {
        // A character can lowercase to several; all must resolve.
        let codes = c
            .to_lowercase()
            .map(|lower| table.get(lower))
            .collect::<Option<Vec<_>>>()
            .ok_or(UnknownSymbolError { symbol: c, position })?;
        for code in codes {
            out.push_str(code.as_str());
            out.push(SYMBOL_SEPARATOR);
        }
    }

    Ok(out)
}

/// Decode Morse using a reverse table and the default configuration.
#[must_use]
pub fn decode(morse: &str, table: &ReverseTable) -> Decoded {
    decode_with(morse, table, &CodecConfig::default())
}

/// Decode Morse using a reverse table.
///
/// Never fails: unknown codes are replaced by `config.unknown_marker` and
/// reported in [`Decoded::warnings`]. A `/` token is treated like any
/// other unknown code.
#[must_use]
pub fn decode_with(morse: &str, table: &ReverseTable, config: &CodecConfig) -> Decoded {
    let morse = normalize(morse, config.normalize_mid_dot);
    let mut decoded = Decoded::default();
    let mut group = 0;

    match config.gap_policy {
        GapPolicy::PerToken => {
            for token in morse.split(SYMBOL_SEPARATOR) {
                if token.is_empty() {
                    decoded.text.push(' ');
                } else {
                    resolve(token, group, table, config, &mut decoded);
                    group += 1;
                }
            }
        }
        GapPolicy::Units => {
            let segments = segments(&morse);
            let last = segments.len().saturating_sub(1);
            for (i, segment) in segments.iter().enumerate() {
                match *segment {
                    Segment::Code(token) => {
                        resolve(token, group, table, config, &mut decoded);
                        group += 1;
                    }
                    Segment::Blank(width) => {
                        let spaces = word_spaces(width, i == 0 || i == last);
                        decoded.text.extend(core::iter::repeat(' ').take(spaces));
                    }
                }
            }
        }
    }

    decoded
}

fn normalize(morse: &str, mid_dot: bool) -> Cow<'_, str> {
    if mid_dot && morse.contains(MID_DOT) {
        Cow::Owned(morse.replace(MID_DOT, &DOT.to_string()))
    } else {
        Cow::Borrowed(morse)
    }
}

fn resolve(
    token: &str,
    index: usize,
    table: &ReverseTable,
    config: &CodecConfig,
    decoded: &mut Decoded,
) {
    if let Some(symbol) = table.get(token) {
        decoded.text.push(symbol);
    } else {
        tracing::warn!("Unknown Morse token {:?} at group {}", token, index);
        decoded.text.push_str(&config.unknown_marker);
        decoded.warnings.push(UnknownTokenWarning {
            token: token.to_string(),
            index,
        });
    }
}

/// A run of code characters or of separator spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Code(&'a str),
    Blank(usize),
}

/// Split Morse text into alternating code and blank runs.
pub(crate) fn segments(morse: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = morse;

    while !rest.is_empty() {
        let trimmed = rest.trim_start_matches(SYMBOL_SEPARATOR);
        let blank = rest.len() - trimmed.len();
        if blank > 0 {
            out.push(Segment::Blank(blank));
            rest = trimmed;
            continue;
        }

        let end = rest.find(SYMBOL_SEPARATOR).unwrap_or(rest.len());
        out.push(Segment::Code(&rest[..end]));
        rest = &rest[end..];
    }

    out
}

/// Word spaces represented by a blank run of `width` spaces.
pub(crate) fn word_spaces(width: usize, at_edge: bool) -> usize {
    if at_edge {
        width / WORD_GAP_WIDTH
    } else if width >= 2 {
        (width / WORD_GAP_WIDTH).max(1)
    } else {
        0
    }
}

/// Encoder and decoder bound to one set of tables.
#[derive(Clone, Debug)]
pub struct Codec {
    tables: Tables,
    config: CodecConfig,
}

impl Codec {
    /// Codec over the canonical tables with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails only if the canonical tables cannot be built.
    pub fn new() -> Result<Self, TableError> {
        Self::with_config(CodecConfig::default())
    }

    /// Codec over the canonical tables.
    ///
    /// # Errors
    ///
    /// Fails only if the canonical tables cannot be built.
    pub fn with_config(config: CodecConfig) -> Result<Self, TableError> {
        let tables = table::shared()?.clone();
        Ok(Self::with_tables(tables, config))
    }

    /// Codec over caller-built tables
    #[must_use]
    pub fn with_tables(tables: Tables, config: CodecConfig) -> Self {
        Self { tables, config }
    }

    /// Tables in use
    #[must_use]
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode text.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSymbolError`] for the first character with no code.
    pub fn encode(&self, text: &str) -> Result<String, UnknownSymbolError> {
        encode(text, self.tables.forward())
    }

    /// Decode Morse, substituting the configured marker for unknown codes.
    #[must_use]
    pub fn decode(&self, morse: &str) -> Decoded {
        decode_with(morse, self.tables.reverse(), &self.config)
    }

    /// Encode text and expand it into keying elements.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSymbolError`] for the first character with no code.
    pub fn keying(&self, text: &str) -> Result<Vec<Element>, UnknownSymbolError> {
        Ok(keying::expand(&self.encode(text)?))
    }
}
