//! Translation constants
//!
//! Separators, glyphs and capacities shared by the table builder and the
//! codec. Runtime-tunable settings live in [`crate::codec::CodecConfig`].

/// Separator appended after every encoded symbol (one-unit letter gap)
pub const SYMBOL_SEPARATOR: char = ' ';

/// Blank filler the word-space symbol encodes to
///
/// Followed by its own separator this gives three spaces per word space,
/// so a word boundary in encoded text is four spaces wide.
pub const WORD_FILLER: &str = "  ";

/// Number of spaces one encoded word space occupies (filler plus separator)
pub const WORD_GAP_WIDTH: usize = WORD_FILLER.len() + 1;

/// ASCII dot element
pub const DOT: char = '.';

/// ASCII dash element
pub const DASH: char = '-';

/// Alternate dot glyph accepted by the decoder (U+00B7 MIDDLE DOT)
pub const MID_DOT: char = '\u{00B7}';

/// Marker substituted for a code with no table entry
pub const DEFAULT_UNKNOWN_MARKER: &str = " ### ";

/// Capacity of a single Morse code in characters
///
/// The longest canonical code is six elements.
pub const MAX_CODE_LEN: usize = 8;
