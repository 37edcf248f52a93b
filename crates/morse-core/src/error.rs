//! Errors and diagnostics.
//!
//! Encoding is strict and fails on the first unknown character. Decoding
//! and table building are lenient: problems are collected as warnings and
//! reports next to a usable result.

use core::fmt;

use thiserror::Error;

use crate::code::MorseCode;

/// A character with no entry in the forward table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no Morse code for {symbol:?} at position {position}")]
pub struct UnknownSymbolError {
    /// Offending character as it appears in the input
    pub symbol: char,
    /// Character position in the input text
    pub position: usize,
}

/// Table construction failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    /// A layer entry whose code is not a valid Morse code string
    #[error("invalid Morse code {code:?} for symbol {symbol:?} in layer {layer}")]
    InvalidCode {
        /// Layer the entry came from
        layer: String,
        /// Symbol being registered
        symbol: char,
        /// Rejected code text
        code: String,
    },
}

/// A decoded token with no entry in the reverse table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTokenWarning {
    /// Token text after dot normalization
    pub token: String,
    /// Zero-based index of the token among the code groups of the input
    pub index: usize,
}

impl fmt::Display for UnknownTokenWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown Morse token {:?} at group {}", self.token, self.index)
    }
}

/// Two symbols registered with the same code.
///
/// The reverse table resolves `code` to `kept`; `displaced` can still be
/// encoded but no longer decodes back to itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionReport {
    /// Shared code
    pub code: MorseCode,
    /// Symbol the reverse table resolves the code to
    pub kept: char,
    /// Symbol that lost the reverse mapping
    pub displaced: char,
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code {:?} shared by {:?} and {:?}, decodes to {:?}",
            self.code.as_str(),
            self.displaced,
            self.kept,
            self.kept
        )
    }
}
