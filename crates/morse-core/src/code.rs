//! Morse code strings.
//!
//! A [`MorseCode`] is a short sequence of dot and dash elements stored
//! inline, so table entries need no heap allocation of their own.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use crate::config::{DASH, DOT, MAX_CODE_LEN, SYMBOL_SEPARATOR};

/// A validated Morse code for one symbol.
///
/// Contains only `.`, `-` and space. A code made only of spaces is a blank
/// filler (the word space); every other code has at least one element.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MorseCode(heapless::String<MAX_CODE_LEN>);

impl MorseCode {
    /// Parse a code string.
    ///
    /// Returns `None` if the string is empty, longer than
    /// [`MAX_CODE_LEN`], or contains anything other than dots, dashes
    /// and spaces. Spaces are allowed either as the whole code (a blank
    /// filler) or singly between elements, never at either end.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        if code.is_empty() || !code.chars().all(is_code_char) {
            return None;
        }

        let blank = code.chars().all(|c| c == SYMBOL_SEPARATOR);
        let spaced_ok = !code.starts_with(SYMBOL_SEPARATOR)
            && !code.ends_with(SYMBOL_SEPARATOR)
            && !code.contains("  ");
        if !blank && !spaced_ok {
            return None;
        }

        let mut inner = heapless::String::new();
        inner.push_str(code).ok()?;
        Some(Self(inner))
    }

    /// Code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the code
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a parsed code
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for a filler code with no dot or dash elements
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.chars().all(|c| c == SYMBOL_SEPARATOR)
    }

    /// Number of dot and dash elements
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.0.chars().filter(|&c| c == DOT || c == DASH).count()
    }
}

const fn is_code_char(c: char) -> bool {
    matches!(c, DOT | DASH | SYMBOL_SEPARATOR)
}

// Ordering follows the string so that `Borrow<str>` lookups agree with it.
impl PartialOrd for MorseCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MorseCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Borrow<str> for MorseCode {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for MorseCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for MorseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MorseCode({:?})", self.as_str())
    }
}

impl fmt::Display for MorseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert_eq!(MorseCode::parse(".-").unwrap().as_str(), ".-");
        assert_eq!(MorseCode::parse("--..--").unwrap().len(), 6);
        assert!(MorseCode::parse("  ").unwrap().is_blank());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(MorseCode::parse("").is_none());
        assert!(MorseCode::parse(".-x").is_none());
        assert!(MorseCode::parse("·-").is_none());
        assert!(MorseCode::parse(".........").is_none());
    }

    #[test]
    fn parse_rejects_misplaced_spaces() {
        assert!(MorseCode::parse(" . ").is_none());
        assert!(MorseCode::parse(".  -").is_none());
        assert!(MorseCode::parse(" -").is_none());
        assert!(MorseCode::parse(".- ").is_none());
        assert!(MorseCode::parse(". -").is_some());
        assert!(MorseCode::parse(" ").unwrap().is_blank());
    }

    #[test]
    fn element_count_ignores_spaces() {
        let code = MorseCode::parse(".- -").unwrap();
        assert_eq!(code.element_count(), 3);
        assert!(!code.is_blank());
    }

    #[test]
    fn ordering_matches_str() {
        let a = MorseCode::parse("-").unwrap();
        let b = MorseCode::parse(".").unwrap();
        assert_eq!(a.cmp(&b), "-".cmp("."));
    }
}
