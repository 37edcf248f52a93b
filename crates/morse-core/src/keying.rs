//! Keying element expansion.
//!
//! Turns Morse text into the on/off element sequence a CW keyer or tone
//! generator would send. Timing is in dot units; converting units to time
//! is left to the caller.

use crate::codec::{segments, word_spaces, Segment};
use crate::config::{DASH, DOT, MID_DOT};

/// One keying element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Dot (1 unit, key down)
    Dit,
    /// Dash (3 units, key down)
    Dah,
    /// Gap between elements of one symbol (1 unit)
    ElementGap,
    /// Gap between symbols (3 units)
    CharGap,
    /// Gap between words (7 units)
    WordGap,
}

impl Element {
    /// Duration in dot units
    #[must_use]
    pub const fn units(&self) -> u32 {
        match self {
            Self::Dit | Self::ElementGap => 1,
            Self::Dah | Self::CharGap => 3,
            Self::WordGap => 7,
        }
    }

    /// Check if this element produces a tone
    #[must_use]
    pub const fn is_tone(&self) -> bool {
        matches!(self, Self::Dit | Self::Dah)
    }
}

/// Expand Morse text into keying elements.
///
/// Blank runs follow the decoder's [`crate::GapPolicy::Units`] reading: a
/// single space between codes is a character gap, wider runs are word
/// gaps, and the trailing separator left by the encoder adds nothing.
/// Characters other than dots, dashes and mid-dots are skipped.
#[must_use]
pub fn expand(morse: &str) -> Vec<Element> {
    let segments = segments(morse);
    let last = segments.len().saturating_sub(1);
    let mut out = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            Segment::Code(code) => {
                let tones = code.chars().filter_map(|c| match c {
                    DOT | MID_DOT => Some(Element::Dit),
                    DASH => Some(Element::Dah),
                    _ => None,
                });
                for (n, tone) in tones.enumerate() {
                    if n > 0 {
                        out.push(Element::ElementGap);
                    }
                    out.push(tone);
                }
            }
            Segment::Blank(width) => {
                let at_edge = i == 0 || i == last;
                match word_spaces(width, at_edge) {
                    0 if !at_edge => out.push(Element::CharGap),
                    n => out.extend(core::iter::repeat(Element::WordGap).take(n)),
                }
            }
        }
    }

    out
}

/// Total duration of an element sequence in dot units
#[must_use]
pub fn total_units(elements: &[Element]) -> u32 {
    elements.iter().map(Element::units).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Element::{CharGap, Dah, Dit, ElementGap, WordGap};

    #[test]
    fn element_units() {
        assert_eq!(Dit.units(), 1);
        assert_eq!(Dah.units(), 3);
        assert_eq!(ElementGap.units(), 1);
        assert_eq!(CharGap.units(), 3);
        assert_eq!(WordGap.units(), 7);
    }

    #[test]
    fn element_is_tone() {
        assert!(Dit.is_tone());
        assert!(Dah.is_tone());
        assert!(!ElementGap.is_tone());
        assert!(!CharGap.is_tone());
        assert!(!WordGap.is_tone());
    }

    #[test]
    fn expand_letter_a() {
        assert_eq!(expand(".- "), vec![Dit, ElementGap, Dah]);
    }

    #[test]
    fn expand_two_letters() {
        assert_eq!(expand("- -"), vec![Dah, CharGap, Dah]);
    }

    #[test]
    fn expand_word_gap() {
        assert_eq!(expand(".    - "), vec![Dit, WordGap, Dah]);
    }

    #[test]
    fn expand_accepts_mid_dot() {
        assert_eq!(expand("·-"), expand(".-"));
    }

    #[test]
    fn paris_is_fifty_units() {
        let elements = expand(".--. .- .-. .. ...    ");
        assert_eq!(elements.last(), Some(&WordGap));
        assert_eq!(total_units(&elements), 50);
    }
}
