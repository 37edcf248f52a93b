//! Translation tables.
//!
//! The forward table maps symbols to codes and is merged from ordered
//! layers: letters, digits, punctuation, then other (the word space). A
//! later layer overwrites an earlier one on the same symbol. The reverse
//! table is the inverse, built by walking the forward table in
//! registration order, so which symbol keeps a shared code is decided by
//! [`CollisionPolicy`] and never by map iteration order.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::code::MorseCode;
use crate::config::WORD_FILLER;
use crate::error::{CollisionReport, TableError};

/// Letter layer (ITU-R M.1677-1, part I, section 1.1.1).
///
/// The accented e has its own code and rides along with the letters.
pub static LETTERS: &[(char, &str)] = &[
    ('a', ".-"),
    ('b', "-..."),
    ('c', "-.-."),
    ('d', "-.."),
    ('e', "."),
    ('é', "..-.."),
    ('f', "..-."),
    ('g', "--."),
    ('h', "...."),
    ('i', ".."),
    ('j', ".---"),
    ('k', "-.-"),
    ('l', ".-.."),
    ('m', "--"),
    ('n', "-."),
    ('o', "---"),
    ('p', ".--."),
    ('q', "--.-"),
    ('r', ".-."),
    ('s', "..."),
    ('t', "-"),
    ('u', "..-"),
    ('v', "...-"),
    ('w', ".--"),
    ('x', "-..-"),
    ('y', "-.--"),
    ('z', "--.."),
];

/// Punctuation layer (ITU-R M.1677-1, part I, section 1.1.3).
pub static PUNCTUATION: &[(char, &str)] = &[
    ('.', ".-.-.-"),
    (',', "--..--"),
    (':', "---..."),
    ('?', "..--.."),
    ('\'', ".----."),
    ('-', "-....-"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('"', ".-..-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('@', ".--.-."),
];

/// Number of elements in every digit code
const DIGIT_ELEMENTS: usize = 5;

/// Code for a decimal digit.
///
/// Digits 1 to 5 are `n` dots padded with dashes; 6 to 9 are `n - 5`
/// dashes padded with dots. Zero continues the second run as ten: five
/// dashes.
///
/// Returns `None` for values above 9.
#[must_use]
pub fn digit_code(digit: u32) -> Option<String> {
    let n = match digit {
        0 => 10,
        1..=9 => digit as usize,
        _ => return None,
    };

    let code = if n <= DIGIT_ELEMENTS {
        ".".repeat(n) + &"-".repeat(DIGIT_ELEMENTS - n)
    } else {
        "-".repeat(n - DIGIT_ELEMENTS) + &".".repeat(2 * DIGIT_ELEMENTS - n)
    };
    Some(code)
}

/// Which symbol the reverse table keeps when several share a code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The symbol registered last keeps the code
    #[default]
    LastWins,
    /// The symbol registered first keeps the code
    FirstWins,
}

/// A named, ordered set of symbol entries merged into the forward table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolLayer {
    name: String,
    entries: Vec<(char, String)>,
}

impl SymbolLayer {
    /// Create an empty layer
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Create a layer from `(symbol, code)` pairs
    pub fn with_entries<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(symbol, code)| (symbol, code.into()))
                .collect(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, symbol: char, code: impl Into<String>) {
        self.entries.push((symbol, code.into()));
    }

    /// Layer name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the layer has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical letters a to z plus é
    #[must_use]
    pub fn letters() -> Self {
        Self::with_entries("letters", LETTERS.iter().copied())
    }

    /// Canonical digits, generated
    #[must_use]
    pub fn digits() -> Self {
        Self::with_entries(
            "digits",
            (0..=9).filter_map(|d| {
                let symbol = char::from_digit(d, 10)?;
                Some((symbol, digit_code(d)?))
            }),
        )
    }

    /// Canonical punctuation
    #[must_use]
    pub fn punctuation() -> Self {
        Self::with_entries("punctuation", PUNCTUATION.iter().copied())
    }

    /// Everything else: currently only the word space
    #[must_use]
    pub fn other() -> Self {
        Self::with_entries("other", [(' ', WORD_FILLER)])
    }
}

/// Symbol to code mapping, in registration order.
#[derive(Clone, Debug, Default)]
pub struct ForwardTable {
    entries: Vec<(char, MorseCode)>,
    index: BTreeMap<char, usize>,
}

impl ForwardTable {
    /// Code for a symbol
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&MorseCode> {
        self.index.get(&symbol).map(|&i| &self.entries[i].1)
    }

    /// True if the symbol has a code
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Number of symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no symbols are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order their symbols were first registered
    pub fn iter(&self) -> impl Iterator<Item = (char, &MorseCode)> {
        self.entries.iter().map(|(symbol, code)| (*symbol, code))
    }

    /// Insert or overwrite, keeping the first registration position.
    /// Returns the replaced code.
    fn insert(&mut self, symbol: char, code: MorseCode) -> Option<MorseCode> {
        if let Some(&i) = self.index.get(&symbol) {
            return Some(core::mem::replace(&mut self.entries[i].1, code));
        }
        self.index.insert(symbol, self.entries.len());
        self.entries.push((symbol, code));
        None
    }
}

/// Code to symbol mapping.
#[derive(Clone, Debug, Default)]
pub struct ReverseTable {
    entries: BTreeMap<MorseCode, char>,
}

impl ReverseTable {
    /// Symbol for a code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<char> {
        self.entries.get(code).copied()
    }

    /// Number of codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no codes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by code
    pub fn iter(&self) -> impl Iterator<Item = (&MorseCode, char)> {
        self.entries.iter().map(|(code, symbol)| (code, *symbol))
    }

    fn invert(forward: &ForwardTable, policy: CollisionPolicy) -> Self {
        let mut entries = BTreeMap::new();
        for (symbol, code) in forward.iter() {
            match policy {
                CollisionPolicy::LastWins => {
                    entries.insert(code.clone(), symbol);
                }
                CollisionPolicy::FirstWins => {
                    entries.entry(code.clone()).or_insert(symbol);
                }
            }
        }
        Self { entries }
    }
}

/// Forward and reverse tables with the diagnostics from building them.
///
/// Immutable once built; share by reference.
#[derive(Clone, Debug)]
pub struct Tables {
    forward: ForwardTable,
    reverse: ReverseTable,
    collisions: Vec<CollisionReport>,
    overrides: usize,
}

impl Tables {
    /// Symbol to code table
    #[must_use]
    pub fn forward(&self) -> &ForwardTable {
        &self.forward
    }

    /// Code to symbol table
    #[must_use]
    pub fn reverse(&self) -> &ReverseTable {
        &self.reverse
    }

    /// Symbols that lost their reverse mapping to another symbol
    #[must_use]
    pub fn collisions(&self) -> &[CollisionReport] {
        &self.collisions
    }

    /// Number of forward entries a later layer overwrote with a different code
    #[must_use]
    pub fn overrides(&self) -> usize {
        self.overrides
    }

    /// True if every symbol decodes back to itself
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Split into `(forward, reverse, collisions)`
    #[must_use]
    pub fn into_parts(self) -> (ForwardTable, ReverseTable, Vec<CollisionReport>) {
        (self.forward, self.reverse, self.collisions)
    }
}

/// Merges symbol layers into [`Tables`].
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    layers: Vec<SymbolLayer>,
    policy: CollisionPolicy,
}

impl TableBuilder {
    /// Builder with no layers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with letters, digits, punctuation and other
    #[must_use]
    pub fn canonical() -> Self {
        Self::new()
            .layer(SymbolLayer::letters())
            .layer(SymbolLayer::digits())
            .layer(SymbolLayer::punctuation())
            .layer(SymbolLayer::other())
    }

    /// Append a layer; it overrides all earlier layers on shared symbols
    #[must_use]
    pub fn layer(mut self, layer: SymbolLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the reverse-table collision policy
    #[must_use]
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Merge the layers, invert, and validate.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCode`] if any entry's code is empty,
    /// too long, or contains characters other than dots, dashes and spaces.
    /// Collisions are not errors; they are returned in
    /// [`Tables::collisions`].
    pub fn build(self) -> Result<Tables, TableError> {
        let mut forward = ForwardTable::default();
        let mut overrides = 0;

        for layer in &self.layers {
            for (symbol, raw) in &layer.entries {
                let code = MorseCode::parse(raw).ok_or_else(|| TableError::InvalidCode {
                    layer: layer.name.clone(),
                    symbol: *symbol,
                    code: raw.clone(),
                })?;

                if let Some(old) = forward.insert(*symbol, code) {
                    if old.as_str() != raw {
                        overrides += 1;
                        tracing::debug!(
                            "Layer {} overrides {:?}: {} -> {}",
                            layer.name,
                            symbol,
                            old,
                            raw
                        );
                    }
                }
            }
            tracing::debug!("Merged layer {} ({} entries)", layer.name, layer.len());
        }

        let reverse = ReverseTable::invert(&forward, self.policy);
        let collisions = validate(&forward, &reverse);
        for collision in &collisions {
            tracing::warn!("Morse table collision: {}", collision);
        }

        tracing::debug!(
            "Built tables: {} symbols, {} codes, {} collisions",
            forward.len(),
            reverse.len(),
            collisions.len()
        );

        Ok(Tables {
            forward,
            reverse,
            collisions,
            overrides,
        })
    }
}

/// Check that the reverse table maps every forward code back to its symbol.
///
/// Returns one report per symbol whose code resolves to a different symbol.
#[must_use]
pub fn validate(forward: &ForwardTable, reverse: &ReverseTable) -> Vec<CollisionReport> {
    let mut reports = Vec::new();
    for (symbol, code) in forward.iter() {
        match reverse.get(code.as_str()) {
            Some(kept) if kept != symbol => reports.push(CollisionReport {
                code: code.clone(),
                kept,
                displaced: symbol,
            }),
            Some(_) => {}
            None => tracing::debug!("Code {} for {:?} missing from reverse table", code, symbol),
        }
    }
    reports
}

/// Build the canonical tables.
///
/// # Errors
///
/// Fails only if the canonical data holds a malformed code.
pub fn build_tables() -> Result<Tables, TableError> {
    TableBuilder::canonical().build()
}

static SHARED: Lazy<Result<Tables, TableError>> = Lazy::new(build_tables);

/// Canonical tables, built on first use and shared for the process lifetime.
///
/// # Errors
///
/// Same as [`build_tables`].
pub fn shared() -> Result<&'static Tables, TableError> {
    SHARED.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_codes_follow_itu_pattern() {
        let expected = [
            "-----", ".----", "..---", "...--", "....-", ".....", "-....", "--...", "---..",
            "----.",
        ];
        for (d, code) in expected.iter().enumerate() {
            assert_eq!(digit_code(d as u32).as_deref(), Some(*code), "digit {d}");
        }
        assert!(digit_code(10).is_none());
    }

    #[test]
    fn canonical_layer_sizes() {
        assert_eq!(SymbolLayer::letters().len(), 27);
        assert_eq!(SymbolLayer::digits().len(), 10);
        assert_eq!(SymbolLayer::punctuation().len(), 13);
        assert_eq!(SymbolLayer::other().len(), 1);
    }

    #[test]
    fn canonical_tables_are_bijective() {
        let tables = build_tables().unwrap();
        assert!(tables.is_bijective(), "{:?}", tables.collisions());
        assert_eq!(tables.forward().len(), 51);
        assert_eq!(tables.reverse().len(), 51);
        assert_eq!(tables.overrides(), 0);
    }

    #[test]
    fn forward_keeps_registration_order() {
        let tables = build_tables().unwrap();
        let first: Vec<char> = tables.forward().iter().map(|(s, _)| s).take(6).collect();
        assert_eq!(first, vec!['a', 'b', 'c', 'd', 'e', 'é']);
        let (last, code) = tables.forward().iter().last().unwrap();
        assert_eq!(last, ' ');
        assert!(code.is_blank());
    }

    #[test]
    fn later_layer_overrides_symbol() {
        let tables = TableBuilder::new()
            .layer(SymbolLayer::with_entries("base", [('a', ".-"), ('b', "-...")]))
            .layer(SymbolLayer::with_entries("patch", [('a', ".-.-")]))
            .build()
            .unwrap();

        assert_eq!(tables.forward().get('a').unwrap().as_str(), ".-.-");
        assert_eq!(tables.reverse().get(".-.-"), Some('a'));
        assert_eq!(tables.reverse().get(".-"), None);
        assert_eq!(tables.overrides(), 1);
        assert!(tables.is_bijective());
    }

    #[test]
    fn identical_override_is_not_counted() {
        let tables = TableBuilder::new()
            .layer(SymbolLayer::with_entries("one", [('a', ".-")]))
            .layer(SymbolLayer::with_entries("two", [('a', ".-")]))
            .build()
            .unwrap();
        assert_eq!(tables.overrides(), 0);
    }

    #[test]
    fn collision_last_wins() {
        let tables = TableBuilder::new()
            .layer(SymbolLayer::with_entries("test", [('x', "-..-"), ('×', "-..-")]))
            .build()
            .unwrap();

        assert_eq!(tables.reverse().get("-..-"), Some('×'));
        assert_eq!(
            tables.collisions(),
            &[CollisionReport {
                code: MorseCode::parse("-..-").unwrap(),
                kept: '×',
                displaced: 'x',
            }]
        );
    }

    #[test]
    fn collision_first_wins() {
        let tables = TableBuilder::new()
            .layer(SymbolLayer::with_entries("test", [('x', "-..-"), ('×', "-..-")]))
            .collision_policy(CollisionPolicy::FirstWins)
            .build()
            .unwrap();

        assert_eq!(tables.reverse().get("-..-"), Some('x'));
        assert_eq!(tables.collisions().len(), 1);
        assert_eq!(tables.collisions()[0].displaced, '×');
    }

    #[test]
    fn invalid_code_is_rejected() {
        let err = TableBuilder::new()
            .layer(SymbolLayer::with_entries("bad", [('q', "--x-")]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidCode {
                layer: "bad".into(),
                symbol: 'q',
                code: "--x-".into(),
            }
        );
    }

    #[test]
    fn shared_is_built_once() {
        let a = shared().unwrap();
        let b = shared().unwrap();
        assert!(core::ptr::eq(a, b));
    }
}
