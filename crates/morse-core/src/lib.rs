//! International Morse Code Translation
//!
//! Builds the bidirectional symbol table (character to dot/dash sequence and
//! back) from the ITU-R M.1677-1 letter, digit and punctuation sets, and
//! translates text to Morse and Morse back to text.
//!
//! # Features
//! - Canonical tables built once, immutable afterwards
//! - Collision detection between symbols sharing a code
//! - Strict encoding (unknown characters fail the call)
//! - Lenient decoding (unknown codes become a visible marker)
//! - Keying element expansion for tone generators
//!
//! # Example
//!
//! ```
//! use morse_core::Codec;
//!
//! let codec = Codec::new().unwrap();
//! let morse = codec.encode("SOS").unwrap();
//! assert_eq!(morse, "... --- ... ");
//! assert_eq!(codec.decode(&morse).text, "sos");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod codec;
pub mod config;
pub mod error;
pub mod keying;
pub mod table;

pub use code::MorseCode;
pub use codec::{decode, decode_with, encode, Codec, CodecConfig, Decoded, GapPolicy};
pub use error::{CollisionReport, TableError, UnknownSymbolError, UnknownTokenWarning};
pub use keying::Element;
pub use table::{
    build_tables, shared, validate, CollisionPolicy, ForwardTable, ReverseTable, SymbolLayer,
    TableBuilder, Tables,
};
