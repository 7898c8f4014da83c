//! Circular singly linked list of base-N digits.
//!
//! [`DigitRing`] is a full ordered list (random access, insertion, removal,
//! iteration, a mutating [`Cursor`]) and also a number: it converts to and
//! from decimal, changes scale, and computes residues through `num-bigint`.
//!
//! The `digit_ring` binary loads a decimal numeral from a file and applies
//! these operations from the command line.
pub mod codec;
pub mod config;
pub mod cursor;
pub mod error;
pub mod io;
pub mod ring;

pub use codec::DigitSource;
pub use config::RingConfig;
pub use cursor::Cursor;
pub use error::{Result, RingError};
pub use ring::{Digit, DigitRing};
