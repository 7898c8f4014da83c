use thiserror::Error;

use crate::ring::Digit;

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Error, Debug)]
pub enum RingError {
    #[error("Invalid decimal string: `{0}`")]
    InvalidFormat(String),

    #[error("Digit {value} out of range for base {base}")]
    InvalidDigit { value: Digit, base: u8 },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No element returned by the cursor since its last structural change")]
    IllegalState,

    #[error("Division by zero in residue")]
    DivisionByZero,

    #[error("Invalid base {0}: must be at least 2")]
    InvalidBase(u8),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cannot render report: {0}")]
    Report(#[from] toml::ser::Error),
}
