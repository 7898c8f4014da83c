//! Conversions between digit sequences and [`BigUint`].
//!
//! Everything here goes through [`DigitSource`], so the codec never sees how a
//! [`DigitRing`](crate::ring::DigitRing) stores its nodes.
use log::debug;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::{
    error::{Result, RingError},
    ring::Digit,
};

/// Anything exposing indexed digit access, most significant digit first.
///
/// # Radix
/// A source that does not override [`DigitSource::radix`] is read as
/// **base 10**, whatever digits it holds. [`DigitRing`](crate::ring::DigitRing)
/// overrides it with its own base. So `[1, 0]` as a plain slice means ten,
/// while a base-3 ring holding `[1, 0]` means three.
pub trait DigitSource {
    fn len(&self) -> usize;

    /// `Err(IndexOutOfRange)` unless `index < len()`.
    fn digit(&self, index: usize) -> Result<Digit>;

    fn radix(&self) -> u32 {
        10
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number these digits spell in [`DigitSource::radix`].
    fn value(&self) -> Result<BigUint> {
        decode(self, self.radix())
    }
}

impl DigitSource for [Digit] {
    fn len(&self) -> usize {
        <[Digit]>::len(self)
    }

    fn digit(&self, index: usize) -> Result<Digit> {
        self.get(index).copied().ok_or(RingError::IndexOutOfRange {
            index,
            len: <[Digit]>::len(self),
        })
    }
}

impl DigitSource for Vec<Digit> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn digit(&self, index: usize) -> Result<Digit> {
        self.as_slice().digit(index)
    }
}

/// Parse a decimal numeral with an optional leading `+`.
///
/// # Return
/// `Ok(None)` for empty or whitespace-only input.
///
/// `Err(InvalidFormat)` if anything but ASCII digits follows the sign.
pub fn parse_decimal(str: &str) -> Result<Option<BigUint>> {
    let trimmed = str.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RingError::InvalidFormat(trimmed.to_owned()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .map(Some)
        .ok_or_else(|| RingError::InvalidFormat(trimmed.to_owned()))
}

/// Horner evaluation of `source` in `radix`. An empty source is zero.
pub fn decode<S>(source: &S, radix: u32) -> Result<BigUint>
where
    S: DigitSource + ?Sized,
{
    let digits = (0..source.len())
        .map(|index| source.digit(index))
        .collect::<Result<Vec<_>>>()?;
    Ok(decode_iter(digits, radix))
}

pub fn decode_iter<I>(digits: I, radix: u32) -> BigUint
where
    I: IntoIterator<Item = Digit>,
{
    digits
        .into_iter()
        .fold(BigUint::zero(), |value, digit| value * radix + digit)
}

/// Repeated divide/remainder by `base`, most significant digit first.
/// Zero encodes as `[0]`.
pub fn encode(value: &BigUint, base: u8) -> Vec<Digit> {
    if value.is_zero() {
        return vec![0];
    }
    let divisor = BigUint::from(base);
    let mut rest = value.clone();
    let mut digits = Vec::new();
    while !rest.is_zero() {
        // Remainder is below `base`, so it always fits.
        let digit = (&rest % &divisor).to_u8().unwrap_or_default();
        digits.push(digit);
        rest /= &divisor;
    }
    digits.reverse();
    debug!("Encoded {value} into {} base-{base} digits.", digits.len());
    digits
}
