//! Circular singly linked list of digits.
//!
//! Nodes live in a [`Slab`] and link to each other by slab key. The tail
//! always links back to the head, so a single node links to itself.
use std::{fmt, iter::FusedIterator, str::FromStr};

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{ser::SerializeStruct, Serialize};
use slab::Slab;

use crate::{
    codec::{decode_iter, encode, parse_decimal, DigitSource},
    cursor::Cursor,
    error::{Result, RingError},
};

pub type Digit = u8;

pub const DEFAULT_BASE: u8 = 3;
pub const SCALE_BASE: u8 = 8;

#[derive(Debug, Clone)]
struct Node {
    value: Digit,
    next: usize,
}

/// Digits most significant first, each in `[0, base)`.
///
/// There is no cached tail: appending, inserting or removing at index 0 and
/// [`DigitRing::shift_right`] walk the whole ring to find it.
#[derive(Clone)]
pub struct DigitRing {
    nodes: Slab<Node>,
    head: Option<usize>,
    base: u8,
}

impl Default for DigitRing {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            base: DEFAULT_BASE,
        }
    }
}

impl DigitRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: u8) -> Result<Self> {
        check_base(base)?;
        Ok(Self::empty(base))
    }

    fn empty(base: u8) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Build from a value without validating digits; `base` must be valid.
    fn encoded(value: &BigUint, base: u8) -> Self {
        let mut ring = Self::empty(base);
        for digit in encode(value, base) {
            ring.link_tail(digit);
        }
        ring
    }

    /// Seed from a decimal numeral in the default base.
    pub fn from_decimal(str: &str) -> Result<Self> {
        Self::from_decimal_with_base(str, DEFAULT_BASE)
    }

    /// Empty input gives an empty ring, zero gives `[0]`.
    pub fn from_decimal_with_base(str: &str, base: u8) -> Result<Self> {
        let mut ring = Self::with_base(base)?;
        if let Some(value) = parse_decimal(str)? {
            ring.push_all(encode(&value, base))?;
        }
        debug!("Seeded {ring} from `{}`.", str.trim());
        Ok(ring)
    }

    pub fn from_value(value: &BigUint, base: u8) -> Result<Self> {
        let mut ring = Self::with_base(base)?;
        ring.push_all(encode(value, base))?;
        Ok(ring)
    }

    pub fn from_digits<I>(base: u8, digits: I) -> Result<Self>
    where
        I: IntoIterator<Item = Digit>,
    {
        let mut ring = Self::with_base(base)?;
        ring.push_all(digits)?;
        Ok(ring)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn base(&self) -> u8 {
        self.base
    }

    pub fn get(&self, index: usize) -> Result<Digit> {
        let key = self.locate(index)?;
        Ok(self.nodes[key].value)
    }

    pub fn contains(&self, value: Digit) -> bool {
        self.iter().any(|digit| digit == value)
    }

    pub fn contains_all(&self, values: &[Digit]) -> bool {
        values.iter().all(|value| self.contains(*value))
    }

    pub fn index_of(&self, value: Digit) -> Option<usize> {
        self.iter().position(|digit| digit == value)
    }

    pub fn last_index_of(&self, value: Digit) -> Option<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, digit)| *digit == value)
            .map(|(index, _)| index)
            .last()
    }

    pub fn to_vec(&self) -> Vec<Digit> {
        self.iter().collect()
    }

    /// Append at the tail, walking from the head to find it.
    pub fn push(&mut self, value: Digit) -> Result<()> {
        self.insert(self.len(), value)
    }

    /// Insert before `index`. `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: Digit) -> Result<()> {
        self.check_digit(value)?;
        let len = self.len();
        if index > len {
            return Err(RingError::IndexOutOfRange { index, len });
        }
        let Some(head) = self.head else {
            let entry = self.nodes.vacant_entry();
            let key = entry.key();
            entry.insert(Node { value, next: key });
            self.head = Some(key);
            return Ok(());
        };
        if index == 0 {
            // The tail must follow whichever node is the head.
            let tail = self.walk(head, len - 1);
            let key = self.nodes.insert(Node { value, next: head });
            self.nodes[tail].next = key;
            self.head = Some(key);
        } else {
            let prev = self.walk(head, index - 1);
            let next = self.nodes[prev].next;
            let key = self.nodes.insert(Node { value, next });
            self.nodes[prev].next = key;
        }
        Ok(())
    }

    /// Return the digit previously at `index`.
    pub fn set(&mut self, index: usize, value: Digit) -> Result<Digit> {
        self.check_digit(value)?;
        let key = self.locate(index)?;
        Ok(std::mem::replace(&mut self.nodes[key].value, value))
    }

    pub fn remove(&mut self, index: usize) -> Result<Digit> {
        let len = self.len();
        let Some(head) = self.head.filter(|_| index < len) else {
            return Err(RingError::IndexOutOfRange { index, len });
        };
        if len == 1 {
            let node = self.nodes.remove(head);
            self.head = None;
            return Ok(node.value);
        }
        if index == 0 {
            let tail = self.walk(head, len - 1);
            let node = self.nodes.remove(head);
            self.nodes[tail].next = node.next;
            self.head = Some(node.next);
            Ok(node.value)
        } else {
            let prev = self.walk(head, index - 1);
            let key = self.nodes[prev].next;
            let node = self.nodes.remove(key);
            self.nodes[prev].next = node.next;
            Ok(node.value)
        }
    }

    /// Remove the first occurrence of `value`.
    pub fn remove_value(&mut self, value: Digit) -> bool {
        match self.index_of(value) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    /// Exchange the digits at `i` and `j`; nodes stay where they are.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let a = self.locate(i)?;
        let b = self.locate(j)?;
        if a != b {
            let value = self.nodes[a].value;
            self.nodes[a].value = self.nodes[b].value;
            self.nodes[b].value = value;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    /// # Return
    /// Whether any digit was appended.
    pub fn push_all<I>(&mut self, digits: I) -> Result<bool>
    where
        I: IntoIterator<Item = Digit>,
    {
        let mut changed = false;
        for digit in digits {
            self.push(digit)?;
            changed = true;
        }
        Ok(changed)
    }

    /// Insert `digits` contiguously starting at `index`, in source order.
    pub fn insert_all<I>(&mut self, index: usize, digits: I) -> Result<bool>
    where
        I: IntoIterator<Item = Digit>,
    {
        let len = self.len();
        if index > len {
            return Err(RingError::IndexOutOfRange { index, len });
        }
        let mut changed = false;
        for (offset, digit) in digits.into_iter().enumerate() {
            self.insert(index + offset, digit)?;
            changed = true;
        }
        Ok(changed)
    }

    /// Remove every digit found in `values`.
    pub fn remove_all(&mut self, values: &[Digit]) -> bool {
        self.retain(|digit| !values.contains(&digit))
    }

    /// Remove every digit not found in `values`.
    pub fn retain_all(&mut self, values: &[Digit]) -> bool {
        self.retain(|digit| values.contains(&digit))
    }

    fn retain(&mut self, mut keep: impl FnMut(Digit) -> bool) -> bool {
        let mut changed = false;
        let mut index = 0;
        while let Ok(digit) = self.get(index) {
            if keep(digit) {
                index += 1;
                continue;
            }
            match self.remove(index) {
                Ok(_) => changed = true,
                Err(_) => break,
            }
        }
        changed
    }

    /// Copy of `[from, to)` in the same base.
    pub fn sublist(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        if to > len {
            return Err(RingError::IndexOutOfRange { index: to, len });
        }
        if from > to {
            return Err(RingError::IndexOutOfRange { index: from, len });
        }
        let mut sub = Self::with_base(self.base)?;
        sub.push_all(self.iter().skip(from).take(to - from))?;
        Ok(sub)
    }

    pub fn sort_ascending(&mut self) {
        self.bubble_sort(|a, b| a > b);
    }

    pub fn sort_descending(&mut self) {
        self.bubble_sort(|a, b| a < b);
    }

    /// Adjacent swaps along the `next` chain until a pass swaps nothing.
    /// Each pass stops at the tail instead of wrapping to the head.
    fn bubble_sort(&mut self, out_of_order: impl Fn(Digit, Digit) -> bool) {
        let Some(head) = self.head else {
            return;
        };
        let mut passes = 0;
        loop {
            passes += 1;
            let mut swapped = false;
            let mut key = head;
            for _ in 1..self.len() {
                let next = self.nodes[key].next;
                let (a, b) = (self.nodes[key].value, self.nodes[next].value);
                if out_of_order(a, b) {
                    self.nodes[key].value = b;
                    self.nodes[next].value = a;
                    swapped = true;
                }
                key = next;
            }
            if !swapped {
                break;
            }
        }
        trace!("Sorted {} digits in {passes} passes.", self.len());
    }

    /// Index 0 becomes the last index. O(1).
    pub fn shift_left(&mut self) {
        if self.len() <= 1 {
            return;
        }
        if let Some(head) = self.head {
            self.head = Some(self.nodes[head].next);
            trace!("Shifted left: {self}.");
        }
    }

    /// The last index becomes index 0. Walks to the tail.
    pub fn shift_right(&mut self) {
        if self.len() <= 1 {
            return;
        }
        if let Some(head) = self.head {
            self.head = Some(self.walk(head, self.len() - 1));
            trace!("Shifted right: {self}.");
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            ring: self,
            key: self.head,
            remaining: self.len(),
        }
    }

    /// Cursor positioned before `index`; `index == len()` starts at the end.
    pub fn cursor(&mut self, index: usize) -> Result<Cursor<'_>> {
        Cursor::new(self, index)
    }

    pub fn to_biguint(&self) -> BigUint {
        decode_iter(self.iter(), self.base.into())
    }

    /// Canonical decimal rendering; an empty ring reads as `0`.
    pub fn to_decimal_string(&self) -> String {
        self.to_biguint().to_str_radix(10)
    }

    /// TOML rendering of base, decimal value and digits.
    pub fn to_report(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Same value in base [`SCALE_BASE`]. `self` is left untouched.
    pub fn change_scale(&self) -> Self {
        self.rescaled(SCALE_BASE)
    }

    pub fn change_scale_to(&self, base: u8) -> Result<Self> {
        check_base(base)?;
        Ok(self.rescaled(base))
    }

    fn rescaled(&self, base: u8) -> Self {
        let value = self.to_biguint();
        debug!("Rescaling {value} from base {} to base {base}.", self.base);
        Self::encoded(&value, base)
    }

    /// `self mod divisor`, re-encoded in `self`'s base.
    ///
    /// The divisor is read in [`DigitSource::radix`]: its own base for a
    /// [`DigitRing`], but base 10 for any other source.
    pub fn residue<S>(&self, divisor: &S) -> Result<Self>
    where
        S: DigitSource + ?Sized,
    {
        let divisor = divisor.value()?;
        if divisor.is_zero() {
            return Err(RingError::DivisionByZero);
        }
        let dividend = self.to_biguint();
        let remainder = &dividend % &divisor;
        debug!("{dividend} mod {divisor} = {remainder}.");
        Ok(Self::encoded(&remainder, self.base))
    }

    fn link_tail(&mut self, value: Digit) {
        let len = self.len();
        match self.head {
            None => {
                let entry = self.nodes.vacant_entry();
                let key = entry.key();
                entry.insert(Node { value, next: key });
                self.head = Some(key);
            }
            Some(head) => {
                let tail = self.walk(head, len - 1);
                let key = self.nodes.insert(Node { value, next: head });
                self.nodes[tail].next = key;
            }
        }
    }

    fn check_digit(&self, value: Digit) -> Result<()> {
        if value >= self.base {
            return Err(RingError::InvalidDigit {
                value,
                base: self.base,
            });
        }
        Ok(())
    }

    /// Slab key of the node at `index`.
    fn locate(&self, index: usize) -> Result<usize> {
        let len = self.len();
        match self.head {
            Some(head) if index < len => Ok(self.walk(head, index)),
            _ => Err(RingError::IndexOutOfRange { index, len }),
        }
    }

    fn walk(&self, from: usize, hops: usize) -> usize {
        let mut key = from;
        for _ in 0..hops {
            key = self.nodes[key].next;
        }
        key
    }

    /// Hops from the head until the head comes around again.
    #[cfg(test)]
    pub(crate) fn cycle_len(&self) -> usize {
        let Some(head) = self.head else {
            return 0;
        };
        let mut key = self.nodes[head].next;
        let mut hops = 1;
        while key != head && hops <= self.nodes.len() {
            key = self.nodes[key].next;
            hops += 1;
        }
        hops
    }
}

fn check_base(base: u8) -> Result<()> {
    if base < 2 {
        return Err(RingError::InvalidBase(base));
    }
    Ok(())
}

impl FromStr for DigitRing {
    type Err = RingError;

    fn from_str(str: &str) -> Result<Self> {
        Self::from_decimal(str)
    }
}

impl DigitSource for DigitRing {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn digit(&self, index: usize) -> Result<Digit> {
        self.get(index)
    }

    fn radix(&self) -> u32 {
        self.base.into()
    }

    fn value(&self) -> Result<BigUint> {
        Ok(self.to_biguint())
    }
}

/// Length and digits only; the base is not compared.
impl PartialEq for DigitRing {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DigitRing {}

impl fmt::Display for DigitRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        f.write_str("[")?;
        for (index, digit) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{digit}")?;
        }
        write!(f, "] base={}", self.base)
    }
}

impl fmt::Debug for DigitRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitRing")
            .field("base", &self.base)
            .field("digits", &self.to_vec())
            .finish()
    }
}

impl Serialize for DigitRing {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_struct("ring", 3)?;
        seq.serialize_field("base", &self.base)?;
        seq.serialize_field("decimal", &self.to_decimal_string())?;
        seq.serialize_field("digits", &self.to_vec())?;
        seq.end()
    }
}

impl<'a> IntoIterator for &'a DigitRing {
    type Item = Digit;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator in logical order. Not restartable.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    ring: &'a DigitRing,
    key: Option<usize>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.ring.nodes[self.key?];
        self.key = Some(node.next);
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
