use crate::{
    error::{Result, RingError},
    ring::{Digit, DigitRing},
};

/// Bidirectional cursor that can also edit the ring it walks.
///
/// The cursor sits between two digits, like a text caret. It holds the ring's
/// only mutable borrow, so the ring cannot change under it except through the
/// cursor itself. Every edit goes through the ring's index-based operations.
#[derive(Debug)]
pub struct Cursor<'a> {
    ring: &'a mut DigitRing,
    position: usize,
    last_returned: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(ring: &'a mut DigitRing, position: usize) -> Result<Self> {
        let len = ring.len();
        if position > len {
            return Err(RingError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        Ok(Self {
            ring,
            position,
            last_returned: None,
        })
    }

    pub fn has_next(&self) -> bool {
        self.position < self.ring.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Index of the digit `next` would return.
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// `None` at the start of the ring.
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    pub fn previous(&mut self) -> Option<Digit> {
        let index = self.position.checked_sub(1)?;
        let digit = self.ring.get(index).ok()?;
        self.position = index;
        self.last_returned = Some(index);
        Some(digit)
    }

    /// Remove the digit last returned by `next` or `previous`.
    pub fn remove(&mut self) -> Result<Digit> {
        let index = self.last_returned.take().ok_or(RingError::IllegalState)?;
        let digit = self.ring.remove(index)?;
        if index < self.position {
            self.position -= 1;
        }
        Ok(digit)
    }

    /// Replace the digit last returned by `next` or `previous`.
    pub fn set(&mut self, value: Digit) -> Result<Digit> {
        let index = self.last_returned.ok_or(RingError::IllegalState)?;
        self.ring.set(index, value)
    }

    /// Insert before the cursor and step past the new digit.
    pub fn add(&mut self, value: Digit) -> Result<()> {
        self.ring.insert(self.position, value)?;
        self.position += 1;
        self.last_returned = None;
        Ok(())
    }
}

impl Iterator for Cursor<'_> {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        let digit = self.ring.get(self.position).ok()?;
        self.last_returned = Some(self.position);
        self.position += 1;
        Some(digit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}
