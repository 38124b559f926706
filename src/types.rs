//! Fundamental data types used throughout brainleaf

use std::{
    fmt::Display,
    num::Wrapping,
    ops::{Add, AddAssign, Sub, SubAssign},
};
use thiserror::Error;

/// Error type for TapeAddr operations
#[derive(Debug, Clone, Copy, Error, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TapeAddrError {
    /// The tape pointer moved before the first cell.
    #[error("Tape pointer moved too far left (before start of tape)")]
    TapeAddrIsNegative,
    /// The tape pointer moved past the last cell.
    #[error("Tape pointer moved too far to the right")]
    TapeAddrTooLarge,
}

/// Newtype for the tape pointer.
///
/// A `TapeAddr` can only be moved with the checked shift functions, so a
/// value handed out by the interpreter always refers to a cell on the tape.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TapeAddr(usize);

impl TapeAddr {
    pub fn new(val: usize) -> Self {
        Self(val)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Move `n` cells to the left.
    pub fn shift_left(self, n: usize) -> Result<Self, TapeAddrError> {
        self.0
            .checked_sub(n)
            .map(Self)
            .ok_or(TapeAddrError::TapeAddrIsNegative)
    }

    /// Move `n` cells to the right on a tape of `len` cells.
    pub fn shift_right(self, n: usize, len: usize) -> Result<Self, TapeAddrError> {
        match self.0.checked_add(n) {
            Some(addr) if addr < len => Ok(Self(addr)),
            _ => Err(TapeAddrError::TapeAddrTooLarge),
        }
    }
}

impl From<usize> for TapeAddr {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<TapeAddr> for usize {
    fn from(value: TapeAddr) -> Self {
        value.0
    }
}

impl Display for TapeAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A BF number (u8 with wrapping semantics).
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BfNum(Wrapping<u8>);

impl BfNum {
    pub fn is_zero(&self) -> bool {
        self.0 .0 == 0
    }
}

impl Add for BfNum {
    type Output = BfNum;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for BfNum {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for BfNum {
    type Output = BfNum;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for BfNum {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<u8> for BfNum {
    fn from(value: u8) -> Self {
        Self(Wrapping(value))
    }
}

/// Repeat counts reduce modulo 256, which is what applying `+` that many
/// times to a cell amounts to.
impl From<usize> for BfNum {
    fn from(value: usize) -> Self {
        Self(Wrapping((value % 256) as u8))
    }
}

impl From<BfNum> for u8 {
    fn from(value: BfNum) -> Self {
        value.0 .0
    }
}

impl Display for BfNum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
