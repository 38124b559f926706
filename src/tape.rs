//! The BF tape

use crate::{BfNum, TapeAddr, TapeAddrError};

/// Number of cells on the tape.
pub const TAPE_LEN: usize = 30000;

/// A tape with a fixed number of cells, all zero on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTape {
    data: Box<[BfNum]>,
}

impl FixedTape {
    pub fn new() -> Self {
        Self {
            data: vec![BfNum::default(); TAPE_LEN].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.data.fill(BfNum::default());
    }

    pub fn try_get(&self, offset: TapeAddr) -> Result<BfNum, TapeAddrError> {
        self.data
            .get(usize::from(offset))
            .copied()
            .ok_or(TapeAddrError::TapeAddrTooLarge)
    }

    pub fn try_set(&mut self, offset: TapeAddr, value: BfNum) -> Result<(), TapeAddrError> {
        *self.cell_mut(offset)? = value;
        Ok(())
    }

    pub fn try_modify(&mut self, offset: TapeAddr, diff: BfNum) -> Result<(), TapeAddrError> {
        *self.cell_mut(offset)? += diff;
        Ok(())
    }

    /// Cells up to and including the last non-zero one.
    pub fn used(&self) -> &[BfNum] {
        let end = self
            .data
            .iter()
            .rposition(|cell| !cell.is_zero())
            .map_or(0, |idx| idx + 1);
        &self.data[..end]
    }

    fn cell_mut(&mut self, offset: TapeAddr) -> Result<&mut BfNum, TapeAddrError> {
        self.data
            .get_mut(usize::from(offset))
            .ok_or(TapeAddrError::TapeAddrTooLarge)
    }
}

impl Default for FixedTape {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedTape, TAPE_LEN};
    use crate::{BfNum, TapeAddr, TapeAddrError};

    #[test]
    fn test_fixed_tape() {
        let mut tape = FixedTape::new();
        assert_eq!(tape.len(), TAPE_LEN);
        assert!(tape.used().is_empty());

        tape.try_set(TapeAddr::new(2), 5u8.into()).unwrap();
        assert_eq!(tape.try_get(TapeAddr::new(2)), Ok(5u8.into()));
        tape.try_modify(TapeAddr::new(2), 255u8.into()).unwrap();
        assert_eq!(tape.try_get(TapeAddr::new(2)), Ok(4u8.into()));
        tape.try_modify(TapeAddr::new(8), 200u8.into()).unwrap();
        assert_eq!(tape.used().len(), 9);

        assert_eq!(
            tape.try_get(TapeAddr::new(TAPE_LEN)),
            Err(TapeAddrError::TapeAddrTooLarge)
        );
        assert_eq!(
            tape.try_set(TapeAddr::new(TAPE_LEN), BfNum::from(1u8)),
            Err(TapeAddrError::TapeAddrTooLarge)
        );

        tape.clear();
        assert!(tape.used().is_empty());
    }
}
