use std::io::Read;

use crate::engine::{read_source, Engine, Registers};
use crate::error::EngineError;

/// Tape width used when none is given.
pub const DEFAULT_TAPE_WIDTH: usize = 256;

/// An engine with a tape of fixed width, set once at construction.
///
/// `<` and `>` are not bounds checked: the pointer moves with wrapping `usize`
/// arithmetic, so `<` at cell 0 leaves it at `usize::MAX`. Programs are
/// expected to stay on the tape. An instruction that touches the active cell
/// while the pointer is off the tape fails with
/// [`EngineError::IndexOutOfRange`].
#[derive(Debug, Clone)]
pub struct FixedEngine {
    registers: Registers,
    cells: Box<[u8]>,
}

impl FixedEngine {
    /// Create an engine for `source` with `width` zeroed cells.
    pub fn new(source: impl Into<Vec<u8>>, width: usize) -> Self {
        Self {
            registers: Registers::new(source.into()),
            cells: vec![0; width].into_boxed_slice(),
        }
    }

    /// Create an engine whose program is the full content of `reader`.
    pub fn from_reader(mut reader: impl Read, width: usize) -> Result<Self, EngineError> {
        Ok(Self::new(read_source(&mut reader)?, width))
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

impl Engine for FixedEngine {
    fn registers(&self) -> &Registers {
        &self.registers
    }

    fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    fn tape(&self) -> &[u8] {
        &self.cells
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut u8> {
        self.cells.get_mut(index)
    }

    fn move_left(&mut self) {
        self.registers.pointer = self.registers.pointer.wrapping_sub(1);
    }

    fn move_right(&mut self) {
        self.registers.pointer = self.registers.pointer.wrapping_add(1);
    }

    fn clear_tape(&mut self) {
        self.cells.fill(0);
    }
}
