use std::io::Read;

use crate::engine::{read_source, Engine, Registers};
use crate::error::EngineError;

/// An engine whose tape starts with one cell and grows to the right on demand.
///
/// - `>` past the last cell appends a zeroed cell first.
/// - `<` at cell 0 does nothing; there are no negative cells.
/// - The tape never shrinks until the next reset.
/// - A pointer placed past the end with `set_cell_pointer` is not backed by a
///   cell; touching it fails with [`EngineError::IndexOutOfRange`].
#[derive(Debug, Clone)]
pub struct GrowableEngine {
    registers: Registers,
    cells: Vec<u8>,
}

impl GrowableEngine {
    /// Create an engine for `source`.
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        Self {
            registers: Registers::new(source.into()),
            cells: vec![0],
        }
    }

    /// Create an engine whose program is the full content of `reader`.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, EngineError> {
        Ok(Self::new(read_source(&mut reader)?))
    }
}

impl Default for GrowableEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Engine for GrowableEngine {
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
        self.registers.pointer = self.registers.pointer.saturating_sub(1);
    }

    fn move_right(&mut self) {
        let pointer = self.registers.pointer.saturating_add(1);
        if pointer == self.cells.len() {
            self.cells.push(0);
        }
        self.registers.pointer = pointer;
    }

    fn clear_tape(&mut self) {
        self.cells.clear();
        self.cells.push(0);
    }
}
