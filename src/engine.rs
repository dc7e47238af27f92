//! The contract shared by every engine variant.
//!
//! Dispatch is written once, as provided methods on [`Engine`]. A variant only
//! decides how its tape is stored and what `<` and `>` do at the edges.

use std::borrow::Cow;
use std::io::Read;

use tracing::{debug, trace};

use crate::dump::TapeDump;
use crate::error::EngineError;
use crate::loops::LoopStack;

/// Per-run state owned by an engine: everything except the tape itself.
#[derive(Debug, Default, Clone)]
pub struct Registers {
    pub(crate) source: Vec<u8>,
    pub(crate) ip: usize,
    pub(crate) pointer: usize,
    pub(crate) loops: LoopStack,
    pub(crate) input: Vec<u8>,
    pub(crate) input_pos: usize,
    pub(crate) output: Vec<u8>,
}

impl Registers {
    pub(crate) fn new(source: Vec<u8>) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    fn next_input(&mut self) -> Option<u8> {
        let byte = self.input.get(self.input_pos).copied()?;
        self.input_pos += 1;
        Some(byte)
    }
}

/// Read a whole stream as program text, byte for byte.
pub(crate) fn read_source(reader: &mut dyn Read) -> Result<Vec<u8>, EngineError> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    Ok(source)
}

/// A Brainfuck engine.
///
/// `interpret` resets the tape, the pointers, the loop stack and the output,
/// then runs until the instruction pointer walks off the end of the source.
/// The input buffer survives a reset; it is only replaced by `set_input` or
/// `interpret_with_input`.
///
/// Instructions:
/// - `+` / `-` add or subtract one from the active cell, wrapping at 0 and 255.
/// - `<` / `>` move the active cell pointer; edge behavior depends on the variant.
/// - `[` records its own position as a loop re-entry point.
/// - `]` pops the re-entry point when the active cell is 0, otherwise jumps back
///   to it. A loop body therefore always runs at least once.
/// - `.` appends the active cell to the output buffer.
/// - `,` moves the next input byte into the active cell.
///
/// Every other byte is a no-op.
pub trait Engine {
    #[doc(hidden)]
    fn registers(&self) -> &Registers;
    #[doc(hidden)]
    fn registers_mut(&mut self) -> &mut Registers;

    /// The whole tape, lowest index first.
    fn tape(&self) -> &[u8];

    /// Mutable access to one cell, `None` when `index` is off the tape.
    fn cell_mut(&mut self, index: usize) -> Option<&mut u8>;

    /// Effect of `<` on the active cell pointer.
    fn move_left(&mut self);

    /// Effect of `>` on the active cell pointer.
    fn move_right(&mut self);

    /// Put the tape back into its freshly constructed state.
    fn clear_tape(&mut self);

    /// Replace the program. Nothing else changes until the next reset.
    fn load(&mut self, source: &str) {
        self.set_source(source.as_bytes().to_vec());
    }

    /// Replace the program with the full content of `reader`.
    fn load_from_reader(&mut self, reader: &mut dyn Read) -> Result<(), EngineError> {
        let source = read_source(reader)?;
        self.set_source(source);
        Ok(())
    }

    fn source(&self) -> &[u8] {
        &self.registers().source
    }

    /// The program as text, with invalid UTF-8 replaced.
    fn source_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.source())
    }

    fn set_source(&mut self, source: Vec<u8>) {
        debug!(len = source.len(), "source loaded");
        self.registers_mut().source = source;
    }

    fn reset(&mut self) {
        let registers = self.registers_mut();
        registers.ip = 0;
        registers.pointer = 0;
        registers.loops.clear();
        registers.output.clear();
        self.clear_tape();
        debug!(tape_len = self.tape_len(), "engine reset");
    }

    /// Reset, then run the program to completion.
    ///
    /// Returns the output buffer as text, one char per cell value. On error
    /// the output produced so far is still available through [`Engine::output`].
    fn interpret(&mut self) -> Result<String, EngineError> {
        self.reset();
        self.resume()
    }

    /// Replace the input buffer with `input`, then behave like [`Engine::interpret`].
    fn interpret_with_input(&mut self, input: &str) -> Result<String, EngineError> {
        self.set_input(input);
        self.interpret()
    }

    /// Keep stepping from the current state until the program ends.
    fn resume(&mut self) -> Result<String, EngineError> {
        while !self.is_finished() {
            self.step()?;
        }
        debug!(output_len = self.output().len(), "run finished");
        Ok(self.output_text())
    }

    /// The instruction the next `step` would execute.
    fn current_instruction(&self) -> Option<u8> {
        let registers = self.registers();
        registers.source.get(registers.ip).copied()
    }

    fn is_finished(&self) -> bool {
        self.current_instruction().is_none()
    }

    /// Execute the instruction under the instruction pointer and advance past it.
    ///
    /// Does nothing once the program has finished. When an instruction fails
    /// the instruction pointer stays on it.
    fn step(&mut self) -> Result<(), EngineError> {
        let Some(op) = self.current_instruction() else {
            return Ok(());
        };
        let ip = self.registers().ip;
        trace!(ip, op = %char::from(op), pointer = self.cell_pointer(), "step");

        match op {
            b'+' => {
                let cell = self.active_cell_mut()?;
                *cell = cell.wrapping_add(1);
            }
            b'-' => {
                let cell = self.active_cell_mut()?;
                *cell = cell.wrapping_sub(1);
            }
            b'<' => self.move_left(),
            b'>' => self.move_right(),
            b'[' => self.registers_mut().loops.push(ip),
            b']' => {
                let value = self.value()?;
                let registers = self.registers_mut();
                let open = if value == 0 {
                    registers.loops.pop()
                } else {
                    registers.loops.peek()
                };
                let Some(open) = open else {
                    debug!(ip, "']' without an open loop");
                    return Err(EngineError::UnmatchedBracket { ip });
                };
                if value != 0 {
                    registers.ip = open;
                }
            }
            b'.' => {
                let value = self.value()?;
                self.registers_mut().output.push(value);
            }
            b',' => {
                // Check the cell first so a bad pointer does not eat input.
                self.value()?;
                let Some(byte) = self.registers_mut().next_input() else {
                    return Err(EngineError::EndOfInput { ip });
                };
                self.set_value(byte)?;
            }
            _ => {}
        }

        self.registers_mut().ip += 1;
        Ok(())
    }

    fn output(&self) -> &[u8] {
        &self.registers().output
    }

    /// The output buffer as text, each byte read as the char with that code point.
    fn output_text(&self) -> String {
        self.output().iter().map(|&byte| char::from(byte)).collect()
    }

    fn set_output(&mut self, output: Vec<u8>) {
        self.registers_mut().output = output;
    }

    fn clear_output(&mut self) {
        self.registers_mut().output.clear();
    }

    /// Input not yet consumed by `,`.
    fn input(&self) -> &[u8] {
        let registers = self.registers();
        &registers.input[registers.input_pos..]
    }

    fn set_input(&mut self, input: &str) {
        let registers = self.registers_mut();
        registers.input = input.as_bytes().to_vec();
        registers.input_pos = 0;
    }

    fn append_input(&mut self, input: &str) {
        let registers = self.registers_mut();
        registers.input.drain(..registers.input_pos);
        registers.input_pos = 0;
        registers.input.extend_from_slice(input.as_bytes());
    }

    fn instruction_pointer(&self) -> usize {
        self.registers().ip
    }

    fn set_instruction_pointer(&mut self, ip: usize) {
        self.registers_mut().ip = ip;
    }

    fn cell_pointer(&self) -> usize {
        self.registers().pointer
    }

    fn set_cell_pointer(&mut self, pointer: usize) {
        self.registers_mut().pointer = pointer;
    }

    fn tape_len(&self) -> usize {
        self.tape().len()
    }

    fn value_at(&self, index: usize) -> Result<u8, EngineError> {
        let tape = self.tape();
        tape.get(index)
            .copied()
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: tape.len(),
            })
    }

    fn set_value_at(&mut self, index: usize, value: u8) -> Result<(), EngineError> {
        let len = self.tape_len();
        let cell = self
            .cell_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })?;
        *cell = value;
        Ok(())
    }

    /// Value of the active cell.
    fn value(&self) -> Result<u8, EngineError> {
        self.value_at(self.cell_pointer())
    }

    fn set_value(&mut self, value: u8) -> Result<(), EngineError> {
        self.set_value_at(self.cell_pointer(), value)
    }

    fn active_cell_mut(&mut self) -> Result<&mut u8, EngineError> {
        let index = self.cell_pointer();
        let len = self.tape_len();
        self.cell_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    /// A printable table of every cell.
    fn dump(&self) -> TapeDump<'_> {
        TapeDump::new(self.tape())
    }
}
