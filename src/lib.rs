//! A lightweight Brainfuck interpreter library.
//!
//! Two engines share one [`Engine`] contract:
//! - [`GrowableEngine`]: the tape starts with one cell and grows to the right
//!   on demand; `<` at cell 0 is ignored.
//! - [`FixedEngine`]: the tape has a fixed width chosen at construction and
//!   pointer motion is not bounds checked.
//!
//! Features and behaviors:
//! - Cells are bytes; `+` and `-` wrap.
//! - `[` always enters its loop; `]` jumps back while the active cell is
//!   non-zero. Brackets are matched as the program runs, not ahead of time.
//! - `.` appends to an output buffer, `,` consumes an input buffer and fails
//!   with [`EngineError::EndOfInput`] when it is empty.
//! - Any other character is a no-op.
//!
//! Quick start:
//!
//! ```
//! use quickfuck::{Engine, GrowableEngine};
//!
//! let mut engine = GrowableEngine::new("++++++++[->++++++<]>.");
//! assert_eq!(engine.interpret().unwrap(), "0");
//!
//! engine.load(",.,.");
//! assert_eq!(engine.interpret_with_input("hi").unwrap(), "hi");
//! ```

pub mod cli_util;
pub mod config;
pub mod dump;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod growable;
pub mod loops;
pub mod runner;

pub use dump::TapeDump;
pub use engine::Engine;
pub use error::EngineError;
pub use fixed::{FixedEngine, DEFAULT_TAPE_WIDTH};
pub use growable::GrowableEngine;
pub use loops::LoopStack;
