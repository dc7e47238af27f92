/// Re-entry positions for the loops that are currently open.
///
/// Brackets are resolved while the program runs: `[` pushes its own position,
/// a taken `]` jumps back to the position on top, and a `]` that falls through
/// pops it. Nothing is matched ahead of time, so every iteration walks the
/// loop body again one character at a time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopStack {
    positions: Vec<usize>,
}

impl LoopStack {
    pub fn push(&mut self, ip: usize) {
        self.positions.push(ip);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.positions.pop()
    }

    /// Position of the innermost open loop.
    pub fn peek(&self) -> Option<usize> {
        self.positions.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}
