use std::io::{self, Write};

use crate::EngineError;

/// Print an engine error, with a caret under the failing instruction when it has one.
/// If `program` is `Some("quickfuck")`, messages are prefixed with "quickfuck: ...".
pub fn print_engine_error(program: Option<&str>, code: &[u8], err: &EngineError) {
    let msg = match program {
        Some(p) => format!("{p}: Runtime error: {err}"),
        None => format!("Runtime error: {err}"),
    };

    match err.ip() {
        Some(ip) => print_error_with_context(&msg, code, ip),
        None => {
            eprintln!("{msg}");
            let _ = io::stderr().flush();
        }
    }
}

/// Print a message followed by a window of source around `pos` and a caret under it.
pub fn print_error_with_context(msg: &str, code: &[u8], pos: usize) {
    eprintln!("{msg}");
    let (window, caret) = context_window(code, pos);
    eprintln!("  {window}");
    eprintln!("  {caret}");
    let _ = io::stderr().flush();
}

/// Source around byte `pos` on a single line, and the matching caret line.
fn context_window(code: &[u8], pos: usize) -> (String, String) {
    const WINDOW_BYTES: usize = 32;

    let pos = pos.min(code.len().saturating_sub(1));
    let start = pos.saturating_sub(WINDOW_BYTES);
    let end = (pos + WINDOW_BYTES + 1).min(code.len());

    let printable = |bytes: &[u8]| -> String {
        String::from_utf8_lossy(bytes)
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    };

    let window = printable(&code[start..end]);
    let offset = printable(&code[start..pos]).chars().count();
    let caret = format!("{}^", " ".repeat(offset));
    (window, caret)
}
