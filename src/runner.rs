//! Drives an engine for the command line: streams output, feeds `,` from a
//! line-oriented input, and prints tape dumps on request.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::EngineError;

/// Source byte that prints a tape dump when execution reaches it.
pub const DEBUG_MARKER: u8 = b'#';

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run `engine` from a fresh reset.
///
/// - Program output is written to `out` as it is produced.
/// - When `,` finds the input buffer empty, one line (newline included) is
///   read from `input` and execution continues; end of `input` ends the run
///   with [`EngineError::EndOfInput`].
/// - A `#` in the source prints `Debug:` and the tape.
/// - In verbose mode the engine kind is announced first and the tape dumped last.
pub fn execute<R: BufRead, W: Write>(
    engine: &mut dyn Engine,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<(), RunError> {
    if config.verbose {
        writeln!(out, "{}", config.engine.describe())?;
    }

    engine.reset();
    let mut written = 0;

    while !engine.is_finished() {
        if engine.current_instruction() == Some(DEBUG_MARKER) {
            flush_output(engine, &mut written, out)?;
            writeln!(out, "Debug:")?;
            writeln!(out, "{}", engine.dump())?;
        }

        match engine.step() {
            Ok(()) => {}
            Err(EngineError::EndOfInput { ip }) => {
                // Show pending output before blocking on input.
                flush_output(engine, &mut written, out)?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Err(EngineError::EndOfInput { ip }.into());
                }
                debug!(ip, len = line.len(), "input line appended");
                engine.append_input(&line);
            }
            Err(err) => {
                flush_output(engine, &mut written, out)?;
                return Err(err.into());
            }
        }
    }

    flush_output(engine, &mut written, out)?;
    writeln!(out)?;
    if config.verbose {
        writeln!(out, "{}", engine.dump())?;
    }
    out.flush()?;
    Ok(())
}

fn flush_output<W: Write>(engine: &dyn Engine, written: &mut usize, out: &mut W) -> io::Result<()> {
    let output = engine.output();
    out.write_all(&output[*written..])?;
    *written = output.len();
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineKind, SourceSpec};
    use std::io::Cursor;

    fn config(engine: EngineKind, verbose: bool) -> Config {
        Config {
            source: SourceSpec::Expression(String::new()),
            engine,
            verbose,
        }
    }

    fn run(code: &str, kind: EngineKind, verbose: bool, stdin: &str) -> (Result<(), RunError>, String) {
        let cfg = config(kind, verbose);
        let mut engine = cfg.build_engine(code.as_bytes().to_vec());
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = execute(engine.as_mut(), &cfg, &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn output_ends_with_a_newline() {
        let (result, out) = run("++++++++[->++++++<]>.", EngineKind::Growable, false, "");
        assert!(result.is_ok());
        assert_eq!(out, "0\n");
    }

    #[test]
    fn input_is_read_a_line_at_a_time() {
        let (result, out) = run(",.,.,.", EngineKind::Growable, false, "ab\ncd\n");
        assert!(result.is_ok());
        assert_eq!(out, "ab\n\n");
    }

    #[test]
    fn exhausted_input_is_end_of_input() {
        let code = format!("{}.,", "+".repeat(49));
        let (result, out) = run(&code, EngineKind::Growable, false, "");
        assert!(matches!(
            result,
            Err(RunError::Engine(EngineError::EndOfInput { ip: 50 }))
        ));
        assert_eq!(out, "1");
    }

    #[test]
    fn debug_marker_dumps_the_tape() {
        let (result, out) = run("+>++#", EngineKind::Fixed { width: 2 }, false, "");
        assert!(result.is_ok());
        assert_eq!(out, "Debug:\nCell\tVal\tChar\n0:\t1\t'\\u{1}'\n1:\t2\t'\\u{2}'\n\n\n");
    }

    #[test]
    fn verbose_announces_mode_and_dumps_at_the_end() {
        let (result, out) = run("+", EngineKind::Fixed { width: 1 }, true, "");
        assert!(result.is_ok());
        assert_eq!(out, "Performance Mode\n\nCell\tVal\tChar\n0:\t1\t'\\u{1}'\n\n");
    }

    #[test]
    fn runtime_errors_keep_earlier_output() {
        let code = format!("{}.]", "+".repeat(48));
        let (result, out) = run(&code, EngineKind::Growable, false, "");
        assert!(matches!(
            result,
            Err(RunError::Engine(EngineError::UnmatchedBracket { ip: 49 }))
        ));
        assert_eq!(out, "0");
    }
}
