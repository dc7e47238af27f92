use clap::Parser;
use quickfuck::cli_util::print_engine_error;
use quickfuck::config::{Cli, Config};
use quickfuck::runner::{self, RunError};
use quickfuck::Engine;
use std::env;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    println!(
        r#"Usage:
  {0} <file> [flags]          # Run the Brainfuck program in <file>
  {0} --eval "<code>" [flags] # Run <code> directly

Flags:
  --performance, -p [WIDTH]  Use the fixed-width tape (WIDTH cells, default 256), ex: '-p 32'
  --verbose,     -v          Show the contents of the tape after evaluation ends. Also consider using '#' in code
  --eval,        -e          Interpret the argument as code instead of a path
  --help,        -h          Show this help

Notes:
- Input (`,`) reads a line from stdin whenever the input buffer runs dry.
- Characters outside of ><+-.,[] are ignored, except '#' which prints the tape.
- Set QUICKFUCK_LOG (e.g. QUICKFUCK_LOG=debug) to see interpreter logs on stderr.
"#,
        program
    );
    let _ = io::stdout().flush();
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUICKFUCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(program: &str, cli: Cli) -> i32 {
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{program}: Error: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let source = match config.load_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{program}: Error: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let mut engine = config.build_engine(source);
    let result = runner::execute(
        engine.as_mut(),
        &config,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    );

    match result {
        Ok(()) => 0,
        Err(RunError::Engine(err)) => {
            // Keep the partial program output on its own line.
            println!();
            let _ = io::stdout().flush();
            print_engine_error(Some(program), engine.source(), &err);
            1
        }
        Err(RunError::Io(err)) => {
            eprintln!("{program}: I/O error: {err}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| String::from("quickfuck"));

    init_tracing();
    let cli = Cli::parse();

    if cli.help {
        print_usage(&program);
        std::process::exit(0);
    }

    std::process::exit(run(&program, cli));
}
