use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::engine::Engine;
use crate::fixed::{FixedEngine, DEFAULT_TAPE_WIDTH};
use crate::growable::GrowableEngine;

/// Command line arguments, as typed.
#[derive(Parser, Debug)]
#[command(name = "quickfuck", disable_help_flag = true)]
pub struct Cli {
    /// Use the fixed-width tape, optionally followed by its width
    #[arg(
        short = 'p',
        long = "performance",
        value_name = "WIDTH",
        num_args = 0..=1,
        default_missing_value = "256"
    )]
    pub performance: Option<String>,

    /// Show the tape after evaluation ends
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Treat the positional argument as code instead of a path
    #[arg(short = 'e', long = "eval")]
    pub eval: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,

    /// Program file, or program text with --eval
    #[arg(value_name = "PATH", allow_hyphen_values = true)]
    pub target: Option<String>,
}

/// Errors turning arguments into something runnable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("path cannot be empty")]
    EmptyPath,

    #[error("expression cannot be empty")]
    EmptyExpression,

    #[error("file {} not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no code to evaluate")]
    EmptySource,
}

/// Where the program text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Expression(String),
}

/// Which engine variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Growable,
    Fixed { width: usize },
}

impl EngineKind {
    pub fn build(self, source: Vec<u8>) -> Box<dyn Engine> {
        match self {
            EngineKind::Growable => Box::new(GrowableEngine::new(source)),
            EngineKind::Fixed { width } => Box::new(FixedEngine::new(source, width)),
        }
    }

    /// Banner printed in verbose mode.
    pub fn describe(self) -> &'static str {
        match self {
            EngineKind::Growable => "Dynamic Mode",
            EngineKind::Fixed { .. } => "Performance Mode",
        }
    }
}

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceSpec,
    pub engine: EngineKind,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let Cli {
            performance,
            verbose,
            eval,
            mut target,
            ..
        } = cli;

        let engine = match performance {
            None => EngineKind::Growable,
            Some(raw) => match raw.parse::<usize>() {
                Ok(width) => EngineKind::Fixed { width },
                // Not a width, so it was the program all along.
                Err(_) => {
                    if target.is_none() {
                        target = Some(raw);
                    }
                    EngineKind::Fixed {
                        width: DEFAULT_TAPE_WIDTH,
                    }
                }
            },
        };

        let target = target.unwrap_or_default();
        let source = match (eval, target.is_empty()) {
            (true, true) => return Err(ConfigError::EmptyExpression),
            (false, true) => return Err(ConfigError::EmptyPath),
            (true, false) => SourceSpec::Expression(target),
            (false, false) => SourceSpec::File(PathBuf::from(target)),
        };

        Ok(Self {
            source,
            engine,
            verbose,
        })
    }

    /// Fetch the program text, reading the file when there is one.
    pub fn load_source(&self) -> Result<Vec<u8>, ConfigError> {
        let source = match &self.source {
            SourceSpec::Expression(code) => code.clone().into_bytes(),
            SourceSpec::File(path) => fs::read(path).map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ConfigError::FileNotFound { path: path.clone() }
                } else {
                    ConfigError::Unreadable {
                        path: path.clone(),
                        source,
                    }
                }
            })?,
        };

        if source.is_empty() {
            return Err(ConfigError::EmptySource);
        }
        Ok(source)
    }

    pub fn build_engine(&self, source: Vec<u8>) -> Box<dyn Engine> {
        self.engine.build(source)
    }
}
