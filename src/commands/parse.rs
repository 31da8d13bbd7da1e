//! Command-line tokens to [`Command`].
//!
//! clap collects flags wherever they appear; the positional tokens are then
//! read in order: verb first, module second, an optional `static`/`shared`
//! last.

use crate::build::{LibKind, Module, Target};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug, Default)]
#[command(name = "warp-build")]
#[command(about = "Build driver for the warp_* C++ libraries", version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Verb (l, a, t, f, h, c) or module name, then module and kind
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub positionals: Vec<String>,

    /// Build a static archive
    #[arg(long = "static")]
    pub static_lib: bool,

    /// Build a shared library (default)
    #[arg(long = "shared")]
    pub shared_lib: bool,

    /// Run the produced binary after building
    #[arg(long = "r", visible_alias = "run")]
    pub run: bool,

    /// Remove build artifacts and exit
    #[arg(long = "c", visible_alias = "clean")]
    pub clean: bool,

    /// Print commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Show detailed progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clean,
    Build { target: Target, kind: LibKind },
    Test { module: Module, run: bool },
    Final { module: Module, kind: LibKind, run: bool },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("'{verb}' needs a module name")]
    MissingModule { verb: String },
    #[error("Invalid module name '{0}'")]
    InvalidModule(String),
    #[error("Unexpected argument '{0}'")]
    Unexpected(String),
    #[error("Choose either static or shared, not both")]
    ConflictingKind,
    #[error("The toolkit is not a single module")]
    ToolkitNotModule,
}

fn is_kind(token: &str) -> bool {
    token == "static" || token == "shared"
}

impl Command {
    pub fn parse(args: &Args, prefix: &str) -> Result<Command, UsageError> {
        let mut tokens = args.positionals.iter().map(String::as_str);
        let first = tokens.next();

        // Clean short-circuits every other verb.
        if args.clean || matches!(first, Some("c" | "clean")) {
            return Ok(Command::Clean);
        }

        let Some(verb) = first else {
            return Ok(Command::Help);
        };
        let rest: Vec<&str> = tokens.collect();

        match verb {
            "h" | "help" => {
                expect_end(&rest, 0)?;
                Ok(Command::Help)
            }
            "a" | "toolkit" => {
                let kind = lib_kind(args, &rest, 0)?;
                Ok(Command::Build {
                    target: Target::Toolkit,
                    kind,
                })
            }
            "l" | "lib" => {
                let target = parse_target(verb, &rest, prefix)?;
                let kind = lib_kind(args, &rest, 1)?;
                Ok(Command::Build { target, kind })
            }
            "t" | "test" => {
                let module = parse_module(verb, &rest, prefix)?;
                expect_end(&rest, 1)?;
                Ok(Command::Test {
                    module,
                    run: args.run,
                })
            }
            "f" | "final" => {
                let module = parse_module(verb, &rest, prefix)?;
                let kind = lib_kind(args, &rest, 1)?;
                Ok(Command::Final {
                    module,
                    kind,
                    run: args.run,
                })
            }
            name => {
                let target =
                    Target::parse(name, prefix).ok_or_else(|| UsageError::InvalidModule(name.into()))?;
                let kind = lib_kind(args, &rest, 0)?;
                Ok(Command::Build { target, kind })
            }
        }
    }
}

fn parse_target(verb: &str, rest: &[&str], prefix: &str) -> Result<Target, UsageError> {
    let name = rest
        .first()
        .filter(|t| !is_kind(t))
        .ok_or_else(|| UsageError::MissingModule { verb: verb.into() })?;
    Target::parse(name, prefix).ok_or_else(|| UsageError::InvalidModule(name.to_string()))
}

fn parse_module(verb: &str, rest: &[&str], prefix: &str) -> Result<Module, UsageError> {
    match parse_target(verb, rest, prefix)? {
        Target::Module(module) => Ok(module),
        Target::Toolkit => Err(UsageError::ToolkitNotModule),
    }
}

fn expect_end(rest: &[&str], used: usize) -> Result<(), UsageError> {
    match rest.get(used) {
        Some(extra) => Err(UsageError::Unexpected(extra.to_string())),
        None => Ok(()),
    }
}

/// Kind from flags or one trailing `static`/`shared` token after `used`.
fn lib_kind(args: &Args, rest: &[&str], used: usize) -> Result<LibKind, UsageError> {
    let trailing = match rest.get(used) {
        Some(&"static") => Some(LibKind::Static),
        Some(&"shared") => Some(LibKind::Shared),
        Some(other) => return Err(UsageError::Unexpected(other.to_string())),
        None => None,
    };
    expect_end(rest, used + 1)?;

    let mut requested = Vec::new();
    if args.static_lib {
        requested.push(LibKind::Static);
    }
    if args.shared_lib {
        requested.push(LibKind::Shared);
    }
    requested.extend(trailing);
    requested.dedup();

    match requested.as_slice() {
        [] => Ok(LibKind::default()),
        [kind] => Ok(*kind),
        _ => Err(UsageError::ConflictingKind),
    }
}
