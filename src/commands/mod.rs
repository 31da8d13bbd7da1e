//! CLI command handlers
//!
//! [`Command::parse`] turns the command line into one verb; [`execute`]
//! carries it out against the build components.

mod parse;

pub use parse::{Args, Command, UsageError};

use crate::build::{self, LibraryBuilder, Runner, TestHarness};
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::ui;

/// With `dry_run`, `runner` is expected to only echo, and clean removes nothing.
pub fn execute(
    command: &Command,
    config: &BuildConfig,
    runner: &dyn Runner,
    dry_run: bool,
) -> Result<(), BuildError> {
    match command {
        Command::Help => {
            print!("{}", ui::usage_text());
            Ok(())
        }
        Command::Clean => build::clean(config, dry_run).map(|_| ()),
        Command::Build { target, kind } => {
            LibraryBuilder::new(config, runner).build(target, *kind)?;
            Ok(())
        }
        Command::Test { module, run } => {
            TestHarness::new(config, runner).test_source(module, *run)?;
            Ok(())
        }
        Command::Final { module, kind, run } => {
            TestHarness::new(config, runner).test_final(module, *kind, *run)?;
            Ok(())
        }
    }
}
