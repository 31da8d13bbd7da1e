//! # warp-build CLI Entry Point
//!
//! Parses the command line, loads the configuration once, and hands the
//! resulting command to the dispatcher.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use warp_build::build::{DryRunner, ProcessRunner, Runner};
use warp_build::commands::{self, Args, Command};
use warp_build::config::BuildConfig;
use warp_build::error::BuildError;
use warp_build::ui::{self, Verbosity};

const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            eprint!("\n{}", ui::usage_text());
            return ExitCode::from(USAGE_EXIT);
        }
    };

    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::from_env().unwrap_or(Verbosity::Normal)
    };
    ui::init(verbosity);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            let code = e
                .downcast_ref::<BuildError>()
                .map(BuildError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = match BuildConfig::load(root.as_path()) {
        Ok(config) => config,
        Err(e) => {
            // Help and clean never touch the toolchain settings.
            let defaults = BuildConfig::new(root.as_path());
            match Command::parse(args, &defaults.prefix) {
                Ok(Command::Help | Command::Clean) => {
                    ui::warn(&format!("{:#}; using defaults", e));
                    defaults
                }
                _ => return Err(e),
            }
        }
    };

    let command = match Command::parse(args, &config.prefix) {
        Ok(command) => command,
        Err(e) => {
            ui::error(&e.to_string());
            eprint!("\n{}", ui::usage_text());
            return Ok(ExitCode::from(USAGE_EXIT));
        }
    };

    if args.run && matches!(command, Command::Build { .. }) {
        ui::warn("--r has no effect on a library build; nothing to run");
    }
    ui::debug(&format!("compiler: {} {}", config.cxx, config.cxxflags.join(" ")));
    ui::debug(&format!("archiver: {} {}", config.ar, config.arflags.join(" ")));

    let runner: &dyn Runner = if args.dry_run {
        &DryRunner
    } else {
        &ProcessRunner
    };
    commands::execute(&command, &config, runner, args.dry_run)?;
    Ok(ExitCode::SUCCESS)
}
