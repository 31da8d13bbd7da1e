//! Terminal status output.
//!
//! All progress lines go through these helpers so verbosity is decided in
//! one place. The level is set once at startup; until then `Normal` applies.
//!
//! The `WARP_LOG` environment variable (`quiet`, `normal`, `verbose`) picks
//! the level when no command-line flag does.

use colored::*;
use std::sync::OnceLock;

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_env() -> Option<Self> {
        let value = std::env::var("WARP_LOG").ok()?;
        match value.to_ascii_lowercase().as_str() {
            "quiet" | "error" => Some(Verbosity::Quiet),
            "normal" | "info" => Some(Verbosity::Normal),
            "verbose" | "debug" => Some(Verbosity::Verbose),
            _ => None,
        }
    }
}

/// First call wins.
pub fn init(level: Verbosity) {
    let _ = VERBOSITY.set(level);
}

fn level() -> Verbosity {
    *VERBOSITY.get().unwrap_or(&Verbosity::Normal)
}

fn enabled(at: Verbosity) -> bool {
    level() >= at
}

pub fn debug(msg: &str) {
    if enabled(Verbosity::Verbose) {
        println!("  {}", msg.dimmed());
    }
}

pub fn info(msg: &str) {
    if enabled(Verbosity::Normal) {
        println!("{} {}", "•".cyan(), msg);
    }
}

pub fn ok(msg: &str) {
    if enabled(Verbosity::Normal) {
        println!("{} {}", "✓".green(), msg);
    }
}

pub fn warn(msg: &str) {
    if enabled(Verbosity::Normal) {
        println!("{} {}", "!".yellow(), msg);
    }
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "x".red(), msg);
}

/// Echo an external command before it runs.
pub fn command(line: &str) {
    if enabled(Verbosity::Normal) {
        println!("{} {}", "$".blue(), line);
    }
}

pub fn usage_text() -> String {
    let entry = |cmd: &str, desc: &str| format!("  warp-build {} → {}\n", cmd.bold(), desc);

    let mut out = format!("{}\n", "Usage:".bold());
    out.push_str(&entry(
        "<module> [--static|--shared]",
        "build one library (alias: l <module>)",
    ));
    out.push_str(&entry(
        "a [--static|--shared]",
        "build the combined warp_toolkit library",
    ));
    out.push_str(&entry(
        "t <module> [--r]",
        "compile the test harness against the module source",
    ));
    out.push_str(&entry(
        "f <module> [--static|--shared] [--r]",
        "compile the test harness against the staged library",
    ));
    out.push_str(&entry("--c", "remove build artifacts"));
    out.push_str(&entry("h", "show this message"));
    out.push_str(&format!(
        "\n{}\n  --r run the produced binary   --dry-run print commands only\n  -v verbose   -q quiet   --root <dir> project root\n",
        "Flags:".bold()
    ));
    out
}
