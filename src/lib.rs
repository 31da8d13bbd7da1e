//! # warp-build - build driver for the warp_* C++ libraries
//!
//! Compiles `warp_<name>/` module directories into static or shared
//! libraries with an external compiler and archiver, links the test harness
//! against a module's sources or its built library, and removes artifacts.
//!
//! ## Quick Start
//!
//! ```bash
//! # Static archive of warp_log
//! warp-build log --static
//!
//! # Combined library of every module
//! warp-build a
//!
//! # Build and run the harness against the staged library
//! warp-build f log --r
//! ```
//!
//! Every invocation is a full rebuild; artifacts are overwritten in place.
//!
//! ## Module Organization
//!
//! - [`build`] - Source discovery, library builds, test harness, cleanup
//! - [`commands`] - Command-line parsing and dispatch
//! - [`config`] - Build configuration (`warp.toml`)

/// Library and test harness builds.
pub mod build;

/// CLI command handlers.
pub mod commands;

/// Configuration file parsing (`warp.toml`) and host platform detection.
pub mod config;

/// Build error kinds.
pub mod error;

/// Terminal status output.
pub mod ui;
