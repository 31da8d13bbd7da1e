mod clean;
mod library;
mod runner;
mod scan;
mod target;

pub use clean::{artifacts, clean};
pub use library::LibraryBuilder;
pub use runner::{DryRunner, ProcessRunner, Runner, command_line};
pub use scan::{list_modules, module_exists, module_sources, sources};
pub use target::{Artifact, LibKind, Module, TOOLKIT, Target, artifact_path};
pub use test::TestHarness;
