//! What gets built: modules, the aggregate toolkit, and library kinds.

use crate::config::{BuildConfig, Platform};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the aggregate target, without the prefix.
pub const TOOLKIT: &str = "toolkit";

/// A module name, always carrying the configured prefix (`warp_math`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module(String);

impl Module {
    /// Accepts `math` or `warp_math`. Returns `None` for empty names or names
    /// with characters that cannot form a directory/library name.
    pub fn new(name: &str, prefix: &str) -> Option<Self> {
        if !is_valid_name(name) {
            return None;
        }
        let full = if name.starts_with(prefix) {
            name.to_string()
        } else {
            format!("{}{}", prefix, name)
        };
        if full.len() == prefix.len() {
            return None;
        }
        Some(Module(full))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn dir(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// `warp_log/warp_log.cpp`
    pub fn entry_source(&self, ext: &str) -> PathBuf {
        self.dir().join(format!("{}.{}", self.0, ext))
    }

    pub fn is_toolkit(&self, prefix: &str) -> bool {
        self.0.strip_prefix(prefix) == Some(TOOLKIT)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Module(Module),
    Toolkit,
}

impl Target {
    /// `toolkit` maps to the aggregate; anything else to a single module.
    pub fn parse(name: &str, prefix: &str) -> Option<Self> {
        let module = Module::new(name, prefix)?;
        if module.is_toolkit(prefix) {
            Some(Target::Toolkit)
        } else {
            Some(Target::Module(module))
        }
    }

    /// Library base name: the module name, or `warp_toolkit`.
    pub fn lib_name(&self, prefix: &str) -> String {
        match self {
            Target::Module(m) => m.name().to_string(),
            Target::Toolkit => format!("{}{}", prefix, TOOLKIT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibKind {
    Static,
    #[default]
    Shared,
}

impl LibKind {
    pub fn ext(self, platform: Platform) -> &'static str {
        match self {
            LibKind::Static => "a",
            LibKind::Shared => platform.shared_ext(),
        }
    }
}

impl fmt::Display for LibKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LibKind::Static => "static",
            LibKind::Shared => "shared",
        })
    }
}

/// A produced library file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Relative to the project root.
    pub path: PathBuf,
    pub kind: LibKind,
}

/// `<dir>/lib<name>.<ext>`; deterministic, so rebuilds overwrite in place.
pub fn artifact_path(dir: &Path, lib_name: &str, kind: LibKind, config: &BuildConfig) -> PathBuf {
    dir.join(format!("lib{}.{}", lib_name, kind.ext(config.platform)))
}
