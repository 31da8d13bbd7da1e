//! Build configuration.
//!
//! A single immutable [`BuildConfig`] is assembled at startup from built-in
//! defaults, an optional `warp.toml` at the project root, and the host
//! platform. Every component borrows it; nothing reads ambient state later.
//!
//! ```toml
//! [toolchain]
//! cxx = "clang++"
//! cxxflags = ["-std=c++20", "-O2", "-I."]
//!
//! [layout]
//! test_dir = "test"
//! harness = ["test/main.cpp", "warp_test/warp_test.cpp"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "warp.toml";

/// Host platform, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    pub fn shared_ext(self) -> &'static str {
        match self {
            Platform::Linux => "so",
            Platform::MacOs => "dylib",
            Platform::Windows => "dll",
        }
    }

    /// Flags passed to the compiler driver when linking a shared library.
    pub fn shared_link_flags(self) -> &'static [&'static str] {
        match self {
            Platform::Linux => &["-fPIC", "-shared"],
            Platform::MacOs => &["-dynamiclib"],
            Platform::Windows => &["-shared"],
        }
    }

    /// Extra compile flag for objects that end up in a shared library.
    pub fn pic_flag(self) -> Option<&'static str> {
        match self {
            Platform::Windows => None,
            _ => Some("-fPIC"),
        }
    }

    /// Linker flag that lets an executable find shared libraries beside it.
    pub fn rpath_flag(self) -> Option<&'static str> {
        match self {
            Platform::Linux => Some("-Wl,-rpath,$ORIGIN"),
            Platform::MacOs => Some("-Wl,-rpath,@executable_path"),
            Platform::Windows => None,
        }
    }

    pub fn exe_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            _ => "",
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct WarpToml {
    pub toolchain: Option<ToolchainSection>,
    pub layout: Option<LayoutSection>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSection {
    pub cxx: Option<String>,
    pub cxxflags: Option<Vec<String>>,
    pub ar: Option<String>,
    pub arflags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    pub prefix: Option<String>,
    pub source_ext: Option<String>,
    pub test_dir: Option<String>,
    pub harness: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Invocation root; every other path is relative to it.
    pub root: PathBuf,
    pub cxx: String,
    pub cxxflags: Vec<String>,
    pub ar: String,
    pub arflags: Vec<String>,
    /// Module directory prefix (`warp_`).
    pub prefix: String,
    pub source_ext: String,
    /// Staging directory for test executables and final-mode libraries.
    pub test_dir: PathBuf,
    pub harness: Vec<PathBuf>,
    pub platform: Platform,
}

impl BuildConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cxx: "g++".to_string(),
            cxxflags: ["-std=c++20", "-O3", "-Wall", "-Wextra", "-I."]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ar: "ar".to_string(),
            arflags: vec!["rcs".to_string()],
            prefix: "warp_".to_string(),
            source_ext: "cpp".to_string(),
            test_dir: PathBuf::from("test"),
            harness: vec![
                PathBuf::from("test/main.cpp"),
                PathBuf::from("warp_test/warp_test.cpp"),
                PathBuf::from("warp_log/warp_log.cpp"),
            ],
            platform: Platform::host(),
        }
    }

    /// Defaults for `root`, overridden by `<root>/warp.toml` when present.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        let path = config.root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(config);
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: WarpToml = toml::from_str(&text).with_context(|| {
            format!(
                "Failed to parse {} - check for syntax errors or unknown keys",
                path.display()
            )
        })?;
        config.apply(file);
        Ok(config)
    }

    fn apply(&mut self, file: WarpToml) {
        if let Some(tc) = file.toolchain {
            if let Some(cxx) = tc.cxx {
                self.cxx = cxx;
            }
            if let Some(flags) = tc.cxxflags {
                self.cxxflags = flags;
            }
            if let Some(ar) = tc.ar {
                self.ar = ar;
            }
            if let Some(flags) = tc.arflags {
                self.arflags = flags;
            }
        }
        if let Some(layout) = file.layout {
            if let Some(prefix) = layout.prefix {
                self.prefix = prefix;
            }
            if let Some(ext) = layout.source_ext {
                self.source_ext = ext.trim_start_matches('.').to_string();
            }
            if let Some(dir) = layout.test_dir {
                self.test_dir = PathBuf::from(dir);
            }
            if let Some(harness) = layout.harness {
                self.harness = harness.into_iter().map(PathBuf::from).collect();
            }
        }
    }

    /// Extensions removed by `clean`: objects, archives, shared libraries.
    pub fn artifact_exts(&self) -> [&str; 3] {
        ["o", "a", self.platform.shared_ext()]
    }

    pub fn resolve(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = BuildConfig::load(dir.path())?;
        assert_eq!(config.cxx, "g++");
        assert_eq!(config.ar, "ar");
        assert_eq!(config.arflags, vec!["rcs"]);
        assert!(config.cxxflags.contains(&"-std=c++20".to_string()));
        assert_eq!(config.prefix, "warp_");
        assert_eq!(config.test_dir, PathBuf::from("test"));
        Ok(())
    }

    #[test]
    fn test_config_file_overrides() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[toolchain]
cxx = "clang++"
cxxflags = ["-O2"]

[layout]
source_ext = ".cc"
harness = ["test/driver.cc"]
"#,
        )?;
        let config = BuildConfig::load(dir.path())?;
        assert_eq!(config.cxx, "clang++");
        assert_eq!(config.cxxflags, vec!["-O2"]);
        assert_eq!(config.ar, "ar");
        assert_eq!(config.source_ext, "cc");
        assert_eq!(config.harness, vec![PathBuf::from("test/driver.cc")]);
        Ok(())
    }

    #[test]
    fn test_malformed_config_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(CONFIG_FILE), "[toolchain]\ncompiler = 3\n")?;
        let err = BuildConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("warp.toml"));
        Ok(())
    }

    #[test]
    fn test_platform_extensions() {
        assert_eq!(Platform::Linux.shared_ext(), "so");
        assert_eq!(Platform::MacOs.shared_ext(), "dylib");
        assert_eq!(Platform::Windows.shared_ext(), "dll");
        assert_eq!(Platform::Windows.pic_flag(), None);
        assert_eq!(Platform::Windows.rpath_flag(), None);
        assert_eq!(Platform::Windows.exe_suffix(), ".exe");
        assert_eq!(Platform::Linux.shared_link_flags(), &["-fPIC", "-shared"]);
    }
}
