//! Source discovery.
//!
//! Paths are returned relative to the project root and sorted by file name,
//! directories first by module name, so link order is the same on every
//! platform.

use super::target::{Module, Target};
use crate::config::BuildConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Entries directly inside `dir`, sorted. Missing or unreadable directories
/// yield nothing.
fn children(dir: PathBuf) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
}

fn relative(config: &BuildConfig, path: &Path) -> PathBuf {
    path.strip_prefix(&config.root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

pub fn module_exists(config: &BuildConfig, module: &Module) -> bool {
    config.resolve(&module.dir()).is_dir()
}

/// Source files of one module (not recursive).
pub fn module_sources(config: &BuildConfig, module: &Module) -> Vec<PathBuf> {
    children(config.resolve(&module.dir()))
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == config.source_ext.as_str())
        })
        .map(|e| relative(config, e.path()))
        .collect()
}

/// Every prefixed directory under the root, in name order.
pub fn list_modules(config: &BuildConfig) -> Vec<Module> {
    children(config.root.clone())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            let name = e.file_name().to_str()?;
            if !name.starts_with(&config.prefix) {
                return None;
            }
            Module::new(name, &config.prefix)
        })
        .filter(|m| !m.is_toolkit(&config.prefix))
        .collect()
}

pub fn sources(config: &BuildConfig, target: &Target) -> Vec<PathBuf> {
    match target {
        Target::Module(module) => module_sources(config, module),
        Target::Toolkit => list_modules(config)
            .iter()
            .flat_map(|m| module_sources(config, m))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    fn project() -> anyhow::Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("warp_math"))?;
        fs::create_dir_all(root.join("warp_io/nested"))?;
        fs::create_dir_all(root.join("other"))?;
        fs::write(root.join("warp_math/b.cpp"), "")?;
        fs::write(root.join("warp_math/a.cpp"), "")?;
        fs::write(root.join("warp_math/a.hpp"), "")?;
        fs::write(root.join("warp_io/c.cpp"), "")?;
        fs::write(root.join("warp_io/nested/deep.cpp"), "")?;
        fs::write(root.join("other/x.cpp"), "")?;
        fs::write(root.join("warp_stray.cpp"), "")?;
        Ok(dir)
    }

    #[test]
    fn test_module_sources_sorted_and_filtered() -> anyhow::Result<()> {
        let dir = project()?;
        let config = BuildConfig::new(dir.path());
        let math = Module::new("math", "warp_").unwrap();
        assert_eq!(
            module_sources(&config, &math),
            vec![PathBuf::from("warp_math/a.cpp"), PathBuf::from("warp_math/b.cpp")]
        );
        Ok(())
    }

    #[test]
    fn test_missing_module_is_empty() -> anyhow::Result<()> {
        let dir = project()?;
        let config = BuildConfig::new(dir.path());
        let net = Module::new("net", "warp_").unwrap();
        assert!(!module_exists(&config, &net));
        assert!(module_sources(&config, &net).is_empty());
        Ok(())
    }

    #[test]
    fn test_toolkit_is_union_of_modules() -> anyhow::Result<()> {
        let dir = project()?;
        let config = BuildConfig::new(dir.path());

        let modules = list_modules(&config);
        let names: Vec<_> = modules.iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["warp_io", "warp_math"]);

        let union: BTreeSet<PathBuf> = modules
            .iter()
            .flat_map(|m| module_sources(&config, m))
            .collect();
        let toolkit = sources(&config, &Target::Toolkit);
        assert_eq!(toolkit.len(), 3);
        assert_eq!(toolkit.into_iter().collect::<BTreeSet<_>>(), union);
        Ok(())
    }
}
