//! Static and shared library builds.
//!
//! Always a full rebuild: every source is recompiled and the artifact is
//! overwritten. Objects are written next to their sources and are not
//! removed when a later compile fails.

use super::runner::Runner;
use super::scan;
use super::target::{Artifact, LibKind, Target, artifact_path};
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::ui;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LibraryBuilder<'a> {
    config: &'a BuildConfig,
    runner: &'a dyn Runner,
}

impl<'a> LibraryBuilder<'a> {
    pub fn new(config: &'a BuildConfig, runner: &'a dyn Runner) -> Self {
        Self { config, runner }
    }

    /// Build into the project root.
    pub fn build(&self, target: &Target, kind: LibKind) -> Result<Artifact, BuildError> {
        self.build_into(target, kind, Path::new(""))
    }

    /// Build into `out_dir` (relative to the root).
    pub fn build_into(
        &self,
        target: &Target,
        kind: LibKind,
        out_dir: &Path,
    ) -> Result<Artifact, BuildError> {
        let lib_name = target.lib_name(&self.config.prefix);

        if let Target::Module(module) = target
            && !scan::module_exists(self.config, module)
        {
            return Err(BuildError::MissingModuleDirectory(module.dir()));
        }

        let srcs = scan::sources(self.config, target);
        if srcs.is_empty() {
            return Err(BuildError::NoSourcesFound(lib_name));
        }
        ui::info(&format!(
            "Building {} {} library from {} source(s)",
            lib_name.bold(),
            kind,
            srcs.len()
        ));

        let objs = self.compile_sources(&srcs, kind)?;

        if !out_dir.as_os_str().is_empty() {
            let abs = self.config.resolve(out_dir);
            fs::create_dir_all(&abs).map_err(|e| BuildError::io(&abs, e))?;
        }
        let out = artifact_path(out_dir, &lib_name, kind, self.config);
        match kind {
            LibKind::Static => self.make_static(&out, &objs)?,
            LibKind::Shared => self.make_shared(&out, &objs)?,
        }
        ui::ok(&format!("Built {}", out.display()));

        Ok(Artifact { path: out, kind })
    }

    /// One compiler invocation per source; stops at the first failure.
    fn compile_sources(&self, srcs: &[PathBuf], kind: LibKind) -> Result<Vec<PathBuf>, BuildError> {
        let mut objs = Vec::with_capacity(srcs.len());
        for src in srcs {
            let obj = src.with_extension("o");
            ui::debug(&format!("Compiling {} → {}", src.display(), obj.display()));

            let mut args = self.config.cxxflags.clone();
            if kind == LibKind::Shared
                && let Some(pic) = self.config.platform.pic_flag()
            {
                args.push(pic.to_string());
            }
            args.push("-c".to_string());
            args.push(path_arg(src));
            args.push("-o".to_string());
            args.push(path_arg(&obj));

            self.runner.run(&self.config.cxx, &args, &self.config.root)?;
            objs.push(obj);
        }
        Ok(objs)
    }

    fn make_static(&self, out: &Path, objs: &[PathBuf]) -> Result<(), BuildError> {
        let mut args = self.config.arflags.clone();
        args.push(path_arg(out));
        args.extend(objs.iter().map(|o| path_arg(o)));
        self.runner.run(&self.config.ar, &args, &self.config.root)
    }

    fn make_shared(&self, out: &Path, objs: &[PathBuf]) -> Result<(), BuildError> {
        let mut args = self.config.cxxflags.clone();
        args.extend(
            self.config
                .platform
                .shared_link_flags()
                .iter()
                .map(|f| f.to_string()),
        );
        args.push("-o".to_string());
        args.push(path_arg(out));
        args.extend(objs.iter().map(|o| path_arg(o)));
        self.runner.run(&self.config.cxx, &args, &self.config.root)
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
