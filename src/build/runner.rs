//! External process execution.
//!
//! Every compiler, archiver and test binary invocation goes through a
//! [`Runner`], one blocking call at a time.

use crate::error::BuildError;
use crate::ui;
use std::path::Path;
use std::process::Command;

pub trait Runner {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), BuildError>;
}

pub fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Spawns real processes, inheriting stdio so tool diagnostics reach the user.
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), BuildError> {
        let line = command_line(program, args);
        ui::command(&line);

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: line,
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Prints commands without executing them (`--dry-run`).
pub struct DryRunner;

impl Runner for DryRunner {
    fn run(&self, program: &str, args: &[String], _cwd: &Path) -> Result<(), BuildError> {
        ui::command(&command_line(program, args));
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording runner that imitates the compiler and archiver by creating
    //! their output files.

    use super::*;
    use std::cell::RefCell;
    use std::fs;

    #[derive(Default)]
    pub struct FakeRunner {
        pub calls: RefCell<Vec<Vec<String>>>,
        /// Fail any invocation whose command line contains this text.
        pub fail_on: Option<String>,
    }

    impl FakeRunner {
        pub fn failing_on(pattern: &str) -> Self {
            Self {
                fail_on: Some(pattern.to_string()),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, program: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c[0] == program).count()
        }
    }

    impl Runner for FakeRunner {
        fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), BuildError> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            self.calls.borrow_mut().push(call);

            let line = command_line(program, args);
            if let Some(pattern) = &self.fail_on
                && line.contains(pattern.as_str())
            {
                return Err(BuildError::CommandFailed {
                    command: line,
                    code: Some(1),
                });
            }

            // `ar rcs <out> objs...` or `<cxx> ... -o <out> ...`
            let output = if program == "ar" {
                args.get(1)
            } else {
                args.iter()
                    .position(|a| a == "-o")
                    .and_then(|i| args.get(i + 1))
            };
            if let Some(out) = output {
                let path = cwd.join(out);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
                }
                fs::write(&path, line).map_err(|e| BuildError::io(&path, e))?;
            }
            Ok(())
        }
    }
}
