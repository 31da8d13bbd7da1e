//! Error kinds raised by the build operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure is terminal for the invocation.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Missing source folder: {}", .0.display())]
    MissingModuleDirectory(PathBuf),

    #[error("No source files found for '{0}'")]
    NoSourcesFound(String),

    #[error("Command failed ({}): {command}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to execute '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Missing library source: {}", .0.display())]
    MissingLibrarySource(PathBuf),

    #[error("Could not resolve a library for '{module}'")]
    LibraryUnresolved {
        module: String,
        #[source]
        source: Box<BuildError>,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error, propagating the failing tool's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            BuildError::LibraryUnresolved { source, .. } => source.exit_code(),
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
