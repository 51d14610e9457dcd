use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ExecError;
use crate::history::History;

/// Per-session state shared by the built-ins.
///
/// Forked children inherit a copy, so nothing they do here is seen by the
/// parent session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cwd: PathBuf,
    home: Option<PathBuf>,
    pub history: History,
}

impl Session {
    pub fn new() -> io::Result<Self> {
        let cwd = env::current_dir()?;
        let home = env::var_os("HOME").map(PathBuf::from);
        Ok(Self::with_dirs(cwd, home))
    }

    pub fn with_dirs(cwd: PathBuf, home: Option<PathBuf>) -> Self {
        Session {
            cwd,
            home,
            history: History::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(path)
    }

    /// Moves the session to `target`. On failure the working directory is
    /// left untouched.
    pub fn change_dir(&mut self, target: &Path) -> Result<(), ExecError> {
        let resolved = self.resolve_path(target);
        let canonical = fs::canonicalize(&resolved)
            .and_then(|p| {
                if fs::metadata(&p)?.is_dir() {
                    Ok(p)
                } else {
                    Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"))
                }
            })
            .map_err(|source| ExecError::ChangeDir {
                path: target.to_path_buf(),
                source,
            })?;
        log::debug!("cd {} -> {}", target.display(), canonical.display());
        self.cwd = canonical;
        Ok(())
    }

    pub fn change_dir_home(&mut self) -> Result<(), ExecError> {
        let home = self.home.clone().ok_or(ExecError::HomeNotSet)?;
        self.change_dir(&home)
    }
}
