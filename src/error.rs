use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RedirectError {
    #[error("multiple input redirections")]
    MultipleInputRedirection,
    #[error("multiple output redirections")]
    MultipleOutputRedirection,
    #[error("missing file name after '{0}'")]
    MissingRedirectionTarget(String),
    #[error("missing command before redirection")]
    EmptyCommand,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("cd: failed to change directory to {}: {source}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("cannot open batch file {}: {source}", path.display())]
    BatchFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("redirection error: {0}")]
    Redirect(#[from] RedirectError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] nix::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
