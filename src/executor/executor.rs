use std::io::Write;

use crate::error::ExecError;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command ran; carries its exit status.
    Code(i32),
    /// The session has been asked to terminate with this status.
    Exit(i32),
}

pub type ExecStatus = Result<ExecOutcome, ExecError>;

pub trait Executor {
    fn exec(&mut self, argv: &[String], session: &mut Session, out: &mut dyn Write) -> ExecStatus;
}
