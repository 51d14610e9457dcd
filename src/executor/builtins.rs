use std::io::Write;
use std::path::Path;

use super::executor::{ExecOutcome, ExecStatus};
use crate::error::ExecError;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Pwd,
    Bash,
    Exit,
    Echo,
    History,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(Builtin::Cd),
            "pwd" => Some(Builtin::Pwd),
            "bash" => Some(Builtin::Bash),
            "exit" => Some(Builtin::Exit),
            "echo" => Some(Builtin::Echo),
            "history" => Some(Builtin::History),
            _ => None,
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Cd => "Usage: cd [dir]",
            Builtin::Pwd => "Usage: pwd",
            Builtin::Bash => "Usage: bash <file>",
            Builtin::Exit => "Usage: exit",
            Builtin::Echo => "Usage: echo [args...]",
            Builtin::History => "Usage: history",
        }
    }

    /// `argc` counts the command name itself.
    pub fn check_arity(self, argc: usize) -> Result<(), ExecError> {
        let ok = match self {
            Builtin::Cd => argc == 1 || argc == 2,
            Builtin::Bash => argc == 2,
            Builtin::Echo => true,
            Builtin::Pwd | Builtin::Exit | Builtin::History => argc == 1,
        };
        if ok {
            Ok(())
        } else {
            Err(ExecError::Usage(self.usage()))
        }
    }
}

pub fn cd(args: &[String], session: &mut Session) -> ExecStatus {
    match args.first() {
        Some(dir) => session.change_dir(Path::new(dir))?,
        None => session.change_dir_home()?,
    }
    Ok(ExecOutcome::Code(0))
}

pub fn pwd(session: &Session, out: &mut dyn Write) -> ExecStatus {
    writeln!(out, "{}", session.cwd().display())?;
    Ok(ExecOutcome::Code(0))
}

pub fn echo(args: &[String], out: &mut dyn Write) -> ExecStatus {
    writeln!(out, "{}", args.join(" "))?;
    Ok(ExecOutcome::Code(0))
}

pub fn history(session: &Session, out: &mut dyn Write) -> ExecStatus {
    session.history.write_to(out)?;
    Ok(ExecOutcome::Code(0))
}
