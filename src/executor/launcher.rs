use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;

use nix::errno::Errno;
use nix::fcntl::{OFlag, open};
use nix::sys::stat::Mode;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, chdir, close, dup2, execvp, fork};

use crate::ast::{Command, OutputMode};
use crate::error::ExecError;

/// Child exit status when the program cannot be found or executed.
pub const STATUS_NOT_FOUND: i32 = 1;
/// Child exit status when a redirection file cannot be opened.
pub const STATUS_REDIRECT_FAILED: i32 = 2;
/// Child exit status when the working directory snapshot is gone.
pub const STATUS_BAD_CWD: i32 = 3;

const OUTPUT_FILE_MODE: u32 = 0o644;

/// A forked child that has not been waited on yet.
///
/// `wait` consumes the handle, so a child is reaped at most once. A handle
/// dropped without `wait` is reaped on drop.
#[derive(Debug)]
#[must_use = "a spawned child must be waited on"]
pub struct ChildHandle {
    pid: Pid,
    name: String,
    reaped: bool,
}

impl ChildHandle {
    pub(crate) fn new(pid: Pid, name: impl Into<String>) -> Self {
        ChildHandle {
            pid,
            name: name.into(),
            reaped: false,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks until the child exits. Death by signal maps to `128 + signo`.
    pub fn wait(mut self) -> Result<i32, ExecError> {
        let status = wait_pid(self.pid);
        self.reaped = true;
        if let Ok(code) = status {
            log::debug!("{} (pid {}) exited with {}", self.name, self.pid, code);
        }
        status
    }
}

impl Drop for ChildHandle {
    fn drop(&mut self) {
        if !self.reaped {
            log::warn!("reaping {} (pid {}) that was never waited on", self.name, self.pid);
            let _ = wait_pid(self.pid);
        }
    }
}

fn wait_pid(pid: Pid) -> Result<i32, ExecError> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(code),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(128 + signal as i32),
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Wait(e)),
        }
    }
}

/// Forks and execs `command` with `cwd` as its working directory.
///
/// Redirections are applied in the child; any failure there is reported on
/// the child's stderr and shows up only as its exit status.
pub fn spawn(command: &Command, cwd: &Path) -> Result<ChildHandle, ExecError> {
    let prepared = Prepared::new(command, cwd)?;
    flush_stdout();

    // SAFETY: the child only touches pre-built C strings before exec or _exit.
    match unsafe { fork() }.map_err(ExecError::Fork)? {
        ForkResult::Child => prepared.exec(),
        ForkResult::Parent { child } => {
            log::debug!("spawned {} as pid {}", command.name(), child);
            Ok(ChildHandle::new(child, command.name()))
        }
    }
}

/// Forks and runs `f` in the child, which exits with the returned status.
/// `f` must flush whatever it writes; the child leaves without unwinding.
pub fn fork_with<F>(name: &str, f: F) -> Result<ChildHandle, ExecError>
where
    F: FnOnce() -> i32,
{
    flush_stdout();
    // SAFETY: the child never returns into the caller's stack; it leaves via _exit.
    match unsafe { fork() }.map_err(ExecError::Fork)? {
        ForkResult::Child => exit_child(f()),
        ForkResult::Parent { child } => {
            log::debug!("forked {:?} as pid {}", name, child);
            Ok(ChildHandle::new(child, name))
        }
    }
}

pub(crate) fn flush_stdout() {
    io::stdout().flush().ok();
}

fn exit_child(code: i32) -> ! {
    // _exit skips the atexit flush of buffers copied from the parent.
    unsafe { libc::_exit(code) }
}

/// Everything the child needs, converted before forking.
struct Prepared {
    argv: Vec<CString>,
    cwd: CString,
    input: Option<CString>,
    output: Option<(CString, OutputMode)>,
}

impl Prepared {
    fn new(command: &Command, cwd: &Path) -> Result<Self, ExecError> {
        let argv = command
            .argv
            .iter()
            .map(|arg| c_string(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        if argv.is_empty() {
            return Err(ExecError::InvalidArgument("empty command".to_string()));
        }
        let input = match &command.redirects.input {
            Some(path) => Some(c_string(path.as_bytes())?),
            None => None,
        };
        let output = match &command.redirects.output {
            Some(redirect) => Some((c_string(redirect.path.as_bytes())?, redirect.mode)),
            None => None,
        };
        Ok(Prepared {
            argv,
            cwd: c_string(cwd.as_os_str().as_bytes())?,
            input,
            output,
        })
    }

    fn exec(self) -> ! {
        if let Err(e) = chdir(self.cwd.as_c_str()) {
            eprintln!("tinysh: {}: {}", self.cwd.to_string_lossy(), e.desc());
            exit_child(STATUS_BAD_CWD);
        }

        if let Some(path) = &self.input {
            if let Err(e) = redirect_fd(path, OFlag::O_RDONLY, libc::STDIN_FILENO) {
                eprintln!("tinysh: {}: {}", path.to_string_lossy(), e.desc());
                exit_child(STATUS_REDIRECT_FAILED);
            }
        }

        if let Some((path, mode)) = &self.output {
            let flags = OFlag::O_WRONLY
                | OFlag::O_CREAT
                | match mode {
                    OutputMode::Truncate => OFlag::O_TRUNC,
                    OutputMode::Append => OFlag::O_APPEND,
                };
            if let Err(e) = redirect_fd(path, flags, libc::STDOUT_FILENO) {
                eprintln!("tinysh: {}: {}", path.to_string_lossy(), e.desc());
                exit_child(STATUS_REDIRECT_FAILED);
            }
        }

        match execvp(&self.argv[0], &self.argv) {
            Ok(never) => match never {},
            Err(_) => {
                eprintln!("{}: command not found", self.argv[0].to_string_lossy());
                exit_child(STATUS_NOT_FOUND)
            }
        }
    }
}

fn redirect_fd(path: &CStr, flags: OFlag, target: RawFd) -> nix::Result<()> {
    let fd = open(path, flags, Mode::from_bits_truncate(OUTPUT_FILE_MODE as _))?;
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}

fn c_string(bytes: &[u8]) -> Result<CString, ExecError> {
    CString::new(bytes).map_err(|_| {
        ExecError::InvalidArgument(format!(
            "{:?} contains a NUL byte",
            String::from_utf8_lossy(bytes)
        ))
    })
}
