use std::io::Write;

use super::executor::{ExecOutcome, ExecStatus, Executor};
use super::launcher::{self, ChildHandle};
use crate::lexer;
use crate::session::Session;

/// Splits `line` on `&`, dropping blank segments.
pub fn split_segments(line: &str) -> Vec<&str> {
    line.split('&')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Runs every `&`-separated segment of `line` in its own child process and
/// waits for all of them.
///
/// Each child dispatches its segment against a private copy of `session`, so
/// a `cd` or `exit` in a segment never reaches the caller. Children are
/// reaped in spawn order; the status of the last one is returned.
pub fn exec_parallel<E>(
    executor: &mut E,
    line: &str,
    session: &mut Session,
    out: &mut dyn Write,
) -> ExecStatus
where
    E: Executor + ?Sized,
{
    out.flush()?;
    let mut children: Vec<ChildHandle> = Vec::new();

    for segment in split_segments(line) {
        let tokens = lexer::tokenize(segment);
        if tokens.is_empty() {
            continue;
        }
        let spawned = launcher::fork_with(segment, || {
            let code = match executor.exec(&tokens, session, out) {
                Ok(ExecOutcome::Code(code)) | Ok(ExecOutcome::Exit(code)) => code,
                Err(e) => {
                    eprintln!("tinysh: {}", e);
                    1
                }
            };
            out.flush().ok();
            code
        });
        match spawned {
            Ok(child) => children.push(child),
            Err(e) => {
                log::error!("could not start segment {:?}: {}", segment, e);
                eprintln!("tinysh: {}", e);
            }
        }
    }

    let mut status = 0;
    for child in children {
        match child.wait() {
            Ok(code) => status = code,
            Err(e) => {
                eprintln!("tinysh: {}", e);
                status = 1;
            }
        }
    }
    Ok(ExecOutcome::Code(status))
}
