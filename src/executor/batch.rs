use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use super::executor::{ExecOutcome, ExecStatus, Executor};
use crate::error::ExecError;
use crate::lexer;
use crate::session::Session;

/// Runs every non-blank line of `path` through `executor`.
///
/// Each line is recorded in history before it runs. A failing line is
/// reported and the batch goes on; `exit` stops it and is passed upward.
pub fn run_batch_file<E>(
    executor: &mut E,
    path: &Path,
    session: &mut Session,
    out: &mut dyn Write,
) -> ExecStatus
where
    E: Executor + ?Sized,
{
    let resolved = session.resolve_path(path);
    let file = File::open(&resolved).map_err(|source| ExecError::BatchFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("running batch file {}", resolved.display());

    let mut status = 0;
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        session.history.record(line);

        let tokens = lexer::tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        match executor.exec(&tokens, session, out) {
            Ok(ExecOutcome::Code(code)) => status = code,
            Ok(ExecOutcome::Exit(code)) => return Ok(ExecOutcome::Exit(code)),
            Err(e) => {
                eprintln!("tinysh: {}", e);
                status = 1;
            }
        }
    }
    Ok(ExecOutcome::Code(status))
}
