use std::io::{BufRead, Write};
use std::path::Path;

use crate::executor::{self, DefaultExecutor, ExecOutcome, ExecStatus, Executor};
use crate::lexer;
use crate::prompt::ShellPrompt;
use crate::session::Session;

/// Reads lines from `input` and runs them until `exit` or end of input.
pub struct Repl {
    prompt: ShellPrompt,
    executor: DefaultExecutor,
}

impl Repl {
    pub fn new(prompt: ShellPrompt) -> Self {
        Repl {
            prompt,
            executor: DefaultExecutor::new(),
        }
    }

    /// Returns the status the session should exit with.
    pub fn run(
        &mut self,
        input: &mut dyn BufRead,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> std::io::Result<i32> {
        loop {
            self.prompt.show_prompt(session.cwd(), out)?;
            let Some(line) = self.prompt.read_line(input)? else {
                return Ok(0);
            };
            session.history.record(&line);

            match self.run_line(&line, session, out) {
                Ok(ExecOutcome::Exit(code)) => return Ok(code),
                Ok(ExecOutcome::Code(code)) => log::debug!("status {}", code),
                Err(e) => eprintln!("tinysh: {}", e),
            }
        }
    }

    /// Runs one line that has already been recorded in history.
    pub fn run_line(&mut self, line: &str, session: &mut Session, out: &mut dyn Write) -> ExecStatus {
        if line.contains('&') {
            return executor::exec_parallel(&mut self.executor, line, session, out);
        }
        let tokens = lexer::tokenize(line);
        self.executor.exec(&tokens, session, out)
    }

    /// Batch mode: runs `path` like the `bash` built-in.
    pub fn run_file(&mut self, path: &Path, session: &mut Session, out: &mut dyn Write) -> i32 {
        match executor::run_batch_file(&mut self.executor, path, session, out) {
            Ok(ExecOutcome::Exit(code)) => code,
            Ok(ExecOutcome::Code(_)) => 0,
            Err(e) => {
                eprintln!("tinysh: {}", e);
                0
            }
        }
    }
}
