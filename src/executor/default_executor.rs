use std::io::Write;
use std::path::Path;

use super::batch::run_batch_file;
use super::builtins::{self, Builtin};
use super::executor::{ExecOutcome, ExecStatus, Executor};
use super::launcher;
use crate::parser;
use crate::session::Session;

/// Runs built-ins in-process and everything else as a child process.
#[derive(Debug, Default)]
pub struct DefaultExecutor;

impl Executor for DefaultExecutor {
    fn exec(&mut self, argv: &[String], session: &mut Session, out: &mut dyn Write) -> ExecStatus {
        let Some(name) = argv.first() else {
            return Ok(ExecOutcome::Code(0));
        };
        match Builtin::from_name(name) {
            Some(builtin) => self.exec_builtin(builtin, argv, session, out),
            None => self.exec_external(argv, session, out),
        }
    }
}

impl DefaultExecutor {
    pub fn new() -> Self {
        DefaultExecutor
    }

    fn exec_builtin(
        &mut self,
        builtin: Builtin,
        argv: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> ExecStatus {
        builtin.check_arity(argv.len())?;
        log::debug!("builtin {:?} {:?}", builtin, &argv[1..]);
        let args = &argv[1..];
        match builtin {
            Builtin::Cd => builtins::cd(args, session),
            Builtin::Pwd => builtins::pwd(session, out),
            Builtin::Bash => run_batch_file(self, Path::new(&args[0]), session, out),
            Builtin::Exit => Ok(ExecOutcome::Exit(0)),
            Builtin::Echo => builtins::echo(args, out),
            Builtin::History => builtins::history(session, out),
        }
    }

    fn exec_external(&mut self, argv: &[String], session: &mut Session, out: &mut dyn Write) -> ExecStatus {
        let command = parser::resolve(argv)?;
        out.flush()?;
        let child = launcher::spawn(&command, session.cwd())?;
        let code = child.wait()?;
        Ok(ExecOutcome::Code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExecError, RedirectError};
    use crate::lexer::tokenize;
    use std::fs;

    struct Fixture {
        dir: tempfile::TempDir,
        session: Session,
        out: Vec<u8>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = fs::canonicalize(dir.path()).unwrap();
            let session = Session::with_dirs(root.clone(), Some(root));
            Fixture {
                dir,
                session,
                out: Vec::new(),
            }
        }

        fn run(&mut self, line: &str) -> ExecStatus {
            self.session.history.record(line);
            DefaultExecutor::new().exec(&tokenize(line), &mut self.session, &mut self.out)
        }

        fn output(&mut self) -> String {
            String::from_utf8(std::mem::take(&mut self.out)).unwrap()
        }
    }

    #[test]
    fn test_empty_argv_is_a_no_op() {
        let mut fx = Fixture::new();
        let result = DefaultExecutor::new().exec(&[], &mut fx.session, &mut fx.out);
        assert!(matches!(result, Ok(ExecOutcome::Code(0))));
        assert!(fx.out.is_empty());
    }

    #[test]
    fn test_echo_and_pwd() {
        let mut fx = Fixture::new();
        fx.run("echo   hello   'big world'").unwrap();
        assert_eq!(fx.output(), "hello big world\n");
        fx.run("echo").unwrap();
        assert_eq!(fx.output(), "\n");
        fx.run("pwd").unwrap();
        fx.run("pwd").unwrap();
        let root = fx.session.cwd().display().to_string();
        assert_eq!(fx.output(), format!("{root}\n{root}\n"));
    }

    #[test]
    fn test_history_lists_entries() {
        let mut fx = Fixture::new();
        fx.session.history.record("echo hi");
        fx.session.history.record("pwd");
        let argv = tokenize("history");
        DefaultExecutor::new()
            .exec(&argv, &mut fx.session, &mut fx.out)
            .unwrap();
        assert_eq!(fx.output(), "1  echo hi\n2  pwd\n");
        assert_eq!(fx.session.history.len(), 2);
    }

    #[test]
    fn test_cd_changes_session_dir() {
        let mut fx = Fixture::new();
        let root = fx.session.cwd().to_path_buf();
        fs::create_dir(root.join("sub")).unwrap();
        fx.run("cd sub").unwrap();
        assert_eq!(fx.session.cwd(), root.join("sub"));
        fx.run("cd").unwrap();
        assert_eq!(fx.session.cwd(), root);
        assert!(matches!(fx.run("cd /nonexistent"), Err(ExecError::ChangeDir { .. })));
        assert_eq!(fx.session.cwd(), root);
    }

    #[test]
    fn test_usage_errors_do_nothing() {
        let mut fx = Fixture::new();
        let before = fx.session.cwd().to_path_buf();
        assert!(matches!(fx.run("cd a b"), Err(ExecError::Usage(_))));
        assert!(matches!(fx.run("pwd extra"), Err(ExecError::Usage(_))));
        assert!(matches!(fx.run("exit now"), Err(ExecError::Usage(_))));
        assert!(matches!(fx.run("history 3"), Err(ExecError::Usage(_))));
        assert!(matches!(fx.run("bash"), Err(ExecError::Usage(_))));
        assert_eq!(fx.session.cwd(), before);
        assert!(fx.output().is_empty());
    }

    #[test]
    fn test_exit_requests_termination() {
        let mut fx = Fixture::new();
        assert!(matches!(fx.run("exit"), Ok(ExecOutcome::Exit(0))));
    }

    #[test]
    fn test_builtins_ignore_redirection() {
        let mut fx = Fixture::new();
        fx.run("echo hi > file").unwrap();
        assert_eq!(fx.output(), "hi > file\n");
        assert!(!fx.dir.path().join("file").exists());
    }

    #[test]
    fn test_external_command_with_redirection() {
        let mut fx = Fixture::new();
        let result = fx.run("sh -c 'echo external' > out.txt");
        assert!(matches!(result, Ok(ExecOutcome::Code(0))));
        assert_eq!(
            fs::read_to_string(fx.dir.path().join("out.txt")).unwrap(),
            "external\n"
        );
    }

    #[test]
    fn test_external_runs_in_session_dir() {
        let mut fx = Fixture::new();
        fs::create_dir(fx.session.cwd().join("inner")).unwrap();
        fx.run("cd inner").unwrap();
        fx.run("touch made-here").unwrap();
        assert!(fx.dir.path().join("inner").join("made-here").exists());
    }

    #[test]
    fn test_redirection_errors_are_reported() {
        let mut fx = Fixture::new();
        assert!(matches!(
            fx.run("cat > a > b"),
            Err(ExecError::Redirect(RedirectError::MultipleOutputRedirection))
        ));
        assert!(matches!(
            fx.run("ls >"),
            Err(ExecError::Redirect(RedirectError::MissingRedirectionTarget(_)))
        ));
    }

    #[test]
    fn test_unknown_command_status() {
        let mut fx = Fixture::new();
        assert!(matches!(
            fx.run("tinysh-no-such-program arg"),
            Ok(ExecOutcome::Code(launcher::STATUS_NOT_FOUND))
        ));
    }

    #[test]
    fn test_bash_runs_script_lines() {
        let mut fx = Fixture::new();
        fs::write(
            fx.session.cwd().join("script.sh"),
            "echo first\n\nmkdir made\ncd made\npwd\n",
        )
        .unwrap();
        let root = fx.session.cwd().to_path_buf();
        fx.run("bash script.sh").unwrap();
        assert_eq!(
            fx.output(),
            format!("first\n{}\n", root.join("made").display())
        );
        assert_eq!(
            fx.session.history.entries(),
            ["bash script.sh", "echo first", "mkdir made", "cd made", "pwd"]
        );
    }

    #[test]
    fn test_bash_missing_file() {
        let mut fx = Fixture::new();
        assert!(matches!(fx.run("bash nope.sh"), Err(ExecError::BatchFile { .. })));
    }
}
