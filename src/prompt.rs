use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::config::{Config, ShowPrompt};

pub struct ShellPrompt {
    template: String,
    visible: bool,
}

impl ShellPrompt {
    pub fn new(config: &Config) -> Self {
        let visible = match config.show_prompt {
            ShowPrompt::Always => true,
            ShowPrompt::Never => false,
            ShowPrompt::Auto => io::stdin().is_terminal(),
        };
        ShellPrompt {
            template: config.prompt.clone(),
            visible,
        }
    }

    pub fn render(&self, cwd: &Path) -> String {
        self.template.replace("{cwd}", &cwd.display().to_string())
    }

    pub fn show_prompt(&self, cwd: &Path, out: &mut dyn Write) -> io::Result<()> {
        if self.visible {
            write!(out, "{}", self.render(cwd))?;
            out.flush()?;
        }
        Ok(())
    }

    /// Next line without its terminator and with every `\r` removed;
    /// `None` at end of input.
    pub fn read_line(&self, input: &mut dyn BufRead) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
        }
        buf.retain(|c| c != '\r');
        Ok(Some(buf))
    }
}
