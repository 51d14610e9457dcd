use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_PROMPT: &str = "Shell@COMP354:{cwd}$ ";
pub const CONFIG_FILE_NAME: &str = ".tinyshrc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prompt template; `{cwd}` is replaced with the working directory.
    pub prompt: String,
    pub log_level: String,
    pub show_prompt: ShowPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowPrompt {
    /// Only when stdin is a terminal.
    Auto,
    Always,
    Never,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            log_level: "warn".to_string(),
            show_prompt: ShowPrompt::Auto,
        }
    }

    /// `$HOME/.tinyshrc`, if it exists.
    pub fn default_path(home: Option<&Path>) -> Option<PathBuf> {
        home.map(|h| h.join(CONFIG_FILE_NAME)).filter(|p| p.is_file())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse {
                    line: lineno,
                    msg: format!("no '=' found: {}", line),
                });
            };

            // Values are taken verbatim so a prompt can end in a space.
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "log_level" => config.log_level = value.trim().to_string(),
                "show_prompt" => {
                    config.show_prompt = match value.trim() {
                        "auto" => ShowPrompt::Auto,
                        "always" => ShowPrompt::Always,
                        "never" => ShowPrompt::Never,
                        other => {
                            return Err(ConfigError::Parse {
                                line: lineno,
                                msg: format!("invalid show_prompt: {}", other),
                            });
                        }
                    }
                }
                other => {
                    return Err(ConfigError::Parse {
                        line: lineno,
                        msg: format!("unknown key: {}", other),
                    });
                }
            }
        }

        Ok(config)
    }
}
