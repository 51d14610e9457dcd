use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tinysh::config::{Config, ConfigLoader};
use tinysh::prompt::ShellPrompt;
use tinysh::repl::Repl;
use tinysh::session::Session;

#[derive(Parser)]
#[command(name = "tinysh", version, about = "A small command interpreter")]
struct Cli {
    /// Read settings from this file instead of ~/.tinyshrc
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the commands in this file, then exit
    batch_file: Option<PathBuf>,
}

fn load_config(cli: &Cli, session: &Session) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => ConfigLoader::default_path(session.home()),
    };
    match path {
        Some(path) => ConfigLoader::load_from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut session = Session::new().context("cannot determine the working directory")?;
    let config = load_config(&cli, &session)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

    let mut repl = Repl::new(ShellPrompt::new(&config));
    let mut out = io::stdout();
    let code = match &cli.batch_file {
        Some(path) => repl.run_file(path, &mut session, &mut out),
        None => repl.run(&mut io::stdin().lock(), &mut session, &mut out)?,
    };
    std::process::exit(code);
}
