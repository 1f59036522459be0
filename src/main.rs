use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::{debug, info, LevelFilter};

use sportsbook::catalog::{sample_history, Catalog};
use sportsbook::history::MemoryBetLog;
use sportsbook::leaderboard::Leaderboard;
use sportsbook::settings::Settings;
use sportsbook::Sportsbook;

use crate::cli::{Flow, Session};

mod cli;

#[derive(Parser)]
struct Args {
    /// TOML settings file, `sportsbook.toml` is read if present
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    log_level: Option<LevelFilter>,
    /// Game catalog JSON to use instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Start with an empty bet history
    #[arg(long)]
    no_sample_history: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let level = match args.log_level {
        Some(level) => level,
        None => settings
            .log_level
            .parse()
            .with_context(|| format!("invalid log level '{}'", settings.log_level))?,
    };
    Builder::default()
        .filter_level(level)
        .write_style(WriteStyle::Always)
        .init();
    debug!("Settings: {:?}", settings);

    let mut session = build_session(&args, &settings)?;
    run_session(&mut session)
}

fn build_session(args: &Args, settings: &Settings) -> Result<Session> {
    let catalog = match args.catalog.as_ref().or(settings.catalog_path.as_ref()) {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin()?,
    };
    let history = if settings.sample_history && !args.no_sample_history {
        MemoryBetLog::with_bets(sample_history()?)
    } else {
        MemoryBetLog::new()
    };
    Ok(Session::new(
        Sportsbook::new(Box::new(history)),
        catalog,
        Leaderboard::demo(),
        settings.default_mode,
    ))
}

fn run_session(session: &mut Session) -> Result<()> {
    info!("Session started, type `help` for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        match session.handle_line(&line?) {
            Ok(Flow::Continue(out)) => write!(stdout, "{}", out)?,
            Ok(Flow::Quit) => break,
            Err(e) => writeln!(stdout, "error: {:#}", e)?,
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    info!("Session ended");
    Ok(())
}
