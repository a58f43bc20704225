//! ersim - emergency room training simulation in the terminal.
//!
//! Reads one command per line from stdin (or a script file), applies it to
//! the session, and prints what happened.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ersim_core::prelude::*;
use ersim_logic::roles::Role;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "ersim")]
#[command(about = "Emergency room training simulation")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON patient roster replacing the built-in one
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Starting role
    #[arg(long)]
    role: Option<Role>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print case summaries and the shift report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let roster = match &args.roster {
        Some(path) => Roster::load(path)
            .with_context(|| format!("loading roster from {}", path.display()))?,
        None => Roster::builtin().context("built-in roster is invalid")?,
    };
    tracing::info!(patients = roster.len(), "roster loaded");

    let mut engine = Engine::new(config, roster);
    if let Some(role) = args.role {
        engine.dispatch(Action::SelectRole(role))?;
    }

    let mut shell = Shell {
        engine,
        json: args.json,
        interactive: args.script.is_none(),
    };

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            shell.run(BufReader::new(file))
        }
        None => shell.run(io::stdin().lock()),
    }
}

struct Shell {
    engine: Engine,
    json: bool,
    /// Wall-clock deterioration only runs for a live player.
    interactive: bool,
}

impl Shell {
    fn run(&mut self, mut input: impl BufRead) -> Result<()> {
        println!("🏥 ER Simulation (seed {}). Type 'help' for commands.", self.engine.seed());
        println!("{}", render::room(self.engine.session().room()));

        let mut line = String::new();
        loop {
            if self.interactive {
                print!("[{}] > ", self.engine.session().room());
                io::stdout().flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.interactive {
                if let Some(summary) = self.engine.tick() {
                    self.print_summary(&summary)?;
                }
            } else if !line.trim().is_empty() {
                println!("> {}", line.trim());
            }

            match commands::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Err(err) => println!("⚠️  {err}"),
            }
        }

        self.print_report()
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let session = self.engine.session();
        match command {
            Command::Help => println!("{}", commands::help()),
            Command::Status => print!("{}", render::status(session)),
            Command::Inventory => println!("{}", render::inventory(session.inventory())),
            Command::Log if session.log().is_empty() => println!("Log is empty."),
            Command::Log => print!("{}", render::log_lines(session.log().recent(usize::MAX))),
            Command::Ecg => match (self.engine.ecg_trace(), session.patient()) {
                (Some(trace), Some(p)) => print!("{}", render::ecg_strip(&trace, p.vitals.heart_rate)),
                _ => println!("No patient on the monitor."),
            },
            Command::Report => self.print_report()?,
            Command::Wait(secs) => {
                let before = self.engine.session().log().len();
                match self.engine.advance(secs) {
                    Some(summary) => self.print_summary(&summary)?,
                    None => self.print_new_entries(before)?,
                }
            }
            Command::Act(action) => self.act(action)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn act(&mut self, action: Action) -> Result<()> {
        let before = self.engine.session().log().len();
        match self.engine.dispatch(action) {
            Ok(Some(summary)) => self.print_summary(&summary)?,
            Ok(None) => match action {
                Action::SelectRoom(room) => println!("{}", render::room(room)),
                Action::SelectRole(role) => println!("👤 You are now a {role}."),
                Action::Collect(item) => println!(
                    "🎒 Collected {item} ({} held)",
                    self.engine.session().inventory().count(item)
                ),
                Action::NextPatient => print!("{}", render::status(self.engine.session())),
                _ => self.print_new_entries(before)?,
            },
            Err(err) => println!("⚠️  {err}"),
        }
        Ok(())
    }

    /// Print log entries added since the log had `before` entries, then
    /// the patient's vitals.
    fn print_new_entries(&self, before: usize) -> Result<()> {
        let session = self.engine.session();
        let entries = session.log().entries();
        for entry in entries.iter().skip(before) {
            println!("{entry}");
        }
        if let Some(p) = session.patient() {
            println!("   {}", render::vitals(&p.vitals));
        }
        Ok(())
    }

    fn print_summary(&self, summary: &CaseSummary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(summary)?);
        } else {
            print!("{}", render::summary(summary));
        }
        Ok(())
    }

    fn print_report(&self) -> Result<()> {
        let report = self.engine.report();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render::report(&report));
        }
        Ok(())
    }
}
