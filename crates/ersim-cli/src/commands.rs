//! Prompt command parsing.
//!
//! One command per line: a verb followed by an optional name. Names are
//! matched forgivingly, so `collect oxygen mask`, `collect Oxygen-Mask`
//! and `collect o2` are the same command.

use anyhow::{anyhow, bail, Result};
use ersim_core::session::Action;
use ersim_logic::catalog::{Item, Medication};
use ersim_logic::diagnosis::{Destination, Diagnosis};
use ersim_logic::diagnostics::DiagnosticTest;
use ersim_logic::labels::label_list;
use ersim_logic::roles::Role;
use ersim_logic::rooms::Room;

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Status,
    Inventory,
    Log,
    Ecg,
    Report,
    Quit,
    /// Let simulated time pass without reading the clock.
    Wait(f64),
    Act(Action),
}

const COMMANDS: &str = "\
Commands:
  status                     patient, vitals and recent log
  role <role>                switch role
  room <room>                walk to a room
  next                       admit the next patient (ER)
  collect <item>             take an item from this room's stock
  use <item>                 use a supply or medication on the patient (ER)
  give <medication>          give a medication (ER)
  test <test>                run a lab or imaging test (Lab / Radiology)
  diagnose <diagnosis>       confirm a diagnosis (ER)
  operate                    perform surgery (OR, surgeons only)
  transfer <destination>     discharge, surgery or icu (ER)
  inventory                  what you are carrying
  log                        treatment log, newest first
  ecg                        live ECG strip
  wait <seconds>             let time pass
  report                     end-of-shift report
  quit                       leave the simulation";

/// Command list followed by the names each argument accepts.
pub fn help() -> String {
    format!(
        "{COMMANDS}\n\nRoles: {}\nRooms: {}\nDiagnoses: {}\nDestinations: {}",
        label_list::<Role>(),
        label_list::<Room>(),
        label_list::<Diagnosis>(),
        label_list::<Destination>(),
    )
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let verb = verb.to_ascii_lowercase();

    let needs_arg = |what: &str| arg(&verb, rest, what);

    let command = match verb.as_str() {
        "help" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "inventory" | "inv" | "i" => Command::Inventory,
        "log" => Command::Log,
        "ecg" => Command::Ecg,
        "report" => Command::Report,
        "quit" | "exit" | "q" => Command::Quit,
        "wait" => {
            let secs: f64 = needs_arg("seconds")?
                .parse()
                .map_err(|_| anyhow!("wait needs a number of seconds, got '{rest}'"))?;
            if !(secs.is_finite() && secs >= 0.0) {
                bail!("wait needs a non-negative number of seconds");
            }
            Command::Wait(secs)
        }
        "role" => Command::Act(Action::SelectRole(needs_arg("role")?.parse::<Role>()?)),
        "room" | "go" => Command::Act(Action::SelectRoom(needs_arg("room")?.parse::<Room>()?)),
        "next" => Command::Act(Action::NextPatient),
        "collect" | "take" => Command::Act(Action::Collect(needs_arg("item")?.parse::<Item>()?)),
        "use" => Command::Act(Action::use_item(needs_arg("item")?.parse::<Item>()?)),
        "give" => Command::Act(Action::GiveMedication(
            needs_arg("medication")?.parse::<Medication>()?,
        )),
        "test" => Command::Act(Action::RunTest(
            needs_arg("test")?.parse::<DiagnosticTest>()?,
        )),
        "diagnose" => Command::Act(Action::ConfirmDiagnosis(
            needs_arg("diagnosis")?.parse::<Diagnosis>()?,
        )),
        "operate" | "surgery" => Command::Act(Action::PerformSurgery),
        "transfer" => Command::Act(Action::Transfer(
            needs_arg("destination")?.parse::<Destination>()?,
        )),
        other => bail!("unknown command '{other}', type 'help' for a list"),
    };
    Ok(Some(command))
}

fn arg<'a>(verb: &str, rest: &'a str, what: &str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(anyhow!("usage: {verb} <{what}>"))
    } else {
        Ok(rest)
    }
}
