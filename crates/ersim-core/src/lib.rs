//! ER Sim Core - emergency room training session engine
//!
//! Wraps the pure rules in `ersim_logic` with session state: the patient
//! roster, the player's inventory, the treatment log, and the running
//! score. All state changes go through a single reducer.
//!
//! # Architecture
//!
//! - **Session**: typed state plus [`Session::apply`](session::Session::apply),
//!   which validates and applies one [`Action`](session::Action)
//! - **Engine**: owns a session, a seeded RNG and the wall clock
//! - **Roster / Config**: JSON data loaded at startup
//!
//! # Example
//!
//! ```rust,no_run
//! use ersim_core::prelude::*;
//!
//! let roster = Roster::builtin().unwrap();
//! let mut engine = Engine::new(SimConfig::default(), roster);
//!
//! engine.dispatch(Action::NextPatient).unwrap();
//! if let Some(summary) = engine.tick() {
//!     println!("case closed: {}", summary.score);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod inventory;
pub mod report;
pub mod roster;
pub mod session;
pub mod treatment_log;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{ScorePolicy, SimConfig};
    pub use crate::engine::Engine;
    pub use crate::report::ShiftReport;
    pub use crate::roster::{Patient, Roster};
    pub use crate::session::{Action, CaseSummary, Disposition, Session};
    pub use crate::treatment_log::{EntryKind, LogEntry};
}
