//! Pure simulation logic for the ER simulation.
//!
//! This crate holds every table and rule of the game with no session state,
//! no clock, and no I/O. Functions take plain data (and an RNG where chance
//! is involved) and return results, so each rule is unit-testable on its own.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`actions`] | Room- and role-validated player actions |
//! | [`catalog`] | Supplies, medications, and where each is stocked |
//! | [`constants`] | Vitals bounds, normal targets, score deltas |
//! | [`deterioration`] | Elapsed-time vitals drift for untreated patients |
//! | [`diagnosis`] | Diagnoses, treatment effect table, transfer rules |
//! | [`diagnostics`] | Lab and imaging tests with canned results |
//! | [`ecg`] | Fake ECG waveform and text strip rendering |
//! | [`error`] | Action rejection reasons |
//! | [`labels`] | Display labels and forgiving name lookup |
//! | [`roles`] | Player roles |
//! | [`rooms`] | Hospital rooms |
//! | [`scoring`] | Final score clamp, grade bands, sub-scores, feedback |
//! | [`vitals`] | Vitals arithmetic, clamping, severity tiers |

pub mod actions;
pub mod catalog;
pub mod constants;
pub mod deterioration;
pub mod diagnosis;
pub mod diagnostics;
pub mod ecg;
pub mod error;
pub mod labels;
pub mod roles;
pub mod rooms;
pub mod scoring;
pub mod vitals;

pub use error::ActionError;
pub use labels::Labeled;
