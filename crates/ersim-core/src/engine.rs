//! Simulation engine - owns the session, the RNG and the wall clock.

use std::time::Instant;

use ersim_logic::ecg;
use ersim_logic::ActionError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::report::ShiftReport;
use crate::roster::Roster;
use crate::session::{Action, CaseSummary, Session};

/// Main simulation engine
pub struct Engine {
    session: Session,
    rng: ChaCha8Rng,
    seed: u64,
    last_tick: Instant,
}

impl Engine {
    /// Seeded from `config.seed`, or from a fresh random seed that is
    /// logged so the run can be replayed.
    pub fn new(config: SimConfig, roster: Roster) -> Self {
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen();
                log::info!("no seed configured, using {}", seed);
                seed
            }
        };
        Self::with_seed(config, roster, seed)
    }

    pub fn with_seed(config: SimConfig, roster: Roster, seed: u64) -> Self {
        log::debug!("engine seeded with {}", seed);
        Self {
            session: Session::new(config, roster),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            last_tick: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Apply a player action.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<CaseSummary>, ActionError> {
        self.session.apply(action, &mut self.rng)
    }

    /// Feed real time elapsed since the previous tick into the session.
    pub fn tick(&mut self) -> Option<CaseSummary> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.advance(elapsed)
    }

    /// Advance simulated time without reading the clock.
    pub fn advance(&mut self, elapsed_secs: f64) -> Option<CaseSummary> {
        // Ticks are never rejected; an Err here would be a reducer bug.
        match self.dispatch(Action::Tick { elapsed_secs }) {
            Ok(summary) => summary,
            Err(err) => {
                log::error!("tick rejected: {}", err);
                None
            }
        }
    }

    /// ECG samples for the active patient's current heart rate.
    pub fn ecg_trace(&self) -> Option<Vec<f32>> {
        let patient = self.session.patient()?;
        let config = self.session.config();
        Some(ecg::waveform(
            patient.vitals.heart_rate,
            config.ecg_seconds,
            config.ecg_sample_rate,
        ))
    }

    pub fn report(&self) -> ShiftReport {
        ShiftReport::from_cases(self.session.cases())
    }
}
