//! Patient roster: the fixed list new cases are drawn from.
//!
//! The built-in roster is embedded from `data/patients.json`; a roster file
//! of the same shape can replace it at startup.

use std::path::{Path, PathBuf};

use ersim_logic::catalog::Medication;
use ersim_logic::diagnosis::Diagnosis;
use ersim_logic::vitals::Vitals;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_ROSTER: &str = include_str!("../../../data/patients.json");

/// Free-text history plus the medications this patient must not receive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalHistory {
    pub allergies: Vec<String>,
    pub past_surgeries: Vec<String>,
    pub medications: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub contraindications: Vec<Medication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: u32,
    pub symptoms: String,
    pub diagnosis: Diagnosis,
    pub vitals: Vitals,
    #[serde(default)]
    pub history: Option<MedicalHistory>,
}

impl Patient {
    pub fn contraindications(&self) -> &[Medication] {
        self.history
            .as_ref()
            .map(|h| h.contraindications.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("roster has no patients")]
    Empty,
    #[error("patient '{name}': {reason}")]
    InvalidPatient { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    patients: Vec<Patient>,
}

impl Roster {
    /// The roster shipped with the simulation.
    pub fn builtin() -> Result<Self, RosterError> {
        Self::from_json(BUILTIN_ROSTER)
    }

    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let patients: Vec<Patient> = serde_json::from_str(json)?;
        Self::new(patients)
    }

    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let text = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validate and wrap a list of patients.
    pub fn new(patients: Vec<Patient>) -> Result<Self, RosterError> {
        if patients.is_empty() {
            return Err(RosterError::Empty);
        }
        for p in &patients {
            let invalid = |reason: &str| RosterError::InvalidPatient {
                name: p.name.clone(),
                reason: reason.to_string(),
            };
            if p.name.trim().is_empty() {
                return Err(invalid("name is empty"));
            }
            if p.age > 120 {
                return Err(invalid("age above 120"));
            }
            if !p.vitals.in_bounds() {
                return Err(invalid("vitals outside simulation bounds"));
            }
            if p.vitals.is_fatal() {
                return Err(invalid("vitals are already fatal on arrival"));
            }
        }
        Ok(Self { patients })
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Pick a random patient, avoiding `exclude` (by name) when there is
    /// anyone else to choose.
    pub fn pick(&self, exclude: Option<&str>, rng: &mut impl Rng) -> Option<&Patient> {
        let others: Vec<&Patient> = self
            .patients
            .iter()
            .filter(|p| Some(p.name.as_str()) != exclude)
            .collect();
        if others.is_empty() {
            self.patients.choose(rng)
        } else {
            others.choose(rng).copied()
        }
    }
}
