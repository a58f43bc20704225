//! Session state and the action reducer.
//!
//! [`Session::apply`] is the only way state changes. Every action is
//! validated (room, role, patient, inventory) before anything is touched,
//! so a rejected action leaves the session exactly as it was.

use ersim_logic::actions::{validate, ActionKind};
use ersim_logic::catalog::{Item, Medication, Supply};
use ersim_logic::constants::score;
use ersim_logic::deterioration::deteriorate;
use ersim_logic::diagnosis::{effect_for_patient, transfer_is_appropriate, Destination, Diagnosis, Effect};
use ersim_logic::diagnostics::DiagnosticTest;
use ersim_logic::roles::Role;
use ersim_logic::rooms::Room;
use ersim_logic::scoring::{self, Grade};
use ersim_logic::vitals::Vitals;
use ersim_logic::ActionError;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ScorePolicy, SimConfig};
use crate::inventory::Inventory;
use crate::roster::{Patient, Roster};
use crate::treatment_log::{EntryKind, TreatmentLog};

/// Everything a player (or the clock) can do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectRole(Role),
    SelectRoom(Room),
    NextPatient,
    Collect(Item),
    UseSupply(Supply),
    GiveMedication(Medication),
    RunTest(DiagnosticTest),
    ConfirmDiagnosis(Diagnosis),
    PerformSurgery,
    Transfer(Destination),
    /// Wall-clock time passing.
    Tick { elapsed_secs: f64 },
}

impl Action {
    /// `UseSupply` or `GiveMedication`, whichever fits `item`.
    pub fn use_item(item: Item) -> Self {
        match item {
            Item::Supply(s) => Action::UseSupply(s),
            Item::Medication(m) => Action::GiveMedication(m),
        }
    }

    fn kind(self) -> Option<ActionKind> {
        match self {
            Action::NextPatient => Some(ActionKind::NextPatient),
            Action::Collect(item) => Some(ActionKind::Collect(item)),
            Action::UseSupply(_) | Action::GiveMedication(_) => Some(ActionKind::UseItem),
            Action::RunTest(test) => Some(ActionKind::RunTest(test)),
            Action::ConfirmDiagnosis(_) => Some(ActionKind::ConfirmDiagnosis),
            Action::PerformSurgery => Some(ActionKind::PerformSurgery),
            Action::Transfer(_) => Some(ActionKind::Transfer),
            Action::SelectRole(_) | Action::SelectRoom(_) | Action::Tick { .. } => None,
        }
    }
}

/// The patient currently in the ER.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePatient {
    pub patient: Patient,
    /// Live readings; the roster copy keeps the arrival vitals.
    pub vitals: Vitals,
    pub tests_run: Vec<DiagnosticTest>,
    pub confirmed: Option<Diagnosis>,
    pub operated: bool,
    /// Seconds since the last effective intervention or deterioration step.
    pub since_last_check: f64,
    pub time_in_care: f64,
}

impl ActivePatient {
    fn admit(patient: &Patient) -> Self {
        Self {
            patient: patient.clone(),
            vitals: patient.vitals,
            tests_run: Vec::new(),
            confirmed: None,
            operated: false,
            since_last_check: 0.0,
            time_in_care: 0.0,
        }
    }

    pub fn diagnosis(&self) -> Diagnosis {
        self.patient.diagnosis
    }
}

/// How a case ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "destination", rename_all = "snake_case")]
pub enum Disposition {
    Transferred(Destination),
    Deceased,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposition::Transferred(dest) => write!(f, "{dest}"),
            Disposition::Deceased => f.write_str("Deceased"),
        }
    }
}

/// The scored outcome of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub patient_name: String,
    pub diagnosis: Diagnosis,
    pub disposition: Disposition,
    pub role: Role,
    pub score: u8,
    pub grade: Grade,
    pub diagnostic_accuracy: u8,
    pub resource_efficiency: u8,
    pub effective_actions: u32,
    pub limited_actions: u32,
    /// `None` when no diagnosis was confirmed.
    pub diagnosis_confirmed: Option<bool>,
    pub final_vitals: Vitals,
    pub time_in_care_secs: f64,
    pub feedback: String,
}

pub struct Session {
    config: SimConfig,
    roster: Roster,
    role: Role,
    room: Room,
    patient: Option<ActivePatient>,
    inventory: Inventory,
    log: TreatmentLog,
    score: i32,
    last_patient: Option<String>,
    cases: Vec<CaseSummary>,
}

impl Session {
    pub fn new(config: SimConfig, roster: Roster) -> Self {
        let score = config.initial_score;
        Self {
            config,
            roster,
            role: Role::default(),
            room: Room::Er,
            patient: None,
            inventory: Inventory::new(),
            log: TreatmentLog::new(),
            score,
            last_patient: None,
            cases: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn room(&self) -> Room {
        self.room
    }

    pub fn patient(&self) -> Option<&ActivePatient> {
        self.patient.as_ref()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn log(&self) -> &TreatmentLog {
        &self.log
    }

    /// Running score, unclamped.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Completed cases, oldest first.
    pub fn cases(&self) -> &[CaseSummary] {
        &self.cases
    }

    /// Apply one action. Returns a summary when the action ended a case.
    pub fn apply(
        &mut self,
        action: Action,
        rng: &mut impl Rng,
    ) -> Result<Option<CaseSummary>, ActionError> {
        if let Some(kind) = action.kind() {
            if let Err(err) = validate(kind, self.room, self.role) {
                log::warn!("rejected {:?}: {}", action, err);
                return Err(err);
            }
        }

        let result = match action {
            Action::SelectRole(role) => {
                log::debug!("role -> {}", role);
                self.role = role;
                Ok(None)
            }
            Action::SelectRoom(room) => {
                log::debug!("room -> {}", room);
                self.room = room;
                Ok(None)
            }
            Action::NextPatient => self.next_patient(rng),
            Action::Collect(item) => {
                self.inventory.add(item);
                log::debug!("collected {} ({} held)", item, self.inventory.count(item));
                Ok(None)
            }
            Action::UseSupply(supply) => self.use_item(Item::Supply(supply), rng),
            Action::GiveMedication(med) => self.use_item(Item::Medication(med), rng),
            Action::RunTest(test) => self.run_test(test),
            Action::ConfirmDiagnosis(diagnosis) => self.confirm_diagnosis(diagnosis),
            Action::PerformSurgery => self.perform_surgery(rng),
            Action::Transfer(dest) => self.transfer(dest, rng),
            Action::Tick { elapsed_secs } => self.tick(elapsed_secs, rng),
        };

        if let Err(err) = &result {
            log::warn!("rejected {:?}: {}", action, err);
        }
        result
    }

    fn active(&self) -> Result<&ActivePatient, ActionError> {
        self.patient.as_ref().ok_or(ActionError::NoActivePatient)
    }

    fn next_patient(&mut self, rng: &mut impl Rng) -> Result<Option<CaseSummary>, ActionError> {
        let exclude = self
            .patient
            .as_ref()
            .map(|p| p.patient.name.clone())
            .or_else(|| self.last_patient.clone());
        let picked = self
            .roster
            .pick(exclude.as_deref(), rng)
            .ok_or(ActionError::EmptyRoster)?;

        if let Some(prev) = &self.patient {
            log::info!("{} left untreated for the next arrival", prev.patient.name);
        }
        log::info!(
            "patient arrived: {} ({}), {}",
            picked.name,
            picked.age,
            picked.diagnosis
        );

        let arrival = format!("{} arrived: {}", picked.name, picked.symptoms);
        self.patient = Some(ActivePatient::admit(picked));
        self.log.clear();
        self.log.push(EntryKind::Note, arrival);
        if self.config.score_policy == ScorePolicy::Reset {
            self.score = self.config.initial_score;
        }
        Ok(None)
    }

    fn use_item(&mut self, item: Item, rng: &mut impl Rng) -> Result<Option<CaseSummary>, ActionError> {
        let diagnosis = self.active()?.diagnosis();
        if !self.inventory.contains(item) {
            return Err(ActionError::NotInInventory(item));
        }

        let effect = effect_for_patient(diagnosis, item, self.active()?.patient.contraindications());
        log::debug!("{} on {}: {:?}", item, diagnosis, effect);
        if self.config.consumes(item) {
            self.inventory.remove_one(item);
        }

        let patient = self.patient.as_mut().ok_or(ActionError::NoActivePatient)?;
        match effect {
            Effect::Effective => {
                patient.vitals.improve();
                patient.since_last_check = 0.0;
                self.score += score::EFFECTIVE_USE;
                self.log
                    .push(EntryKind::Effective, format!("{item} was effective"));
            }
            Effect::Limited => {
                self.score += score::LIMITED_USE;
                self.log
                    .push(EntryKind::Limited, format!("{item} had limited effect"));
            }
            Effect::Harmful => {
                patient.vitals.worsen();
                self.score += score::HARMFUL_USE;
                self.log
                    .push(EntryKind::Harmful, format!("{item} made the patient worse"));
            }
        }
        Ok(self.check_death(rng))
    }

    fn run_test(&mut self, test: DiagnosticTest) -> Result<Option<CaseSummary>, ActionError> {
        let patient = self.patient.as_mut().ok_or(ActionError::NoActivePatient)?;
        if patient.tests_run.contains(&test) {
            self.score += score::TEST_REPEATED;
            self.log
                .push(EntryKind::TestRepeated, format!("{test} already resulted"));
            return Ok(None);
        }

        let result = test.run(patient.diagnosis());
        patient.tests_run.push(test);
        log::debug!("{} -> informative={}", test, result.informative);
        if result.informative {
            self.score += score::TEST_INFORMATIVE;
            self.log
                .push(EntryKind::TestInformative, format!("{test}: {}", result.finding));
        } else {
            self.score += score::TEST_UNREMARKABLE;
            self.log
                .push(EntryKind::TestUnremarkable, format!("{test}: {}", result.finding));
        }
        Ok(None)
    }

    fn confirm_diagnosis(&mut self, diagnosis: Diagnosis) -> Result<Option<CaseSummary>, ActionError> {
        let patient = self.patient.as_mut().ok_or(ActionError::NoActivePatient)?;
        if let Some(prev) = patient.confirmed {
            return Err(ActionError::AlreadyConfirmed(prev));
        }
        patient.confirmed = Some(diagnosis);
        if diagnosis == patient.diagnosis() {
            self.score += score::DIAGNOSIS_CORRECT;
            self.log
                .push(EntryKind::DiagnosisCorrect, format!("Diagnosis confirmed: {diagnosis}"));
        } else {
            self.score += score::DIAGNOSIS_WRONG;
            self.log.push(
                EntryKind::DiagnosisWrong,
                format!("{diagnosis} does not fit the presentation"),
            );
        }
        Ok(None)
    }

    fn perform_surgery(&mut self, rng: &mut impl Rng) -> Result<Option<CaseSummary>, ActionError> {
        let patient = self.patient.as_mut().ok_or(ActionError::NoActivePatient)?;
        let indicated = patient.diagnosis().needs_surgery() && !patient.operated;
        patient.operated = true;
        if indicated {
            patient.vitals.improve();
            patient.vitals.improve();
            patient.since_last_check = 0.0;
            self.score += score::SURGERY_INDICATED;
            self.log
                .push(EntryKind::Effective, "Surgery successful, patient stabilizing");
        } else {
            patient.vitals.worsen();
            self.score += score::SURGERY_UNNECESSARY;
            self.log
                .push(EntryKind::Harmful, "Unnecessary surgery, patient worsened");
        }
        log::info!("surgery performed (indicated: {})", indicated);
        Ok(self.check_death(rng))
    }

    fn transfer(&mut self, dest: Destination, rng: &mut impl Rng) -> Result<Option<CaseSummary>, ActionError> {
        let patient = self.active()?;
        let appropriate = transfer_is_appropriate(
            patient.diagnosis(),
            dest,
            patient.operated,
            patient.vitals.severity(),
        );
        if appropriate {
            self.score += score::TRANSFER_APPROPRIATE;
            self.log.push(EntryKind::Note, format!("{dest}: appropriate"));
        } else {
            self.score += score::TRANSFER_INAPPROPRIATE;
            self.log
                .push(EntryKind::Alert, format!("{dest}: inappropriate for this patient"));
        }
        Ok(self.close_case(Disposition::Transferred(dest), rng))
    }

    fn tick(&mut self, elapsed_secs: f64, rng: &mut impl Rng) -> Result<Option<CaseSummary>, ActionError> {
        let threshold = self.config.deterioration_threshold_secs;
        let Some(patient) = self.patient.as_mut() else {
            return Ok(None);
        };
        if !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            return Ok(None);
        }

        patient.since_last_check += elapsed_secs;
        patient.time_in_care += elapsed_secs;
        if let Some(next) = deteriorate(&patient.vitals, patient.since_last_check, threshold, rng) {
            patient.vitals = next;
            patient.since_last_check = 0.0;
            log::info!(
                "{} deteriorating: HR {}, SpO2 {}",
                patient.patient.name,
                next.heart_rate,
                next.oxygen_saturation
            );
            self.log
                .push(EntryKind::Alert, "Patient condition is deteriorating");
        }
        Ok(self.check_death(rng))
    }

    /// End the case if the current vitals are fatal.
    fn check_death(&mut self, rng: &mut impl Rng) -> Option<CaseSummary> {
        let patient = self.patient.as_ref()?;
        if !patient.vitals.is_fatal() {
            return None;
        }
        log::info!("{} died", patient.patient.name);
        self.score += score::DEATH;
        self.log.push(EntryKind::Alert, "Patient has died");
        self.close_case(Disposition::Deceased, rng)
    }

    /// Summarize the active case, then clear the patient and the log.
    fn close_case(&mut self, disposition: Disposition, rng: &mut impl Rng) -> Option<CaseSummary> {
        let patient = self.patient.take()?;
        let summary = self.summarize(&patient, disposition, rng);
        log::info!(
            "case closed: {} -> {} (score {}, {})",
            summary.patient_name,
            summary.disposition,
            summary.score,
            summary.grade
        );
        self.last_patient = Some(patient.patient.name);
        self.log.clear();
        self.cases.push(summary.clone());
        Some(summary)
    }

    fn summarize(
        &self,
        patient: &ActivePatient,
        disposition: Disposition,
        rng: &mut impl Rng,
    ) -> CaseSummary {
        let log = &self.log;
        let final_score = scoring::final_score(self.score);
        let wasted = log.count(EntryKind::Limited) + log.count(EntryKind::Harmful);

        CaseSummary {
            patient_name: patient.patient.name.clone(),
            diagnosis: patient.diagnosis(),
            disposition,
            role: self.role,
            score: final_score,
            grade: Grade::from_score(final_score),
            diagnostic_accuracy: scoring::diagnostic_accuracy(
                log.count(EntryKind::TestInformative),
                log.count(EntryKind::TestUnremarkable),
            ),
            resource_efficiency: scoring::resource_efficiency(
                wasted,
                log.count(EntryKind::TestRepeated),
            ),
            effective_actions: log.count_where(EntryKind::is_effective),
            limited_actions: log.count_where(EntryKind::is_ineffective),
            diagnosis_confirmed: patient.confirmed.map(|d| d == patient.diagnosis()),
            final_vitals: patient.vitals,
            time_in_care_secs: patient.time_in_care,
            feedback: scoring::pick_feedback(rng).to_string(),
        }
    }
}
