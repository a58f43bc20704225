//! ER Sim Headless Harness
//!
//! Sweeps the treatment tables and plays scripted cases through the real
//! session reducer. Runs entirely in-process, no terminal interaction.
//!
//! Usage:
//!   cargo run -p ersim-simtest
//!   cargo run -p ersim-simtest -- --verbose

use std::collections::HashSet;

use ersim_core::config::SimConfig;
use ersim_core::roster::{Patient, Roster};
use ersim_core::session::{Action, CaseSummary, Disposition, Session};
use ersim_logic::catalog::Item;
use ersim_logic::constants::{bounds, normal};
use ersim_logic::deterioration::deteriorate;
use ersim_logic::diagnosis::{transfer_is_appropriate, Destination, Diagnosis, Effect};
use ersim_logic::diagnostics::{informative_tests, DiagnosticTest};
use ersim_logic::roles::Role;
use ersim_logic::rooms::Room;
use ersim_logic::scoring::{self, Grade};
use ersim_logic::vitals::{BloodPressure, Vitals};
use ersim_logic::Labeled;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 0x5EED;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== ER Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Built-in roster
    results.extend(validate_roster(verbose));

    // 2. Treatment table
    results.extend(validate_treatment_table(verbose));

    // 3. Vitals bounds under random walks
    results.extend(validate_vitals_bounds(verbose));

    // 4. Diagnostic tests
    results.extend(validate_diagnostics(verbose));

    // 5. Scoring bands
    results.extend(validate_scoring(verbose));

    // 6. Ideal play-through per diagnosis
    results.extend(validate_ideal_cases(verbose));

    // 7. Neglected patients
    results.extend(validate_neglect(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Roster ───────────────────────────────────────────────────────────

fn validate_roster(verbose: bool) -> Vec<TestResult> {
    println!("--- Roster ---");
    let mut results = Vec::new();

    let roster = match Roster::builtin() {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult::new("roster_parse", false, e.to_string()));
            return results;
        }
    };
    results.push(TestResult::new(
        "roster_parse",
        true,
        format!("{} patients loaded", roster.len()),
    ));

    let missing: Vec<_> = Diagnosis::all()
        .iter()
        .filter(|d| !roster.patients().iter().any(|p| p.diagnosis == **d))
        .collect();
    results.push(TestResult::new(
        "roster_covers_diagnoses",
        missing.is_empty(),
        if missing.is_empty() {
            "every diagnosis has a patient".to_string()
        } else {
            format!("no patient for {:?}", missing)
        },
    ));

    let mut names = HashSet::new();
    let dupes: Vec<_> = roster
        .patients()
        .iter()
        .filter(|p| !names.insert(p.name.as_str()))
        .map(|p| p.name.as_str())
        .collect();
    results.push(TestResult::new(
        "roster_unique_names",
        dupes.is_empty(),
        format!("duplicates: {:?}", dupes),
    ));

    // a patient contraindicated against their own first-line drug
    // would have no clean path to an Excellent grade
    let blocked: Vec<_> = roster
        .patients()
        .iter()
        .filter(|p| {
            let usable = p
                .diagnosis
                .effective_items()
                .iter()
                .filter(|i| match i {
                    Item::Medication(m) => !p.contraindications().contains(m),
                    Item::Supply(_) => true,
                })
                .count();
            usable == 0
        })
        .map(|p| p.name.as_str())
        .collect();
    results.push(TestResult::new(
        "roster_treatable",
        blocked.is_empty(),
        format!("patients without a usable effective item: {:?}", blocked),
    ));

    if verbose {
        for p in roster.patients() {
            println!(
                "  {:<18} {:<13} BP {} HR {} SpO2 {} ({})",
                p.name,
                p.diagnosis,
                p.vitals.blood_pressure,
                p.vitals.heart_rate,
                p.vitals.oxygen_saturation,
                p.vitals.severity()
            );
        }
    }

    results
}

// ── 2. Treatment table ──────────────────────────────────────────────────

fn validate_treatment_table(verbose: bool) -> Vec<TestResult> {
    println!("--- Treatment Table ---");
    let mut results = Vec::new();

    for &d in Diagnosis::all() {
        let effective = d.effective_items();
        let harmful = d.harmful_items();
        let overlap: Vec<_> = effective.iter().filter(|i| harmful.contains(i)).collect();
        results.push(TestResult::new(
            format!("table_{}_disjoint", d.label()),
            overlap.is_empty() && !effective.is_empty(),
            format!(
                "{} effective, {} harmful, overlap {:?}",
                effective.len(),
                harmful.len(),
                overlap
            ),
        ));

        if verbose {
            let row: Vec<String> = Item::all()
                .into_iter()
                .map(|i| {
                    let mark = match d.effect_of(i) {
                        Effect::Effective => "+",
                        Effect::Limited => ".",
                        Effect::Harmful => "-",
                    };
                    mark.to_string()
                })
                .collect();
            println!("  {:<14} {}", d.label(), row.join(""));
        }
    }

    let unstocked: Vec<_> = Item::all()
        .into_iter()
        .filter(|i| !i.stocked_in().stocks_items())
        .collect();
    results.push(TestResult::new(
        "items_collectable",
        unstocked.is_empty(),
        format!("{} items, unstocked: {:?}", Item::all().len(), unstocked),
    ));

    results
}

// ── 3. Vitals bounds ────────────────────────────────────────────────────

fn random_vitals(rng: &mut impl Rng) -> Vitals {
    Vitals {
        blood_pressure: BloodPressure::new(
            rng.gen_range(bounds::SYSTOLIC_MIN..=bounds::SYSTOLIC_MAX),
            rng.gen_range(bounds::DIASTOLIC_MIN..=bounds::DIASTOLIC_MAX),
        ),
        heart_rate: rng.gen_range(bounds::HEART_RATE_MIN..=bounds::HEART_RATE_MAX),
        oxygen_saturation: rng.gen_range(bounds::SPO2_MIN..=bounds::SPO2_MAX),
        respiratory_rate: rng.gen_range(bounds::RESP_RATE_MIN..=bounds::RESP_RATE_MAX),
        temperature: rng.gen_range(bounds::TEMP_MIN..=bounds::TEMP_MAX),
    }
}

fn validate_vitals_bounds(_verbose: bool) -> Vec<TestResult> {
    println!("--- Vitals Bounds ---");
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let walks = 500;
    let mut escapes = 0;
    let mut overshoots = 0;

    for _ in 0..walks {
        let mut v = random_vitals(&mut rng);
        for _ in 0..40 {
            match rng.gen_range(0..3) {
                0 => {
                    let before = v;
                    v.improve();
                    // improve never crosses a normal target
                    let crossed = |a: i32, b: i32, n: i32| (a < n && b > n) || (a > n && b < n);
                    if crossed(before.heart_rate, v.heart_rate, normal::HEART_RATE)
                        || crossed(
                            before.respiratory_rate,
                            v.respiratory_rate,
                            normal::RESP_RATE,
                        )
                    {
                        overshoots += 1;
                    }
                }
                1 => v.worsen(),
                _ => {
                    if let Some(next) = deteriorate(&v, 30.0, 30.0, &mut rng) {
                        v = next;
                    }
                }
            }
            if !v.in_bounds() {
                escapes += 1;
            }
        }
    }

    vec![
        TestResult::new(
            "vitals_stay_in_bounds",
            escapes == 0,
            format!("{} walks x 40 steps, {} escapes", walks, escapes),
        ),
        TestResult::new(
            "improve_no_overshoot",
            overshoots == 0,
            format!("{} overshoots", overshoots),
        ),
    ]
}

// ── 4. Diagnostics ──────────────────────────────────────────────────────

fn validate_diagnostics(_verbose: bool) -> Vec<TestResult> {
    println!("--- Diagnostics ---");
    let mut results = Vec::new();

    let uninformed: Vec<_> = Diagnosis::all()
        .iter()
        .filter(|d| informative_tests(**d).is_empty())
        .collect();
    results.push(TestResult::new(
        "every_diagnosis_has_a_test",
        uninformed.is_empty(),
        format!("without tests: {:?}", uninformed),
    ));

    let misplaced: Vec<_> = DiagnosticTest::all()
        .iter()
        .filter(|t| !t.room().runs_tests())
        .collect();
    results.push(TestResult::new(
        "tests_in_test_rooms",
        misplaced.is_empty(),
        format!("{} tests, misplaced {:?}", DiagnosticTest::all().len(), misplaced),
    ));

    let ambiguous: Vec<_> = DiagnosticTest::all()
        .iter()
        .filter(|t| {
            Diagnosis::all()
                .iter()
                .filter(|d| t.is_informative(**d))
                .count()
                > 1
        })
        .collect();
    results.push(TestResult::new(
        "tests_unambiguous",
        ambiguous.is_empty(),
        format!("informative for several diagnoses: {:?}", ambiguous),
    ));

    results
}

// ── 5. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let grades: Vec<Grade> = (0..=100u8).map(Grade::from_score).collect();
    let monotonic = grades.windows(2).all(|w| w[0] <= w[1]);

    let extremes = [i32::MIN, -500, 0, 100, 500, i32::MAX];
    let clamped = extremes
        .iter()
        .all(|s| scoring::final_score(*s) <= 100);

    vec![
        TestResult::new(
            "grades_monotonic",
            monotonic && grades[0] == Grade::Poor && grades[100] == Grade::Excellent,
            "Poor..Excellent over 0..=100",
        ),
        TestResult::new("final_score_clamped", clamped, "extreme running scores clamp to 0..=100"),
    ]
}

// ── 6. Ideal cases ──────────────────────────────────────────────────────

/// Test, confirm, treat with every usable effective item, operate when
/// indicated, then transfer to an appropriate destination.
fn play_ideal(patient: &Patient, rng: &mut ChaCha8Rng) -> Result<CaseSummary, String> {
    let roster = Roster::new(vec![patient.clone()]).map_err(|e| e.to_string())?;
    let mut s = Session::new(SimConfig::default(), roster);
    let mut step = |s: &mut Session, action: Action| {
        s.apply(action, rng)
            .map_err(|e| format!("{:?}: {}", action, e))
    };

    step(&mut s, Action::NextPatient)?;
    let diagnosis = patient.diagnosis;

    for &test in informative_tests(diagnosis) {
        step(&mut s, Action::SelectRoom(test.room()))?;
        step(&mut s, Action::RunTest(test))?;
    }
    step(&mut s, Action::SelectRoom(Room::Er))?;
    step(&mut s, Action::ConfirmDiagnosis(diagnosis))?;

    for &item in diagnosis.effective_items() {
        if let Item::Medication(m) = item {
            if patient.contraindications().contains(&m) {
                continue;
            }
        }
        step(&mut s, Action::SelectRoom(item.stocked_in()))?;
        step(&mut s, Action::Collect(item))?;
        step(&mut s, Action::SelectRoom(Room::Er))?;
        step(&mut s, Action::use_item(item))?;
    }

    if diagnosis.needs_surgery() {
        step(&mut s, Action::SelectRole(Role::Surgeon))?;
        step(&mut s, Action::SelectRoom(Room::OperatingRoom))?;
        step(&mut s, Action::PerformSurgery)?;
        step(&mut s, Action::SelectRoom(Room::Er))?;
    }

    let active = s.patient().ok_or("patient lost before transfer")?;
    let dest = Destination::all()
        .iter()
        .copied()
        .find(|d| {
            transfer_is_appropriate(diagnosis, *d, active.operated, active.vitals.severity())
        })
        .unwrap_or(Destination::Icu);
    step(&mut s, Action::Transfer(dest))?.ok_or_else(|| "transfer did not close the case".to_string())
}

fn validate_ideal_cases(verbose: bool) -> Vec<TestResult> {
    println!("--- Ideal Cases ---");
    let mut results = Vec::new();
    let Ok(roster) = Roster::builtin() else {
        return vec![TestResult::new("ideal_roster", false, "built-in roster failed to load")];
    };
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    for patient in roster.patients() {
        let name = format!("ideal_{}", patient.name.replace(' ', "_").to_lowercase());
        match play_ideal(patient, &mut rng) {
            Ok(summary) => {
                let ok = matches!(summary.disposition, Disposition::Transferred(_))
                    && summary.grade >= Grade::Fair
                    && summary.diagnosis_confirmed == Some(true)
                    && summary.resource_efficiency == 100;
                if verbose {
                    println!(
                        "  {:<18} {:<13} -> {:<16} {:>3} {}",
                        summary.patient_name,
                        summary.diagnosis,
                        summary.disposition,
                        summary.score,
                        summary.grade
                    );
                }
                results.push(TestResult::new(
                    name,
                    ok,
                    format!(
                        "{} scored {} ({}), accuracy {}",
                        summary.disposition, summary.score, summary.grade, summary.diagnostic_accuracy
                    ),
                ));
            }
            Err(e) => results.push(TestResult::new(name, false, e)),
        }
    }

    results
}

// ── 7. Neglect ──────────────────────────────────────────────────────────

fn validate_neglect(_verbose: bool) -> Vec<TestResult> {
    println!("--- Neglect ---");
    let Ok(roster) = Roster::builtin() else {
        return vec![TestResult::new("neglect_roster", false, "built-in roster failed to load")];
    };
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut results = Vec::new();

    for patient in roster.patients() {
        let Ok(single) = Roster::new(vec![patient.clone()]) else {
            continue;
        };
        let mut s = Session::new(SimConfig::default(), single);
        if s.apply(Action::NextPatient, &mut rng).is_err() {
            continue;
        }

        let mut ticks = 0;
        let mut outcome = None;
        // SpO2 falls at least 1 per step, so every patient dies within 40 steps
        while ticks < 100 && outcome.is_none() {
            outcome = s
                .apply(Action::Tick { elapsed_secs: 30.0 }, &mut rng)
                .ok()
                .flatten();
            ticks += 1;
        }

        let name = format!("neglect_{}", patient.name.replace(' ', "_").to_lowercase());
        match outcome {
            Some(summary) => results.push(TestResult::new(
                name,
                summary.disposition == Disposition::Deceased
                    && summary.score == 0
                    && s.patient().is_none(),
                format!("died after {} ticks", ticks),
            )),
            None => results.push(TestResult::new(name, false, "patient never died")),
        }
    }

    results
}
