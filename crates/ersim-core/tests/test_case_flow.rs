//! Integration tests for whole cases driven through the reducer.
//!
//! Exercises: NextPatient → Collect → Use/Give → RunTest → Confirm
//! → Surgery → Transfer / death, plus score and consumption policies.

use ersim_core::prelude::*;
use ersim_logic::catalog::{Item, Medication, Supply};
use ersim_logic::diagnosis::{Destination, Diagnosis, Effect};
use ersim_logic::diagnostics::DiagnosticTest;
use ersim_logic::roles::Role;
use ersim_logic::rooms::Room;
use ersim_logic::scoring::Grade;
use ersim_logic::vitals::{BloodPressure, Vitals};
use ersim_logic::{ActionError, Labeled};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Helpers ────────────────────────────────────────────────────────────

fn vitals(spo2: i32, hr: i32) -> Vitals {
    Vitals {
        blood_pressure: BloodPressure::new(130, 85),
        heart_rate: hr,
        oxygen_saturation: spo2,
        respiratory_rate: 20,
        temperature: 37.0,
    }
}

fn patient(name: &str, diagnosis: Diagnosis, vitals: Vitals) -> Patient {
    Patient {
        name: name.to_string(),
        age: 40,
        symptoms: "presenting complaint".to_string(),
        diagnosis,
        vitals,
        history: None,
    }
}

fn session(patients: Vec<Patient>, config: SimConfig) -> (Session, ChaCha8Rng) {
    let roster = Roster::new(patients).unwrap();
    (Session::new(config, roster), ChaCha8Rng::seed_from_u64(99))
}

/// A session with one admitted patient of `diagnosis`.
fn admitted(diagnosis: Diagnosis, v: Vitals) -> (Session, ChaCha8Rng) {
    let (mut s, mut rng) = session(vec![patient("Case", diagnosis, v)], SimConfig::default());
    s.apply(Action::NextPatient, &mut rng).unwrap();
    (s, rng)
}

fn go(s: &mut Session, room: Room, rng: &mut ChaCha8Rng) {
    s.apply(Action::SelectRoom(room), rng).unwrap();
}

fn collect(s: &mut Session, item: Item, rng: &mut ChaCha8Rng) {
    let back = s.room();
    go(s, item.stocked_in(), rng);
    s.apply(Action::Collect(item), rng).unwrap();
    go(s, back, rng);
}

// ── Treatment table ────────────────────────────────────────────────────

#[test]
fn heart_attack_oxygen_mask_improves() {
    let (mut s, mut rng) = admitted(Diagnosis::HeartAttack, vitals(90, 112));
    collect(&mut s, Supply::OxygenMask.into(), &mut rng);
    s.apply(Action::UseSupply(Supply::OxygenMask), &mut rng).unwrap();

    let p = s.patient().unwrap();
    assert_eq!(p.vitals.oxygen_saturation, 94);
    assert_eq!(s.score(), 10);
    assert_eq!(s.log().count(EntryKind::Effective), 1);
}

#[test]
fn stroke_oxygen_mask_is_limited() {
    let (mut s, mut rng) = admitted(Diagnosis::Stroke, vitals(93, 94));
    collect(&mut s, Supply::OxygenMask.into(), &mut rng);
    s.apply(Action::UseSupply(Supply::OxygenMask), &mut rng).unwrap();

    assert_eq!(s.score(), 0);
    assert_eq!(s.patient().unwrap().vitals, vitals(93, 94));
    let last = s.log().recent(1).next().unwrap();
    assert_eq!(last.kind, EntryKind::Limited);
    assert!(last.text.contains("limited effect"));
}

#[test]
fn every_item_matches_the_table() {
    for &diagnosis in Diagnosis::all() {
        for item in Item::all() {
            let start = vitals(92, 100);
            let (mut s, mut rng) = admitted(diagnosis, start);
            collect(&mut s, item, &mut rng);
            s.apply(Action::use_item(item), &mut rng).unwrap();

            let after = s.patient().unwrap().vitals;
            let (score, expected) = match diagnosis.effect_of(item) {
                Effect::Effective => (10, {
                    let mut v = start;
                    v.improve();
                    v
                }),
                Effect::Limited => (0, start),
                Effect::Harmful => (-10, {
                    let mut v = start;
                    v.worsen();
                    v
                }),
            };
            assert_eq!(s.score(), score, "{} with {}", diagnosis, item);
            assert_eq!(after, expected, "{} with {}", diagnosis, item);
            assert!(after.in_bounds());
        }
    }
}

#[test]
fn contraindicated_medication_is_harmful() {
    let mut p = patient("Allergic", Diagnosis::Appendicitis, vitals(98, 104));
    p.history = Some(ersim_core::roster::MedicalHistory {
        contraindications: vec![Medication::Antibiotics],
        ..Default::default()
    });
    let (mut s, mut rng) = session(vec![p], SimConfig::default());
    s.apply(Action::NextPatient, &mut rng).unwrap();
    collect(&mut s, Medication::Antibiotics.into(), &mut rng);
    s.apply(Action::GiveMedication(Medication::Antibiotics), &mut rng)
        .unwrap();

    assert_eq!(s.score(), -10);
    assert_eq!(s.log().count(EntryKind::Harmful), 1);
}

// ── Rejections ─────────────────────────────────────────────────────────

#[test]
fn rejected_actions_change_nothing() {
    let (mut s, mut rng) = admitted(Diagnosis::Fracture, vitals(99, 98));
    let log_len = s.log().len();

    let attempts = [
        Action::UseSupply(Supply::Splint),
        Action::Collect(Item::Medication(Medication::Morphine)),
        Action::RunTest(DiagnosticTest::LimbXray),
        Action::PerformSurgery,
    ];
    for action in attempts {
        assert!(s.apply(action, &mut rng).is_err(), "{:?} accepted", action);
    }

    assert_eq!(s.score(), 0);
    assert_eq!(s.log().len(), log_len);
    assert!(s.inventory().is_empty());
    assert_eq!(s.patient().unwrap().vitals, vitals(99, 98));
}

#[test]
fn next_patient_outside_er_rejected() {
    let (mut s, mut rng) = session(
        vec![patient("A", Diagnosis::Fracture, vitals(98, 90))],
        SimConfig::default(),
    );
    go(&mut s, Room::Pharmacy, &mut rng);
    let err = s.apply(Action::NextPatient, &mut rng).unwrap_err();
    assert!(matches!(err, ActionError::WrongRoom { .. }));
    assert!(s.patient().is_none());
}

// ── Full cases ─────────────────────────────────────────────────────────

#[test]
fn ideal_appendicitis_case() {
    let (mut s, mut rng) = admitted(Diagnosis::Appendicitis, vitals(98, 104));

    go(&mut s, Room::DiagnosticLab, &mut rng);
    s.apply(Action::RunTest(DiagnosticTest::Cbc), &mut rng).unwrap();
    go(&mut s, Room::Radiology, &mut rng);
    s.apply(Action::RunTest(DiagnosticTest::AbdominalUltrasound), &mut rng)
        .unwrap();
    go(&mut s, Room::Er, &mut rng);
    s.apply(Action::ConfirmDiagnosis(Diagnosis::Appendicitis), &mut rng)
        .unwrap();
    collect(&mut s, Supply::IvLine.into(), &mut rng);
    s.apply(Action::UseSupply(Supply::IvLine), &mut rng).unwrap();

    s.apply(Action::SelectRole(Role::Surgeon), &mut rng).unwrap();
    go(&mut s, Room::OperatingRoom, &mut rng);
    s.apply(Action::PerformSurgery, &mut rng).unwrap();
    go(&mut s, Room::Er, &mut rng);

    let summary = s
        .apply(Action::Transfer(Destination::Icu), &mut rng)
        .unwrap()
        .unwrap();

    assert_eq!(summary.score, 75);
    assert_eq!(summary.grade, Grade::Good);
    assert_eq!(summary.diagnostic_accuracy, 80);
    assert_eq!(summary.resource_efficiency, 100);
    assert_eq!(summary.effective_actions, 5);
    assert_eq!(summary.limited_actions, 0);
    assert_eq!(summary.diagnosis_confirmed, Some(true));
    assert_eq!(summary.role, Role::Surgeon);
    assert_eq!(
        summary.disposition,
        Disposition::Transferred(Destination::Icu)
    );
}

#[test]
fn transfer_always_clears_case() {
    let (mut s, mut rng) = admitted(Diagnosis::HeartAttack, vitals(90, 112));
    let summary = s
        .apply(Action::Transfer(Destination::Discharge), &mut rng)
        .unwrap()
        .unwrap();

    // inappropriate: -10, clamped to 0 on the summary
    assert_eq!(summary.score, 0);
    assert_eq!(summary.grade, Grade::Poor);
    assert!(s.patient().is_none());
    assert!(s.log().is_empty());
    assert_eq!(s.cases().len(), 1);
    assert_eq!(
        s.apply(Action::Transfer(Destination::Icu), &mut rng),
        Err(ActionError::NoActivePatient)
    );
}

#[test]
fn critical_patient_cannot_be_discharged() {
    let mut v = vitals(80, 130);
    v.blood_pressure = BloodPressure::new(86, 52);
    let (mut s, mut rng) = admitted(Diagnosis::Anaphylaxis, v);
    s.apply(Action::Transfer(Destination::Discharge), &mut rng)
        .unwrap();
    assert_eq!(s.score(), -10);
}

#[test]
fn summary_penalizes_waste() {
    let (mut s, mut rng) = admitted(Diagnosis::Fracture, vitals(99, 98));
    collect(&mut s, Supply::OxygenMask.into(), &mut rng);
    s.apply(Action::UseSupply(Supply::OxygenMask), &mut rng).unwrap();
    s.apply(Action::UseSupply(Supply::OxygenMask), &mut rng).unwrap();
    go(&mut s, Room::Radiology, &mut rng);
    s.apply(Action::RunTest(DiagnosticTest::CtHead), &mut rng).unwrap();
    s.apply(Action::RunTest(DiagnosticTest::CtHead), &mut rng).unwrap();
    go(&mut s, Room::Er, &mut rng);

    let summary = s
        .apply(Action::Transfer(Destination::Discharge), &mut rng)
        .unwrap()
        .unwrap();
    assert_eq!(summary.resource_efficiency, 100 - 20 - 5);
    assert_eq!(summary.diagnostic_accuracy, 55);
    assert_eq!(summary.limited_actions, 4);
    assert_eq!(summary.diagnosis_confirmed, None);
}

// ── Death ──────────────────────────────────────────────────────────────

#[test]
fn harmful_treatment_can_kill() {
    let (mut s, mut rng) = admitted(Diagnosis::AsthmaAttack, vitals(67, 124));
    collect(&mut s, Medication::Morphine.into(), &mut rng);
    let summary = s
        .apply(Action::GiveMedication(Medication::Morphine), &mut rng)
        .unwrap()
        .expect("patient should die");

    assert_eq!(summary.disposition, Disposition::Deceased);
    assert_eq!(summary.score, 0);
    assert_eq!(summary.final_vitals.oxygen_saturation, 65);
    assert!(s.patient().is_none());
    assert!(s.log().is_empty());
}

#[test]
fn untreated_patient_deteriorates_to_death() {
    let (mut s, mut rng) = admitted(Diagnosis::Stroke, vitals(66, 100));
    let mut summary = None;
    for _ in 0..10 {
        summary = s.apply(Action::Tick { elapsed_secs: 30.0 }, &mut rng).unwrap();
        if summary.is_some() {
            break;
        }
    }
    let summary = summary.expect("patient should die");
    assert_eq!(summary.disposition, Disposition::Deceased);
    assert_eq!(s.cases().len(), 1);
}

#[test]
fn effective_treatment_resets_deterioration_clock() {
    let (mut s, mut rng) = admitted(Diagnosis::HeartAttack, vitals(90, 112));
    collect(&mut s, Supply::OxygenMask.into(), &mut rng);
    s.apply(Action::Tick { elapsed_secs: 25.0 }, &mut rng).unwrap();
    s.apply(Action::UseSupply(Supply::OxygenMask), &mut rng).unwrap();
    assert_eq!(s.patient().unwrap().since_last_check, 0.0);
    s.apply(Action::Tick { elapsed_secs: 25.0 }, &mut rng).unwrap();
    // 50s total, but never 30s without treatment
    assert_eq!(s.patient().unwrap().vitals.oxygen_saturation, 94);
}

// ── Policies ───────────────────────────────────────────────────────────

fn two_patients() -> Vec<Patient> {
    vec![
        patient("First", Diagnosis::Fracture, vitals(99, 98)),
        patient("Second", Diagnosis::Fracture, vitals(99, 98)),
    ]
}

#[test]
fn next_patient_resets_score_and_log() {
    let (mut s, mut rng) = session(two_patients(), SimConfig::default());
    s.apply(Action::NextPatient, &mut rng).unwrap();
    s.apply(Action::ConfirmDiagnosis(Diagnosis::Fracture), &mut rng)
        .unwrap();
    assert_eq!(s.score(), 20);

    let first = s.patient().unwrap().patient.name.clone();
    s.apply(Action::NextPatient, &mut rng).unwrap();
    assert_eq!(s.score(), 0);
    assert_eq!(s.log().len(), 1);
    assert_ne!(s.patient().unwrap().patient.name, first);
}

#[test]
fn carry_policy_keeps_score() {
    let config = SimConfig {
        score_policy: ScorePolicy::Carry,
        initial_score: 5,
        ..SimConfig::default()
    };
    let (mut s, mut rng) = session(two_patients(), config);
    assert_eq!(s.score(), 5);
    s.apply(Action::NextPatient, &mut rng).unwrap();
    s.apply(Action::ConfirmDiagnosis(Diagnosis::Fracture), &mut rng)
        .unwrap();
    s.apply(Action::Transfer(Destination::Discharge), &mut rng)
        .unwrap();
    s.apply(Action::NextPatient, &mut rng).unwrap();
    assert_eq!(s.score(), 35);
}

#[test]
fn next_patient_avoids_previous_case() {
    let (mut s, mut rng) = session(two_patients(), SimConfig::default());
    let mut previous: Option<String> = None;
    for _ in 0..10 {
        s.apply(Action::NextPatient, &mut rng).unwrap();
        let name = s.patient().unwrap().patient.name.clone();
        s.apply(Action::Transfer(Destination::Discharge), &mut rng)
            .unwrap();
        assert_ne!(Some(&name), previous.as_ref());
        previous = Some(name);
    }
}

#[test]
fn inventory_survives_next_patient() {
    let (mut s, mut rng) = session(two_patients(), SimConfig::default());
    collect(&mut s, Supply::Splint.into(), &mut rng);
    s.apply(Action::NextPatient, &mut rng).unwrap();
    s.apply(Action::NextPatient, &mut rng).unwrap();
    assert!(s.inventory().contains(Supply::Splint.into()));
}

#[test]
fn consumption_policy_applies() {
    let config = SimConfig {
        consume_supplies: true,
        consume_medications: false,
        ..SimConfig::default()
    };
    let (mut s, mut rng) = session(
        vec![patient("A", Diagnosis::Fracture, vitals(99, 98))],
        config,
    );
    s.apply(Action::NextPatient, &mut rng).unwrap();
    collect(&mut s, Supply::Splint.into(), &mut rng);
    collect(&mut s, Medication::Morphine.into(), &mut rng);
    s.apply(Action::UseSupply(Supply::Splint), &mut rng).unwrap();
    s.apply(Action::GiveMedication(Medication::Morphine), &mut rng)
        .unwrap();

    assert!(!s.inventory().contains(Supply::Splint.into()));
    assert!(s.inventory().contains(Medication::Morphine.into()));
}

// ── Roster file ────────────────────────────────────────────────────────

#[test]
fn roster_file_round_trip() {
    let path = std::env::temp_dir().join(format!("ersim-roster-{}.json", std::process::id()));
    let json = r#"[{
        "name": "File Patient",
        "age": 30,
        "symptoms": "Ankle pain",
        "diagnosis": "fracture",
        "vitals": {
            "blood_pressure": "125/80",
            "heart_rate": 88,
            "oxygen_saturation": 99,
            "respiratory_rate": 16,
            "temperature": 36.8
        }
    }]"#;
    std::fs::write(&path, json).unwrap();
    let roster = Roster::load(&path);
    let _ = std::fs::remove_file(&path);

    let roster = roster.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.patients()[0].name, "File Patient");
}
