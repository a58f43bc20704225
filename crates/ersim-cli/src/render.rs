//! Text rendering for the terminal front end.

use std::fmt::Write;

use ersim_core::inventory::Inventory;
use ersim_core::report::ShiftReport;
use ersim_core::session::{CaseSummary, Session};
use ersim_core::treatment_log::LogEntry;
use ersim_logic::catalog::Item;
use ersim_logic::diagnostics::DiagnosticTest;
use ersim_logic::ecg;
use ersim_logic::rooms::Room;
use ersim_logic::vitals::{Severity, Vitals};

const ECG_WIDTH: usize = 64;
const ECG_HEIGHT: usize = 7;

pub fn vitals(v: &Vitals) -> String {
    let severity = v.severity();
    let icon = match severity {
        Severity::Stable => "🟢",
        Severity::Guarded => "🟡",
        Severity::Critical => "🔴",
    };
    format!(
        "BP {}  HR {}  SpO2 {}%  RR {}  Temp {:.1}°C  {} {}",
        v.blood_pressure,
        v.heart_rate,
        v.oxygen_saturation,
        v.respiratory_rate,
        v.temperature,
        icon,
        severity
    )
}

/// What can be done in `room`.
pub fn room(room: Room) -> String {
    let mut out = format!("📍 {} - {}", room, room.description());
    if room.stocks_items() {
        let names: Vec<&str> = Item::stocked_at(room).iter().map(|i| i.label()).collect();
        let _ = write!(out, "\n   Stock: {}", names.join(", "));
    }
    if room.runs_tests() {
        let names: Vec<String> = DiagnosticTest::available_in(room)
            .iter()
            .map(|t| t.to_string())
            .collect();
        let _ = write!(out, "\n   Tests: {}", names.join(", "));
    }
    out
}

pub fn status(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} in the {} | score {}",
        session.role(),
        session.room(),
        session.score()
    );

    match session.patient() {
        None => {
            let _ = writeln!(out, "No active patient. Go to the ER and type 'next'.");
        }
        Some(active) => {
            let p = &active.patient;
            let _ = writeln!(out, "🧑 {} ({})", p.name, p.age);
            let _ = writeln!(out, "   Symptoms: {}", p.symptoms);
            if let Some(h) = &p.history {
                let list = |xs: &[String]| if xs.is_empty() { "none".to_string() } else { xs.join(", ") };
                let _ = writeln!(out, "   Allergies: {}", list(&h.allergies));
                let _ = writeln!(out, "   Medications: {}", list(&h.medications));
                let _ = writeln!(out, "   Conditions: {}", list(&h.chronic_conditions));
                let _ = writeln!(out, "   Past surgeries: {}", list(&h.past_surgeries));
            }
            let _ = writeln!(out, "   {}", vitals(&active.vitals));
            if let Some(d) = active.confirmed {
                let _ = writeln!(out, "   Working diagnosis: {}", d);
            }
            let limit = session.config().log_display_limit;
            if !session.log().is_empty() {
                let _ = writeln!(out, "Recent:");
                out.push_str(&log_lines(session.log().recent(limit)));
            }
        }
    }
    out
}

pub fn log_lines<'a>(entries: impl Iterator<Item = &'a LogEntry>) -> String {
    entries.fold(String::new(), |mut out, e| {
        let _ = writeln!(out, "  {}", e);
        out
    })
}

pub fn inventory(inv: &Inventory) -> String {
    if inv.is_empty() {
        return "🎒 Inventory is empty.".to_string();
    }
    let parts: Vec<String> = inv
        .grouped()
        .into_iter()
        .map(|(item, n)| if n > 1 { format!("{item} x{n}") } else { item.to_string() })
        .collect();
    format!("🎒 {}", parts.join(", "))
}

pub fn ecg_strip(samples: &[f32], heart_rate: i32) -> String {
    let mut out = format!("ECG  {} bpm\n", heart_rate);
    for row in ecg::render_strip(samples, ECG_WIDTH, ECG_HEIGHT) {
        let _ = writeln!(out, "  {}", row.trim_end());
    }
    out
}

pub fn summary(s: &CaseSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "━━━━━━━━ Case summary ━━━━━━━━");
    let _ = writeln!(out, "Patient: {} ({})", s.patient_name, s.diagnosis);
    let _ = writeln!(out, "Outcome: {}", s.disposition);
    let _ = writeln!(out, "Score: {}/100  {} {}", s.score, s.grade.icon(), s.grade);
    let _ = writeln!(out, "Diagnostic accuracy: {}%", s.diagnostic_accuracy);
    let _ = writeln!(out, "Resource efficiency: {}%", s.resource_efficiency);
    let _ = writeln!(
        out,
        "Actions: {} effective, {} limited or ineffective",
        s.effective_actions, s.limited_actions
    );
    let diagnosis = match s.diagnosis_confirmed {
        Some(true) => "confirmed correctly",
        Some(false) => "confirmed incorrectly",
        None => "never confirmed",
    };
    let _ = writeln!(out, "Diagnosis: {}", diagnosis);
    let _ = writeln!(out, "Final vitals: {}", vitals(&s.final_vitals));
    let _ = writeln!(out, "Feedback: {}", s.feedback);
    out
}

pub fn report(r: &ShiftReport) -> String {
    let mut out = String::from("━━━━━━━━ Shift report ━━━━━━━━\n");
    let (Some(avg), Some(grade)) = (r.average_score, r.overall_grade) else {
        out.push_str("No cases closed yet.\n");
        return out;
    };
    let _ = writeln!(out, "Cases: {}  Deaths: {}", r.cases, r.deaths);
    let _ = writeln!(out, "Average score: {:.1}  {} {}", avg, grade.icon(), grade);
    let _ = writeln!(out, "Correct diagnoses: {}", r.correct_diagnoses);
    for (g, n) in &r.grades {
        let _ = writeln!(out, "  {:<10} {}", g.label(), n);
    }
    if let Some((name, score)) = &r.best_case {
        let _ = writeln!(out, "Best case: {} ({})", name, score);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ersim_logic::catalog::{Medication, Supply};

    #[test]
    fn test_vitals_line() {
        let line = vitals(&Vitals::default());
        assert!(line.contains("BP 120/80"));
        assert!(line.contains("SpO2 98%"));
        assert!(line.contains("Stable"));
    }

    #[test]
    fn test_room_lists_stock_and_tests() {
        assert!(room(Room::SupplyRoom).contains("Oxygen Mask"));
        assert!(room(Room::Pharmacy).contains("Alteplase"));
        assert!(room(Room::Radiology).contains("Tests:"));
        assert!(!room(Room::Er).contains("Stock:"));
    }

    #[test]
    fn test_inventory_grouping() {
        let mut inv = Inventory::new();
        assert!(inventory(&inv).contains("empty"));
        inv.add(Supply::Splint.into());
        inv.add(Medication::Morphine.into());
        inv.add(Medication::Morphine.into());
        assert_eq!(inventory(&inv), "🎒 Splint, Morphine x2");
    }

    #[test]
    fn test_ecg_strip_has_rows() {
        let samples = ecg::waveform(75, 3.0, 250);
        let strip = ecg_strip(&samples, 75);
        assert_eq!(strip.lines().count(), 1 + ECG_HEIGHT);
        assert!(strip.contains('*'));
    }

    #[test]
    fn test_empty_report() {
        let text = report(&ShiftReport::from_cases(&[]));
        assert!(text.contains("No cases"));
    }
}
