//! End-of-shift report over every case closed in the session.

use ersim_logic::scoring::Grade;
use serde::Serialize;

use crate::session::{CaseSummary, Disposition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftReport {
    pub cases: usize,
    pub deaths: usize,
    /// Mean of the clamped case scores; `None` before the first case.
    pub average_score: Option<f32>,
    pub overall_grade: Option<Grade>,
    /// Cases per grade, best grade first.
    pub grades: Vec<(Grade, usize)>,
    pub correct_diagnoses: usize,
    pub best_case: Option<(String, u8)>,
}

impl ShiftReport {
    pub fn from_cases(cases: &[CaseSummary]) -> Self {
        let average_score = if cases.is_empty() {
            None
        } else {
            let total: u32 = cases.iter().map(|c| c.score as u32).sum();
            Some(total as f32 / cases.len() as f32)
        };

        let grades = [Grade::Excellent, Grade::Good, Grade::Fair, Grade::Poor]
            .into_iter()
            .map(|g| (g, cases.iter().filter(|c| c.grade == g).count()))
            .collect();

        let best_case = cases
            .iter()
            .max_by_key(|c| c.score)
            .map(|c| (c.patient_name.clone(), c.score));

        Self {
            cases: cases.len(),
            deaths: cases
                .iter()
                .filter(|c| c.disposition == Disposition::Deceased)
                .count(),
            average_score,
            overall_grade: average_score.map(|avg| Grade::from_score(avg.round() as u8)),
            grades,
            correct_diagnoses: cases
                .iter()
                .filter(|c| c.diagnosis_confirmed == Some(true))
                .count(),
            best_case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ersim_logic::diagnosis::{Destination, Diagnosis};
    use ersim_logic::roles::Role;
    use ersim_logic::vitals::Vitals;

    fn case(name: &str, score: u8, disposition: Disposition, confirmed: Option<bool>) -> CaseSummary {
        CaseSummary {
            patient_name: name.to_string(),
            diagnosis: Diagnosis::Fracture,
            disposition,
            role: Role::Doctor,
            score,
            grade: Grade::from_score(score),
            diagnostic_accuracy: 60,
            resource_efficiency: 100,
            effective_actions: 0,
            limited_actions: 0,
            diagnosis_confirmed: confirmed,
            final_vitals: Vitals::default(),
            time_in_care_secs: 0.0,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_empty_report() {
        let r = ShiftReport::from_cases(&[]);
        assert_eq!(r.cases, 0);
        assert!(r.average_score.is_none());
        assert!(r.overall_grade.is_none());
        assert!(r.best_case.is_none());
    }

    #[test]
    fn test_aggregates() {
        let discharged = Disposition::Transferred(Destination::Discharge);
        let cases = vec![
            case("A", 90, discharged, Some(true)),
            case("B", 70, discharged, Some(false)),
            case("C", 20, Disposition::Deceased, None),
        ];
        let r = ShiftReport::from_cases(&cases);
        assert_eq!(r.cases, 3);
        assert_eq!(r.deaths, 1);
        assert_eq!(r.average_score, Some(60.0));
        assert_eq!(r.overall_grade, Some(Grade::Fair));
        assert_eq!(r.correct_diagnoses, 1);
        assert_eq!(r.best_case, Some(("A".to_string(), 90)));
        assert_eq!(
            r.grades,
            vec![
                (Grade::Excellent, 1),
                (Grade::Good, 1),
                (Grade::Fair, 0),
                (Grade::Poor, 1)
            ]
        );
    }
}
