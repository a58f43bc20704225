//! Case scoring: final score clamp, grade bands, sub-scores, feedback.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{score, summary};

/// Outcome grade shown on the transfer summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        if score >= summary::GRADE_EXCELLENT {
            Grade::Excellent
        } else if score >= summary::GRADE_GOOD {
            Grade::Good
        } else if score >= summary::GRADE_FAIR {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Grade::Excellent => "🏆",
            Grade::Good => "🙂",
            Grade::Fair => "⚠️",
            Grade::Poor => "💀",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a running score into the summary range.
pub fn final_score(running: i32) -> u8 {
    running.clamp(score::MIN, score::MAX) as u8
}

/// 60 + 10 per informative test − 5 per unremarkable test, in [0, 100].
pub fn diagnostic_accuracy(informative: u32, unremarkable: u32) -> u8 {
    let raw = summary::ACCURACY_BASE
        + summary::ACCURACY_PER_INFORMATIVE * informative as i32
        - summary::ACCURACY_PER_UNREMARKABLE * unremarkable as i32;
    final_score(raw)
}

/// 100 − 10 per wasted item use − 5 per redundant test, in [0, 100].
pub fn resource_efficiency(wasted_items: u32, redundant_tests: u32) -> u8 {
    let raw = summary::EFFICIENCY_BASE
        - summary::EFFICIENCY_PER_WASTED_ITEM * wasted_items as i32
        - summary::EFFICIENCY_PER_REDUNDANT_TEST * redundant_tests as i32;
    final_score(raw)
}

pub const FEEDBACK_POOL: [&str; 5] = [
    "Great clinical judgment and timely interventions!",
    "Diagnostics were appropriate; consider earlier imaging next time.",
    "Supplies were used efficiently; watch for redundant meds.",
    "Good stabilization. Optimize the sequence of care for better outcomes.",
    "Consider reassessing vitals before transfer to ensure stability.",
];

pub fn pick_feedback(rng: &mut impl Rng) -> &'static str {
    FEEDBACK_POOL.choose(rng).copied().unwrap_or(FEEDBACK_POOL[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(85), Grade::Excellent);
        assert_eq!(Grade::from_score(84), Grade::Good);
        assert_eq!(Grade::from_score(70), Grade::Good);
        assert_eq!(Grade::from_score(69), Grade::Fair);
        assert_eq!(Grade::from_score(50), Grade::Fair);
        assert_eq!(Grade::from_score(49), Grade::Poor);
        assert_eq!(Grade::from_score(0), Grade::Poor);
    }

    #[test]
    fn test_final_score_clamps() {
        assert_eq!(final_score(-45), 0);
        assert_eq!(final_score(0), 0);
        assert_eq!(final_score(73), 73);
        assert_eq!(final_score(140), 100);
    }

    #[test]
    fn test_diagnostic_accuracy() {
        assert_eq!(diagnostic_accuracy(0, 0), 60);
        assert_eq!(diagnostic_accuracy(2, 1), 75);
        assert_eq!(diagnostic_accuracy(10, 0), 100);
        assert_eq!(diagnostic_accuracy(0, 20), 0);
    }

    #[test]
    fn test_resource_efficiency() {
        assert_eq!(resource_efficiency(0, 0), 100);
        assert_eq!(resource_efficiency(2, 1), 75);
        assert_eq!(resource_efficiency(12, 0), 0);
    }

    #[test]
    fn test_feedback_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            assert!(FEEDBACK_POOL.contains(&pick_feedback(&mut rng)));
        }
    }
}
