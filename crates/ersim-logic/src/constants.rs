//! Simulation constants: vitals bounds, normal targets, score deltas.
//!
//! Plain constants grouped by concern. Every table in this crate reads
//! its numbers from here so tuning happens in one place.

/// Hard clamp ranges applied after every vitals update.
pub mod bounds {
    pub const SPO2_MIN: i32 = 65;
    pub const SPO2_MAX: i32 = 100;
    pub const HEART_RATE_MIN: i32 = 30;
    pub const HEART_RATE_MAX: i32 = 180;
    pub const SYSTOLIC_MIN: i32 = 60;
    pub const SYSTOLIC_MAX: i32 = 220;
    pub const DIASTOLIC_MIN: i32 = 30;
    pub const DIASTOLIC_MAX: i32 = 130;
    pub const RESP_RATE_MIN: i32 = 6;
    pub const RESP_RATE_MAX: i32 = 40;
    pub const TEMP_MIN: f32 = 34.0;
    pub const TEMP_MAX: f32 = 42.0;
}

/// Resting targets that `improve` steps move toward.
pub mod normal {
    pub const HEART_RATE: i32 = 80;
    pub const SYSTOLIC: i32 = 120;
    pub const DIASTOLIC: i32 = 80;
    pub const RESP_RATE: i32 = 16;
    pub const TEMP: f32 = 37.0;
}

/// Per-step vitals deltas for effective and harmful interventions.
pub mod steps {
    pub const SPO2: i32 = 4;
    pub const HEART_RATE_IMPROVE: i32 = 8;
    pub const HEART_RATE_WORSEN: i32 = 10;
    pub const SYSTOLIC: i32 = 8;
    pub const DIASTOLIC: i32 = 5;
    pub const RESP_RATE: i32 = 2;
    pub const TEMP: f32 = 0.3;
}

/// Passive deterioration tuning.
pub mod deterioration {
    /// Default seconds without intervention before vitals drift.
    pub const DEFAULT_THRESHOLD_SECS: f64 = 30.0;
    /// Heart rate rise per step (inclusive range).
    pub const HEART_RATE_RISE: (i32, i32) = (1, 5);
    /// SpO2 fall per step (inclusive range).
    pub const SPO2_FALL: (i32, i32) = (1, 3);
    /// Respiratory rate rise per step (inclusive range).
    pub const RESP_RATE_RISE: (i32, i32) = (0, 1);
}

/// Monitor trace limits.
pub mod ecg {
    pub const MAX_SECONDS: f32 = 60.0;
    pub const MAX_SAMPLE_RATE: u32 = 10_000;
    /// Hard cap on samples in one trace.
    pub const MAX_SAMPLES: usize = 600_000;
}

/// Fixed score deltas per action outcome.
pub mod score {
    pub const EFFECTIVE_USE: i32 = 10;
    pub const LIMITED_USE: i32 = 0;
    pub const HARMFUL_USE: i32 = -10;
    pub const TEST_INFORMATIVE: i32 = 5;
    pub const TEST_UNREMARKABLE: i32 = -2;
    pub const TEST_REPEATED: i32 = 0;
    pub const DIAGNOSIS_CORRECT: i32 = 20;
    pub const DIAGNOSIS_WRONG: i32 = -10;
    pub const SURGERY_INDICATED: i32 = 25;
    pub const SURGERY_UNNECESSARY: i32 = -15;
    pub const TRANSFER_APPROPRIATE: i32 = 10;
    pub const TRANSFER_INAPPROPRIATE: i32 = -10;
    pub const DEATH: i32 = -30;

    /// Summary score range.
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;
}

/// Summary sub-score tuning.
pub mod summary {
    pub const ACCURACY_BASE: i32 = 60;
    pub const ACCURACY_PER_INFORMATIVE: i32 = 10;
    pub const ACCURACY_PER_UNREMARKABLE: i32 = 5;
    pub const EFFICIENCY_BASE: i32 = 100;
    pub const EFFICIENCY_PER_WASTED_ITEM: i32 = 10;
    pub const EFFICIENCY_PER_REDUNDANT_TEST: i32 = 5;

    pub const GRADE_EXCELLENT: u8 = 85;
    pub const GRADE_GOOD: u8 = 70;
    pub const GRADE_FAIR: u8 = 50;
}
