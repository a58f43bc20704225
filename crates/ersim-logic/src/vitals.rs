//! Patient vitals, clamping, and severity tiers.
//!
//! Every mutating operation ends with [`Vitals::clamp`], so no sequence of
//! improve/worsen/drift steps can leave a reading outside `constants::bounds`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{bounds, normal, steps};

/// Blood pressure, written "systolic/diastolic" in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

impl BloodPressure {
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid blood pressure '{0}', expected systolic/diastolic")]
pub struct BloodPressureParseError(String);

impl FromStr for BloodPressure {
    type Err = BloodPressureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || BloodPressureParseError(s.to_string());
        let (sys, dia) = s.trim().split_once('/').ok_or_else(err)?;
        let systolic = sys.trim().parse().map_err(|_| err())?;
        let diastolic = dia.trim().parse().map_err(|_| err())?;
        Ok(Self::new(systolic, diastolic))
    }
}

impl TryFrom<String> for BloodPressure {
    type Error = BloodPressureParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BloodPressure> for String {
    fn from(bp: BloodPressure) -> Self {
        bp.to_string()
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Simulated physiological readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub blood_pressure: BloodPressure,
    /// Beats per minute.
    pub heart_rate: i32,
    /// SpO2 percentage.
    pub oxygen_saturation: i32,
    /// Breaths per minute.
    pub respiratory_rate: i32,
    /// Degrees Celsius.
    pub temperature: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            blood_pressure: BloodPressure::new(normal::SYSTOLIC, normal::DIASTOLIC),
            heart_rate: normal::HEART_RATE,
            oxygen_saturation: bounds::SPO2_MAX - 2,
            respiratory_rate: normal::RESP_RATE,
            temperature: normal::TEMP,
        }
    }
}

/// Move `value` toward `target` by at most `step`.
fn approach(value: i32, target: i32, step: i32) -> i32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

fn approach_f32(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

impl Vitals {
    /// Force every reading into its documented range.
    pub fn clamp(&mut self) {
        let bp = &mut self.blood_pressure;
        bp.systolic = bp.systolic.clamp(bounds::SYSTOLIC_MIN, bounds::SYSTOLIC_MAX);
        bp.diastolic = bp
            .diastolic
            .clamp(bounds::DIASTOLIC_MIN, bounds::DIASTOLIC_MAX);
        self.heart_rate = self
            .heart_rate
            .clamp(bounds::HEART_RATE_MIN, bounds::HEART_RATE_MAX);
        self.oxygen_saturation = self
            .oxygen_saturation
            .clamp(bounds::SPO2_MIN, bounds::SPO2_MAX);
        self.respiratory_rate = self
            .respiratory_rate
            .clamp(bounds::RESP_RATE_MIN, bounds::RESP_RATE_MAX);
        self.temperature = self.temperature.clamp(bounds::TEMP_MIN, bounds::TEMP_MAX);
    }

    /// Returns a clamped copy.
    pub fn clamped(mut self) -> Self {
        self.clamp();
        self
    }

    /// One step of response to an effective intervention.
    pub fn improve(&mut self) {
        self.oxygen_saturation += steps::SPO2;
        self.heart_rate = approach(self.heart_rate, normal::HEART_RATE, steps::HEART_RATE_IMPROVE);
        let bp = &mut self.blood_pressure;
        bp.systolic = approach(bp.systolic, normal::SYSTOLIC, steps::SYSTOLIC);
        bp.diastolic = approach(bp.diastolic, normal::DIASTOLIC, steps::DIASTOLIC);
        self.respiratory_rate = approach(self.respiratory_rate, normal::RESP_RATE, steps::RESP_RATE);
        self.temperature = approach_f32(self.temperature, normal::TEMP, steps::TEMP);
        self.clamp();
    }

    /// One step of response to a harmful intervention.
    pub fn worsen(&mut self) {
        self.oxygen_saturation -= steps::SPO2;
        self.heart_rate += steps::HEART_RATE_WORSEN;
        self.blood_pressure.systolic -= steps::SYSTOLIC;
        self.blood_pressure.diastolic -= steps::DIASTOLIC;
        self.respiratory_rate += steps::RESP_RATE;
        self.temperature += steps::TEMP;
        self.clamp();
    }

    pub fn severity(&self) -> Severity {
        Severity::from_vitals(self)
    }

    /// Flatline: oxygen at the floor or heart rate pinned at the ceiling.
    pub fn is_fatal(&self) -> bool {
        self.oxygen_saturation <= bounds::SPO2_MIN || self.heart_rate >= bounds::HEART_RATE_MAX
    }

    /// True when every reading is inside its range.
    pub fn in_bounds(&self) -> bool {
        *self == self.clamped()
    }
}

/// Severity tiers derived from the current readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Stable,
    Guarded,
    Critical,
}

impl Severity {
    pub fn from_vitals(v: &Vitals) -> Self {
        let sys = v.blood_pressure.systolic;
        if v.oxygen_saturation < 85 || v.heart_rate > 140 || v.heart_rate < 40 || sys < 80 {
            Severity::Critical
        } else if v.oxygen_saturation < 92
            || v.heart_rate > 110
            || v.heart_rate < 50
            || !(90..=180).contains(&sys)
        {
            Severity::Guarded
        } else {
            Severity::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Stable => "Stable",
            Severity::Guarded => "Guarded",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sick() -> Vitals {
        Vitals {
            blood_pressure: BloodPressure::new(160, 100),
            heart_rate: 120,
            oxygen_saturation: 88,
            respiratory_rate: 26,
            temperature: 38.5,
        }
    }

    #[test]
    fn test_bp_parse_and_display() {
        let bp: BloodPressure = "152/94".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(152, 94));
        assert_eq!(bp.to_string(), "152/94");
        assert_eq!(" 90 / 60 ".parse::<BloodPressure>(), Ok(BloodPressure::new(90, 60)));
    }

    #[test]
    fn test_bp_parse_rejects_garbage() {
        assert!("152".parse::<BloodPressure>().is_err());
        assert!("a/b".parse::<BloodPressure>().is_err());
        assert!("".parse::<BloodPressure>().is_err());
    }

    #[test]
    fn test_improve_moves_toward_normal() {
        let mut v = sick();
        v.improve();
        assert_eq!(v.oxygen_saturation, 92);
        assert_eq!(v.heart_rate, 112);
        assert_eq!(v.blood_pressure, BloodPressure::new(152, 95));
        assert_eq!(v.respiratory_rate, 24);
        assert!((v.temperature - 38.2).abs() < 0.001);
    }

    #[test]
    fn test_improve_does_not_overshoot() {
        let mut v = Vitals {
            heart_rate: 84,
            ..Vitals::default()
        };
        v.improve();
        assert_eq!(v.heart_rate, normal::HEART_RATE);
        // Low side approaches upward
        v.heart_rate = 45;
        v.improve();
        assert_eq!(v.heart_rate, 53);
    }

    #[test]
    fn test_worsen_deltas() {
        let mut v = sick();
        v.worsen();
        assert_eq!(v.oxygen_saturation, 84);
        assert_eq!(v.heart_rate, 130);
        assert_eq!(v.blood_pressure, BloodPressure::new(152, 95));
        assert_eq!(v.respiratory_rate, 28);
    }

    #[test]
    fn test_clamp_after_repeated_steps() {
        let mut v = sick();
        for _ in 0..50 {
            v.worsen();
            assert!(v.in_bounds());
        }
        assert_eq!(v.oxygen_saturation, bounds::SPO2_MIN);
        assert_eq!(v.heart_rate, bounds::HEART_RATE_MAX);
        for _ in 0..50 {
            v.improve();
            assert!(v.in_bounds());
        }
        assert_eq!(v.oxygen_saturation, bounds::SPO2_MAX);
    }

    #[test]
    fn test_clamped_out_of_range_input() {
        let v = Vitals {
            blood_pressure: BloodPressure::new(400, 5),
            heart_rate: 0,
            oxygen_saturation: 120,
            respiratory_rate: 100,
            temperature: 50.0,
        }
        .clamped();
        assert_eq!(v.blood_pressure, BloodPressure::new(220, 30));
        assert_eq!(v.heart_rate, 30);
        assert_eq!(v.oxygen_saturation, 100);
        assert_eq!(v.respiratory_rate, 40);
        assert!((v.temperature - 42.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(Vitals::default().severity(), Severity::Stable);
        assert_eq!(sick().severity(), Severity::Guarded);
        let crit = Vitals {
            oxygen_saturation: 80,
            ..Vitals::default()
        };
        assert_eq!(crit.severity(), Severity::Critical);
        let hypotensive = Vitals {
            blood_pressure: BloodPressure::new(75, 40),
            ..Vitals::default()
        };
        assert_eq!(hypotensive.severity(), Severity::Critical);
        assert!(Severity::Critical > Severity::Guarded);
    }

    #[test]
    fn test_is_fatal() {
        assert!(!sick().is_fatal());
        let floor = Vitals {
            oxygen_saturation: bounds::SPO2_MIN,
            ..Vitals::default()
        };
        assert!(floor.is_fatal());
        let racing = Vitals {
            heart_rate: bounds::HEART_RATE_MAX,
            ..Vitals::default()
        };
        assert!(racing.is_fatal());
    }
}
