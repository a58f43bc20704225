//! Hospital rooms the player can move between.

use serde::{Deserialize, Serialize};

use crate::labeled_str;
use crate::labels::Labeled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    Er,
    SupplyRoom,
    Medstation,
    DiagnosticLab,
    OperatingRoom,
    Pharmacy,
    Radiology,
}

impl Room {
    /// One-line description shown on entering the room.
    pub fn description(self) -> &'static str {
        match self {
            Room::Er => "Treatment bay. Assess, treat, diagnose and transfer the patient.",
            Room::SupplyRoom => "Shelves of reusable equipment and dressings.",
            Room::Medstation => "Automated cabinet with common emergency medications.",
            Room::DiagnosticLab => "Bench analyzers for blood work and ECG.",
            Room::OperatingRoom => "Sterile theatre. Surgeons only.",
            Room::Pharmacy => "Specialty medications dispensed on request.",
            Room::Radiology => "X-ray, CT and ultrasound imaging.",
        }
    }

    /// Whether items can be collected here.
    pub fn stocks_items(self) -> bool {
        matches!(self, Room::SupplyRoom | Room::Medstation | Room::Pharmacy)
    }

    /// Whether diagnostic tests can be run here.
    pub fn runs_tests(self) -> bool {
        matches!(self, Room::DiagnosticLab | Room::Radiology)
    }
}

impl Labeled for Room {
    const KIND: &'static str = "room";

    fn all() -> &'static [Self] {
        &[
            Room::Er,
            Room::SupplyRoom,
            Room::Medstation,
            Room::DiagnosticLab,
            Room::OperatingRoom,
            Room::Pharmacy,
            Room::Radiology,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Room::Er => "ER",
            Room::SupplyRoom => "Supply Room",
            Room::Medstation => "Medstation",
            Room::DiagnosticLab => "Diagnostic Lab",
            Room::OperatingRoom => "Operating Room",
            Room::Pharmacy => "Pharmacy",
            Room::Radiology => "Radiology",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Room::Er => &["emergency", "emergency room"],
            Room::SupplyRoom => &["supply", "supplies"],
            Room::Medstation => &["meds"],
            Room::DiagnosticLab => &["lab"],
            Room::OperatingRoom => &["or", "theatre", "surgery"],
            Room::Pharmacy => &[],
            Room::Radiology => &["imaging", "xray"],
        }
    }
}

labeled_str!(Room);
