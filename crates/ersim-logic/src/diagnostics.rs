//! Diagnostic tests and the canned result table.

use serde::{Deserialize, Serialize};

use crate::diagnosis::Diagnosis;
use crate::labeled_str;
use crate::labels::Labeled;
use crate::rooms::Room;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticTest {
    Cbc,
    Troponin,
    BloodGlucose,
    ArterialBloodGas,
    SerumTryptase,
    Ecg12Lead,
    ChestXray,
    CtHead,
    LimbXray,
    AbdominalUltrasound,
}

/// A resulted test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub test: DiagnosticTest,
    /// Whether the finding points at the patient's condition.
    pub informative: bool,
    pub finding: &'static str,
}

impl DiagnosticTest {
    /// Lab or Radiology.
    pub fn room(self) -> Room {
        match self {
            DiagnosticTest::ChestXray
            | DiagnosticTest::CtHead
            | DiagnosticTest::LimbXray
            | DiagnosticTest::AbdominalUltrasound => Room::Radiology,
            _ => Room::DiagnosticLab,
        }
    }

    /// Tests available in `room`.
    pub fn available_in(room: Room) -> Vec<DiagnosticTest> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.room() == room)
            .collect()
    }

    /// Whether this test is informative for `diagnosis`.
    pub fn is_informative(self, diagnosis: Diagnosis) -> bool {
        informative_tests(diagnosis).contains(&self)
    }

    /// Look up the result of running this test on a patient with `diagnosis`.
    pub fn run(self, diagnosis: Diagnosis) -> TestResult {
        let informative = self.is_informative(diagnosis);
        let finding = if informative {
            self.abnormal_finding()
        } else {
            self.normal_finding()
        };
        TestResult {
            test: self,
            informative,
            finding,
        }
    }

    /// Finding reported when the test is positive. Each test is
    /// informative for at most one condition, so the test alone decides.
    fn abnormal_finding(self) -> &'static str {
        match self {
            DiagnosticTest::Troponin => "Troponin elevated at 2.4 ng/mL",
            DiagnosticTest::Ecg12Lead => "ST elevation in leads II, III, aVF",
            DiagnosticTest::CtHead => "Hypodense region in left MCA territory",
            DiagnosticTest::BloodGlucose => "Glucose 6.1 mmol/L, hypoglycemia excluded",
            DiagnosticTest::ArterialBloodGas => "pH 7.31, pCO2 52, hypoxemia",
            DiagnosticTest::ChestXray => "Hyperinflated lungs, flattened diaphragm",
            DiagnosticTest::Cbc => "White count 16.2 with neutrophilia",
            DiagnosticTest::AbdominalUltrasound => "Non-compressible appendix, 9 mm diameter",
            DiagnosticTest::SerumTryptase => "Tryptase markedly elevated",
            DiagnosticTest::LimbXray => "Displaced fracture of the distal radius",
        }
    }

    fn normal_finding(self) -> &'static str {
        match self {
            DiagnosticTest::Cbc => "White count and hemoglobin within normal limits",
            DiagnosticTest::Troponin => "Troponin below detection threshold",
            DiagnosticTest::BloodGlucose => "Glucose 5.4 mmol/L",
            DiagnosticTest::ArterialBloodGas => "pH 7.41, pCO2 40, pO2 near baseline",
            DiagnosticTest::SerumTryptase => "Tryptase within normal limits",
            DiagnosticTest::Ecg12Lead => "Sinus rhythm, no acute ST changes",
            DiagnosticTest::ChestXray => "Clear lung fields",
            DiagnosticTest::CtHead => "No acute intracranial abnormality",
            DiagnosticTest::LimbXray => "No fracture or dislocation",
            DiagnosticTest::AbdominalUltrasound => "No free fluid, appendix not visualized",
        }
    }
}

/// The informative test set for each diagnosis.
pub fn informative_tests(diagnosis: Diagnosis) -> &'static [DiagnosticTest] {
    use DiagnosticTest::*;
    match diagnosis {
        Diagnosis::HeartAttack => &[Troponin, Ecg12Lead],
        Diagnosis::Stroke => &[CtHead, BloodGlucose],
        Diagnosis::AsthmaAttack => &[ArterialBloodGas, ChestXray],
        Diagnosis::Appendicitis => &[Cbc, AbdominalUltrasound],
        Diagnosis::Anaphylaxis => &[SerumTryptase],
        Diagnosis::Fracture => &[LimbXray],
    }
}

impl Labeled for DiagnosticTest {
    const KIND: &'static str = "test";

    fn all() -> &'static [Self] {
        &[
            DiagnosticTest::Cbc,
            DiagnosticTest::Troponin,
            DiagnosticTest::BloodGlucose,
            DiagnosticTest::ArterialBloodGas,
            DiagnosticTest::SerumTryptase,
            DiagnosticTest::Ecg12Lead,
            DiagnosticTest::ChestXray,
            DiagnosticTest::CtHead,
            DiagnosticTest::LimbXray,
            DiagnosticTest::AbdominalUltrasound,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            DiagnosticTest::Cbc => "CBC",
            DiagnosticTest::Troponin => "Troponin",
            DiagnosticTest::BloodGlucose => "Blood Glucose",
            DiagnosticTest::ArterialBloodGas => "Arterial Blood Gas",
            DiagnosticTest::SerumTryptase => "Serum Tryptase",
            DiagnosticTest::Ecg12Lead => "12-Lead ECG",
            DiagnosticTest::ChestXray => "Chest X-Ray",
            DiagnosticTest::CtHead => "CT Head",
            DiagnosticTest::LimbXray => "Limb X-Ray",
            DiagnosticTest::AbdominalUltrasound => "Abdominal Ultrasound",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            DiagnosticTest::Cbc => &["blood count", "blood test"],
            DiagnosticTest::BloodGlucose => &["glucose", "sugar"],
            DiagnosticTest::ArterialBloodGas => &["abg"],
            DiagnosticTest::SerumTryptase => &["tryptase"],
            DiagnosticTest::Ecg12Lead => &["ecg", "ekg"],
            DiagnosticTest::ChestXray => &["cxr"],
            DiagnosticTest::CtHead => &["ct", "head ct"],
            DiagnosticTest::AbdominalUltrasound => &["ultrasound", "us"],
            DiagnosticTest::Troponin | DiagnosticTest::LimbXray => &[],
        }
    }
}

labeled_str!(DiagnosticTest);
