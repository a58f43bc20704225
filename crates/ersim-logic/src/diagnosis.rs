//! Diagnoses and their lookup tables: treatment effect, surgery, and
//! appropriate transfer destinations.

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, Medication, Supply};
use crate::labeled_str;
use crate::labels::Labeled;
use crate::vitals::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    HeartAttack,
    Stroke,
    AsthmaAttack,
    Appendicitis,
    Anaphylaxis,
    Fracture,
}

/// How an item acts on a patient with a given diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Effective,
    Limited,
    Harmful,
}

/// Where a patient can be sent from the ER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Discharge,
    Surgery,
    Icu,
}

impl Diagnosis {
    /// Items that help this condition.
    pub fn effective_items(self) -> &'static [Item] {
        use Item::{Medication as M, Supply as S};
        match self {
            Diagnosis::HeartAttack => &[
                S(Supply::OxygenMask),
                S(Supply::CardiacMonitor),
                M(Medication::Aspirin),
                M(Medication::Nitroglycerin),
            ],
            Diagnosis::Stroke => &[S(Supply::IvLine), M(Medication::Alteplase)],
            Diagnosis::AsthmaAttack => &[
                S(Supply::OxygenMask),
                S(Supply::Nebulizer),
                M(Medication::Albuterol),
                M(Medication::Prednisone),
            ],
            Diagnosis::Appendicitis => &[
                S(Supply::IvLine),
                M(Medication::Antibiotics),
                M(Medication::Morphine),
            ],
            Diagnosis::Anaphylaxis => &[
                S(Supply::OxygenMask),
                S(Supply::IvLine),
                M(Medication::Epinephrine),
                M(Medication::Antihistamine),
            ],
            Diagnosis::Fracture => &[
                S(Supply::Bandage),
                S(Supply::Splint),
                M(Medication::Morphine),
            ],
        }
    }

    /// Items that actively hurt a patient with this condition.
    pub fn harmful_items(self) -> &'static [Item] {
        use Item::{Medication as M, Supply as S};
        match self {
            Diagnosis::HeartAttack => &[M(Medication::Epinephrine)],
            Diagnosis::Stroke => &[
                S(Supply::Defibrillator),
                M(Medication::Aspirin),
                M(Medication::Epinephrine),
            ],
            Diagnosis::AsthmaAttack => &[S(Supply::Defibrillator), M(Medication::Morphine)],
            Diagnosis::Appendicitis | Diagnosis::Anaphylaxis | Diagnosis::Fracture => {
                &[S(Supply::Defibrillator)]
            }
        }
    }

    /// Table lookup; anything not listed has limited effect.
    pub fn effect_of(self, item: Item) -> Effect {
        if self.effective_items().contains(&item) {
            Effect::Effective
        } else if self.harmful_items().contains(&item) {
            Effect::Harmful
        } else {
            Effect::Limited
        }
    }

    pub fn needs_surgery(self) -> bool {
        matches!(self, Diagnosis::Appendicitis)
    }

    /// Destinations that count as appropriate care.
    pub fn appropriate_destinations(self, operated: bool) -> &'static [Destination] {
        match self {
            Diagnosis::HeartAttack | Diagnosis::Stroke => &[Destination::Icu],
            Diagnosis::AsthmaAttack | Diagnosis::Anaphylaxis => {
                &[Destination::Discharge, Destination::Icu]
            }
            Diagnosis::Appendicitis if operated => &[Destination::Icu, Destination::Discharge],
            Diagnosis::Appendicitis => &[Destination::Surgery],
            Diagnosis::Fracture => &[Destination::Discharge, Destination::Surgery],
        }
    }
}

/// Effect of `item` for this diagnosis once the patient's own
/// contraindications are taken into account.
pub fn effect_for_patient(diagnosis: Diagnosis, item: Item, contraindicated: &[Medication]) -> Effect {
    match item {
        Item::Medication(m) if contraindicated.contains(&m) => Effect::Harmful,
        _ => diagnosis.effect_of(item),
    }
}

/// Whether sending the patient to `dest` is appropriate. Critical
/// patients are never fit for discharge.
pub fn transfer_is_appropriate(
    diagnosis: Diagnosis,
    dest: Destination,
    operated: bool,
    severity: Severity,
) -> bool {
    if dest == Destination::Discharge && severity == Severity::Critical {
        return false;
    }
    diagnosis.appropriate_destinations(operated).contains(&dest)
}

impl Labeled for Diagnosis {
    const KIND: &'static str = "diagnosis";

    fn all() -> &'static [Self] {
        &[
            Diagnosis::HeartAttack,
            Diagnosis::Stroke,
            Diagnosis::AsthmaAttack,
            Diagnosis::Appendicitis,
            Diagnosis::Anaphylaxis,
            Diagnosis::Fracture,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Diagnosis::HeartAttack => "Heart Attack",
            Diagnosis::Stroke => "Stroke",
            Diagnosis::AsthmaAttack => "Asthma Attack",
            Diagnosis::Appendicitis => "Appendicitis",
            Diagnosis::Anaphylaxis => "Anaphylaxis",
            Diagnosis::Fracture => "Fracture",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Diagnosis::HeartAttack => &["mi", "myocardial infarction", "stemi"],
            Diagnosis::Stroke => &["cva"],
            Diagnosis::AsthmaAttack => &["asthma"],
            Diagnosis::Anaphylaxis => &["allergic reaction"],
            Diagnosis::Fracture => &["broken bone"],
            Diagnosis::Appendicitis => &[],
        }
    }
}

impl Labeled for Destination {
    const KIND: &'static str = "destination";

    fn all() -> &'static [Self] {
        &[Destination::Discharge, Destination::Surgery, Destination::Icu]
    }

    fn label(self) -> &'static str {
        match self {
            Destination::Discharge => "Discharge",
            Destination::Surgery => "Send to Surgery",
            Destination::Icu => "Send to ICU",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Destination::Discharge => &["home"],
            Destination::Surgery => &["surgery", "or"],
            Destination::Icu => &["icu"],
        }
    }
}

labeled_str!(Diagnosis);
labeled_str!(Destination);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_attack_oxygen_effective() {
        assert_eq!(
            Diagnosis::HeartAttack.effect_of(Supply::OxygenMask.into()),
            Effect::Effective
        );
    }

    #[test]
    fn test_stroke_oxygen_limited() {
        assert_eq!(
            Diagnosis::Stroke.effect_of(Supply::OxygenMask.into()),
            Effect::Limited
        );
    }

    #[test]
    fn test_effective_and_harmful_disjoint() {
        for d in Diagnosis::all() {
            for item in d.effective_items() {
                assert!(!d.harmful_items().contains(item), "{} / {}", d, item);
            }
        }
    }

    #[test]
    fn test_every_diagnosis_has_a_treatment() {
        for d in Diagnosis::all() {
            assert!(!d.effective_items().is_empty(), "{}", d);
        }
    }

    #[test]
    fn test_full_table_is_total() {
        // Every (diagnosis, item) pair resolves without panicking and the
        // counts agree with the lists.
        for d in Diagnosis::all() {
            let all = Item::all();
            let effective = all.iter().filter(|i| d.effect_of(**i) == Effect::Effective).count();
            let harmful = all.iter().filter(|i| d.effect_of(**i) == Effect::Harmful).count();
            assert_eq!(effective, d.effective_items().len());
            assert_eq!(harmful, d.harmful_items().len());
        }
    }

    #[test]
    fn test_contraindication_overrides_table() {
        let abx = Item::Medication(Medication::Antibiotics);
        assert_eq!(
            effect_for_patient(Diagnosis::Appendicitis, abx, &[]),
            Effect::Effective
        );
        assert_eq!(
            effect_for_patient(Diagnosis::Appendicitis, abx, &[Medication::Antibiotics]),
            Effect::Harmful
        );
        // Supplies are never contraindicated
        assert_eq!(
            effect_for_patient(Diagnosis::Appendicitis, Supply::IvLine.into(), &[Medication::Antibiotics]),
            Effect::Effective
        );
    }

    #[test]
    fn test_only_appendicitis_needs_surgery() {
        let surgical: Vec<_> = Diagnosis::all().iter().filter(|d| d.needs_surgery()).collect();
        assert_eq!(surgical, vec![&Diagnosis::Appendicitis]);
    }

    #[test]
    fn test_transfer_rules() {
        use Destination::*;
        assert!(transfer_is_appropriate(Diagnosis::HeartAttack, Icu, false, Severity::Guarded));
        assert!(!transfer_is_appropriate(Diagnosis::HeartAttack, Discharge, false, Severity::Stable));
        assert!(transfer_is_appropriate(Diagnosis::Appendicitis, Surgery, false, Severity::Stable));
        assert!(!transfer_is_appropriate(Diagnosis::Appendicitis, Discharge, false, Severity::Stable));
        assert!(transfer_is_appropriate(Diagnosis::Appendicitis, Discharge, true, Severity::Stable));
        // Critical patients cannot go home even when the diagnosis allows it
        assert!(!transfer_is_appropriate(Diagnosis::AsthmaAttack, Discharge, false, Severity::Critical));
        assert!(transfer_is_appropriate(Diagnosis::AsthmaAttack, Icu, false, Severity::Critical));
    }

    #[test]
    fn test_destination_parse() {
        assert_eq!("icu".parse::<Destination>(), Ok(Destination::Icu));
        assert_eq!("Send to Surgery".parse::<Destination>(), Ok(Destination::Surgery));
        assert_eq!("mi".parse::<Diagnosis>(), Ok(Diagnosis::HeartAttack));
    }
}
