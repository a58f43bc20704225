//! Supply and medication catalog, and where each item is stocked.

use serde::{Deserialize, Serialize};

use crate::labeled_str;
use crate::labels::Labeled;
use crate::rooms::Room;

/// Reusable equipment from the Supply Room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supply {
    OxygenMask,
    IvLine,
    Bandage,
    Splint,
    Nebulizer,
    CardiacMonitor,
    Defibrillator,
}

/// Medications from the Medstation (common) or Pharmacy (specialty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medication {
    Aspirin,
    Nitroglycerin,
    Albuterol,
    Epinephrine,
    Morphine,
    Antihistamine,
    Alteplase,
    Antibiotics,
    Prednisone,
}

impl Medication {
    pub fn stocked_in(self) -> Room {
        match self {
            Medication::Alteplase | Medication::Antibiotics | Medication::Prednisone => {
                Room::Pharmacy
            }
            _ => Room::Medstation,
        }
    }
}

/// Anything that can sit in the player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Item {
    Supply(Supply),
    Medication(Medication),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Supply,
    Medication,
}

impl Item {
    pub fn kind(self) -> ItemKind {
        match self {
            Item::Supply(_) => ItemKind::Supply,
            Item::Medication(_) => ItemKind::Medication,
        }
    }

    /// The room this item is collected from.
    pub fn stocked_in(self) -> Room {
        match self {
            Item::Supply(_) => Room::SupplyRoom,
            Item::Medication(m) => m.stocked_in(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Item::Supply(s) => s.label(),
            Item::Medication(m) => m.label(),
        }
    }

    /// Every item in catalog order, supplies first.
    pub fn all() -> Vec<Item> {
        Supply::all()
            .iter()
            .map(|s| Item::Supply(*s))
            .chain(Medication::all().iter().map(|m| Item::Medication(*m)))
            .collect()
    }

    /// Items collectable in `room`, empty for rooms that stock nothing.
    pub fn stocked_at(room: Room) -> Vec<Item> {
        Item::all()
            .into_iter()
            .filter(|i| i.stocked_in() == room)
            .collect()
    }
}

impl From<Supply> for Item {
    fn from(s: Supply) -> Self {
        Item::Supply(s)
    }
}

impl From<Medication> for Item {
    fn from(m: Medication) -> Self {
        Item::Medication(m)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Item {
    type Err = crate::labels::UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Supply>()
            .map(Item::Supply)
            .or_else(|_| s.parse::<Medication>().map(Item::Medication))
            .map_err(|_| crate::labels::UnknownName {
                kind: "item",
                input: s.trim().to_string(),
            })
    }
}

impl Labeled for Supply {
    const KIND: &'static str = "supply";

    fn all() -> &'static [Self] {
        &[
            Supply::OxygenMask,
            Supply::IvLine,
            Supply::Bandage,
            Supply::Splint,
            Supply::Nebulizer,
            Supply::CardiacMonitor,
            Supply::Defibrillator,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Supply::OxygenMask => "Oxygen Mask",
            Supply::IvLine => "IV Line",
            Supply::Bandage => "Bandage",
            Supply::Splint => "Splint",
            Supply::Nebulizer => "Nebulizer",
            Supply::CardiacMonitor => "Cardiac Monitor",
            Supply::Defibrillator => "Defibrillator",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Supply::OxygenMask => &["oxygen", "o2"],
            Supply::IvLine => &["iv", "iv fluids"],
            Supply::CardiacMonitor => &["monitor"],
            Supply::Defibrillator => &["defib", "aed"],
            _ => &[],
        }
    }
}

impl Labeled for Medication {
    const KIND: &'static str = "medication";

    fn all() -> &'static [Self] {
        &[
            Medication::Aspirin,
            Medication::Nitroglycerin,
            Medication::Albuterol,
            Medication::Epinephrine,
            Medication::Morphine,
            Medication::Antihistamine,
            Medication::Alteplase,
            Medication::Antibiotics,
            Medication::Prednisone,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Medication::Aspirin => "Aspirin",
            Medication::Nitroglycerin => "Nitroglycerin",
            Medication::Albuterol => "Albuterol",
            Medication::Epinephrine => "Epinephrine",
            Medication::Morphine => "Morphine",
            Medication::Antihistamine => "Antihistamine",
            Medication::Alteplase => "Alteplase",
            Medication::Antibiotics => "Antibiotics",
            Medication::Prednisone => "Prednisone",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Medication::Nitroglycerin => &["nitro", "ntg"],
            Medication::Epinephrine => &["epi", "epipen", "adrenaline"],
            Medication::Antihistamine => &["diphenhydramine", "benadryl"],
            Medication::Alteplase => &["tpa"],
            Medication::Antibiotics => &["abx"],
            Medication::Albuterol => &["salbutamol"],
            _ => &[],
        }
    }
}

labeled_str!(Supply);
labeled_str!(Medication);
