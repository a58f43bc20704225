//! Player roles. Mostly cosmetic; surgery is the one gated action.

use serde::{Deserialize, Serialize};

use crate::labeled_str;
use crate::labels::Labeled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Nurse,
    Doctor,
    Surgeon,
    Paramedic,
    Pharmacist,
}

impl Role {
    pub fn can_operate(self) -> bool {
        matches!(self, Role::Surgeon)
    }
}

impl Labeled for Role {
    const KIND: &'static str = "role";

    fn all() -> &'static [Self] {
        &[
            Role::Nurse,
            Role::Doctor,
            Role::Surgeon,
            Role::Paramedic,
            Role::Pharmacist,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Role::Nurse => "Nurse",
            Role::Doctor => "Doctor",
            Role::Surgeon => "Surgeon",
            Role::Paramedic => "Paramedic",
            Role::Pharmacist => "Pharmacist",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Role::Doctor => &["physician", "md"],
            Role::Paramedic => &["emt"],
            _ => &[],
        }
    }
}

labeled_str!(Role);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_surgeon_operates() {
        for role in Role::all() {
            assert_eq!(role.can_operate(), *role == Role::Surgeon);
        }
    }

    #[test]
    fn test_default_is_nurse() {
        assert_eq!(Role::default(), Role::Nurse);
    }
}
