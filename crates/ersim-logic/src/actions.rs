//! Room- and role-validated player actions.
//!
//! Which room an action belongs to, and who may perform it. The session
//! reducer calls [`validate`] before touching any state.

use crate::catalog::Item;
use crate::diagnostics::DiagnosticTest;
use crate::error::ActionError;
use crate::roles::Role;
use crate::rooms::Room;

/// The parts of an action that decide where and by whom it may be done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    NextPatient,
    Collect(Item),
    UseItem,
    RunTest(DiagnosticTest),
    ConfirmDiagnosis,
    PerformSurgery,
    Transfer,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::NextPatient => "admitting a patient",
            ActionKind::Collect(_) => "collecting items",
            ActionKind::UseItem => "treating the patient",
            ActionKind::RunTest(_) => "running that test",
            ActionKind::ConfirmDiagnosis => "confirming a diagnosis",
            ActionKind::PerformSurgery => "surgery",
            ActionKind::Transfer => "transferring the patient",
        }
    }

    /// The room the action must be performed in.
    pub fn required_room(self) -> Room {
        match self {
            ActionKind::Collect(item) => item.stocked_in(),
            ActionKind::RunTest(test) => test.room(),
            ActionKind::PerformSurgery => Room::OperatingRoom,
            ActionKind::NextPatient
            | ActionKind::UseItem
            | ActionKind::ConfirmDiagnosis
            | ActionKind::Transfer => Room::Er,
        }
    }
}

/// Check room and role. Collecting in the wrong room reports the item as
/// not stocked here, since that is what the player sees on the shelf.
pub fn validate(kind: ActionKind, room: Room, role: Role) -> Result<(), ActionError> {
    let required = kind.required_room();
    if required != room {
        return Err(match kind {
            ActionKind::Collect(item) => ActionError::NotStocked { item, room },
            _ => ActionError::WrongRoom {
                action: kind.label(),
                required,
                current: room,
            },
        });
    }

    if kind == ActionKind::PerformSurgery && !role.can_operate() {
        return Err(ActionError::RoleNotPermitted {
            role,
            action: "operate",
        });
    }

    Ok(())
}
