//! Reasons an action is rejected. Rejections never change state.

use thiserror::Error;

use crate::catalog::Item;
use crate::diagnosis::Diagnosis;
use crate::roles::Role;
use crate::rooms::Room;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no active patient")]
    NoActivePatient,

    #[error("{0} is not in the inventory")]
    NotInInventory(Item),

    #[error("{item} is not stocked in {room}")]
    NotStocked { item: Item, room: Room },

    #[error("{action} happens in {required}, you are in {current}")]
    WrongRoom {
        action: &'static str,
        required: Room,
        current: Room,
    },

    #[error("a {role} may not {action}")]
    RoleNotPermitted { role: Role, action: &'static str },

    #[error("diagnosis already confirmed as {0}")]
    AlreadyConfirmed(Diagnosis),

    #[error("the patient roster is empty")]
    EmptyRoster,
}
