//! Action-level gating inside a page.
//!
//! An affordance the session may not use is left out entirely. There is no
//! disabled state and no placeholder.

use medadmin_core::permissions::APPROVAL_EDIT;
use medadmin_core::{Action, Permission, Resource};
use serde::Serialize;

use crate::directory::PermissionDirectory;

/// One interactive control on a page, e.g. an "Accept" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub key: &'static str,
    pub label: &'static str,
    pub requires: Permission,
}

impl Affordance {
    pub const fn new(key: &'static str, label: &'static str, requires: Permission) -> Self {
        Self {
            key,
            label,
            requires,
        }
    }

    pub const fn create(resource: Resource) -> Self {
        Self::new("create", "Create", Permission::new(resource, Action::Create))
    }

    pub const fn edit(resource: Resource) -> Self {
        Self::new("edit", "Edit", Permission::new(resource, Action::Edit))
    }

    pub const fn delete(resource: Resource) -> Self {
        Self::new("delete", "Delete", Permission::new(resource, Action::Delete))
    }
}

/// Accept a pending doctor or clinic registration.
pub const ACCEPT: Affordance = Affordance::new("accept", "Accept", APPROVAL_EDIT);
/// Reject a pending doctor or clinic registration.
pub const REJECT: Affordance = Affordance::new("reject", "Reject", APPROVAL_EDIT);

/// The affordances the directory grants, in their declared order.
pub fn permitted_affordances<'a>(
    directory: &PermissionDirectory,
    affordances: &'a [Affordance],
) -> Vec<&'a Affordance> {
    affordances
        .iter()
        .filter_map(|affordance| gate(directory, affordance.requires, || affordance))
        .collect()
}

/// Renders `render` only when `required` is granted.
pub fn gate<T>(
    directory: &PermissionDirectory,
    required: Permission,
    render: impl FnOnce() -> T,
) -> Option<T> {
    directory.has(required).then(render)
}
