//! Route-level access decisions.
//!
//! A guarded route renders iff the session's directory holds its required
//! permission. The decision is recomputed on every request so a repopulated
//! directory takes effect on the next render.

use std::fmt;

use medadmin_core::Permission;
use serde::Serialize;

use crate::directory::{LoadStatus, PermissionDirectory};

/// Why a route was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "permission", rename_all = "snake_case")]
pub enum DenyReason {
    /// The directory is loaded and does not hold the permission.
    MissingPermission(Permission),
    /// The directory has not finished its first load.
    PermissionsPending,
    /// The last load failed, so nothing is granted.
    PermissionsUnavailable,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::MissingPermission(permission) => {
                write!(f, "missing permission {}", permission)
            }
            DenyReason::PermissionsPending => f.write_str("permissions not loaded yet"),
            DenyReason::PermissionsUnavailable => f.write_str("permissions unavailable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum RouteAccess {
    Allowed,
    Denied(DenyReason),
}

impl RouteAccess {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteAccess::Allowed)
    }
}

pub fn check_route(directory: &PermissionDirectory, required: Permission) -> RouteAccess {
    if directory.has(required) {
        return RouteAccess::Allowed;
    }

    let reason = match directory.status() {
        LoadStatus::Ready => DenyReason::MissingPermission(required),
        LoadStatus::Failed => DenyReason::PermissionsUnavailable,
        // A refresh in flight still serves the previous set, so a miss there
        // is a genuine miss.
        LoadStatus::Loading if directory.loaded_at().is_some() => {
            DenyReason::MissingPermission(required)
        }
        LoadStatus::Pending | LoadStatus::Loading => DenyReason::PermissionsPending,
    };

    RouteAccess::Denied(reason)
}
