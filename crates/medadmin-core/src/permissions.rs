//! Typed permissions for the MedAdmin console.
//!
//! The upstream API grants permissions as flat `"<resource>-<action>"`
//! strings. They are parsed once at the API boundary into [`Permission`]
//! values so a misspelt name fails loudly instead of silently never matching.
//! Matching is exact: no action implies another.
//!
//! # Example
//!
//! ```ignore
//! use medadmin_core::permissions::{self, Action, Permission, Resource};
//!
//! let parsed: Permission = "approval-edit".parse()?;
//! assert_eq!(parsed, Permission::new(Resource::Approval, Action::Edit));
//! assert_eq!(parsed, permissions::APPROVAL_EDIT);
//! assert_eq!(parsed.to_string(), "approval-edit");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a permission name does not follow the
/// `"<resource>-<action>"` grammar or names an unknown resource or action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePermissionError {
    #[error("permission `{0}` is not of the form <resource>-<action>")]
    Malformed(String),
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// Something the back office manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Doctor,
    Clinic,
    Customer,
    Approval,
    Service,
    Role,
    User,
    Onboarding,
    Banner,
    Subscription,
    Transaction,
    /// Subscription renewals. The upstream names this resource `revewal`.
    #[serde(rename = "revewal")]
    Renewal,
}

impl Resource {
    pub const ALL: [Resource; 12] = [
        Resource::Doctor,
        Resource::Clinic,
        Resource::Customer,
        Resource::Approval,
        Resource::Service,
        Resource::Role,
        Resource::User,
        Resource::Onboarding,
        Resource::Banner,
        Resource::Subscription,
        Resource::Transaction,
        Resource::Renewal,
    ];

    /// Wire name used by the upstream API.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Doctor => "doctor",
            Resource::Clinic => "clinic",
            Resource::Customer => "customer",
            Resource::Approval => "approval",
            Resource::Service => "service",
            Resource::Role => "role",
            Resource::User => "user",
            Resource::Onboarding => "onboarding",
            Resource::Banner => "banner",
            Resource::Subscription => "subscription",
            Resource::Transaction => "transaction",
            Resource::Renewal => "revewal",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| ParsePermissionError::UnknownResource(s.to_string()))
    }
}

/// What may be done to a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List the resource and see it in navigation.
    Read,
    /// Open a single record.
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Read,
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParsePermissionError::UnknownAction(s.to_string()))
    }
}

/// A single granted capability, serialized as `"<resource>-<action>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// The permission that makes a resource visible in navigation.
    pub const fn read(resource: Resource) -> Self {
        Self::new(resource, Action::Read)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.resource, self.action)
    }
}

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .split_once('-')
            .filter(|(resource, action)| !resource.is_empty() && !action.is_empty())
            .ok_or_else(|| ParsePermissionError::Malformed(s.to_string()))?;

        Ok(Self::new(resource.parse()?, action.parse()?))
    }
}

impl TryFrom<String> for Permission {
    type Error = ParsePermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.to_string()
    }
}

// =============================================================================
// Registrations
// =============================================================================

/// Permission to list doctors
pub const DOCTOR_READ: Permission = Permission::new(Resource::Doctor, Action::Read);
/// Permission to open a doctor's registration
pub const DOCTOR_VIEW: Permission = Permission::new(Resource::Doctor, Action::View);
/// Permission to list clinics
pub const CLINIC_READ: Permission = Permission::new(Resource::Clinic, Action::Read);
/// Permission to open a clinic's registration
pub const CLINIC_VIEW: Permission = Permission::new(Resource::Clinic, Action::View);
/// Permission to list pending approvals
pub const APPROVAL_READ: Permission = Permission::new(Resource::Approval, Action::Read);
/// Permission to accept or reject a registration
pub const APPROVAL_EDIT: Permission = Permission::new(Resource::Approval, Action::Edit);
/// Permission to list subscription renewals
pub const RENEWAL_READ: Permission = Permission::new(Resource::Renewal, Action::Read);

// =============================================================================
// Marketplace
// =============================================================================

pub const CUSTOMER_READ: Permission = Permission::new(Resource::Customer, Action::Read);
pub const SERVICE_READ: Permission = Permission::new(Resource::Service, Action::Read);
pub const SUBSCRIPTION_READ: Permission = Permission::new(Resource::Subscription, Action::Read);
pub const TRANSACTION_READ: Permission = Permission::new(Resource::Transaction, Action::Read);

// =============================================================================
// CMS
// =============================================================================

pub const ONBOARDING_READ: Permission = Permission::new(Resource::Onboarding, Action::Read);
pub const BANNER_READ: Permission = Permission::new(Resource::Banner, Action::Read);

// =============================================================================
// Roles & Permissions
// =============================================================================

pub const ROLE_READ: Permission = Permission::new(Resource::Role, Action::Read);
pub const USER_READ: Permission = Permission::new(Resource::User, Action::Read);
