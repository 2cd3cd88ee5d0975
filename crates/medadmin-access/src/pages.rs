//! Catalogue of guarded console pages.
//!
//! Each page names the permission its route guard requires, the upstream
//! endpoint its data comes from, and the affordances it may offer. Route
//! patterns use the `{id}` placeholder syntax of the router.

use medadmin_core::permissions::{
    APPROVAL_READ, BANNER_READ, CLINIC_READ, CLINIC_VIEW, CUSTOMER_READ, DOCTOR_READ, DOCTOR_VIEW,
    ONBOARDING_READ, RENEWAL_READ, ROLE_READ, SERVICE_READ, SUBSCRIPTION_READ, TRANSACTION_READ,
    USER_READ,
};
use medadmin_core::{Permission, Resource};
use serde::Serialize;

use crate::affordance::{ACCEPT, Affordance, REJECT};

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A table of records.
    List,
    /// One record, addressed by `{id}`.
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardedPage {
    pub path: &'static str,
    pub title: &'static str,
    pub required: Permission,
    pub upstream: &'static str,
    pub kind: PageKind,
    pub affordances: &'static [Affordance],
}

impl GuardedPage {
    const fn list(
        path: &'static str,
        title: &'static str,
        required: Permission,
        upstream: &'static str,
        affordances: &'static [Affordance],
    ) -> Self {
        Self {
            path,
            title,
            required,
            upstream,
            kind: PageKind::List,
            affordances,
        }
    }

    const fn detail(
        path: &'static str,
        title: &'static str,
        required: Permission,
        upstream: &'static str,
        affordances: &'static [Affordance],
    ) -> Self {
        Self {
            path,
            title,
            required,
            upstream,
            kind: PageKind::Detail,
            affordances,
        }
    }

    /// Upstream endpoint for this page, with `{id}` filled in for detail pages.
    pub fn upstream_path(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.upstream.replace(ID_PLACEHOLDER, id),
            None => self.upstream.to_string(),
        }
    }

    /// Matches a concrete request path, returning the captured id (if any).
    pub fn match_path<'p>(&self, path: &'p str) -> Option<Option<&'p str>> {
        let mut pattern = self.path.trim_matches('/').split('/');
        let mut actual = path.trim_matches('/').split('/');
        let mut captured = None;

        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return Some(captured),
                (Some(ID_PLACEHOLDER), Some(segment)) if is_valid_id(segment) => {
                    captured = Some(segment);
                }
                (Some(expected), Some(segment)) if expected == segment => {}
                _ => return None,
            }
        }
    }
}

/// Record ids are forwarded into upstream paths, so only plain tokens pass.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

const DOCTOR_LIST_ACTIONS: &[Affordance] = &[
    Affordance::create(Resource::Doctor),
    Affordance::edit(Resource::Doctor),
    Affordance::delete(Resource::Doctor),
];
const DOCTOR_DETAIL_ACTIONS: &[Affordance] = &[Affordance::edit(Resource::Doctor), ACCEPT, REJECT];
const CLINIC_LIST_ACTIONS: &[Affordance] = &[
    Affordance::create(Resource::Clinic),
    Affordance::edit(Resource::Clinic),
    Affordance::delete(Resource::Clinic),
];
const CLINIC_DETAIL_ACTIONS: &[Affordance] = &[Affordance::edit(Resource::Clinic), ACCEPT, REJECT];
const CRUD_SERVICE: &[Affordance] = &[
    Affordance::create(Resource::Service),
    Affordance::edit(Resource::Service),
    Affordance::delete(Resource::Service),
];
const CRUD_SUBSCRIPTION: &[Affordance] = &[
    Affordance::create(Resource::Subscription),
    Affordance::edit(Resource::Subscription),
    Affordance::delete(Resource::Subscription),
];
const CRUD_ONBOARDING: &[Affordance] = &[
    Affordance::create(Resource::Onboarding),
    Affordance::edit(Resource::Onboarding),
    Affordance::delete(Resource::Onboarding),
];
const CRUD_BANNER: &[Affordance] = &[
    Affordance::create(Resource::Banner),
    Affordance::edit(Resource::Banner),
    Affordance::delete(Resource::Banner),
];
const CRUD_ROLE: &[Affordance] = &[
    Affordance::create(Resource::Role),
    Affordance::edit(Resource::Role),
    Affordance::delete(Resource::Role),
];
const CRUD_USER: &[Affordance] = &[
    Affordance::create(Resource::User),
    Affordance::edit(Resource::User),
    Affordance::delete(Resource::User),
];

pub static PAGES: &[GuardedPage] = &[
    GuardedPage::list("/doctors", "Doctors", DOCTOR_READ, "doctor", DOCTOR_LIST_ACTIONS),
    GuardedPage::detail(
        "/doctors/{id}",
        "Doctor Registration",
        DOCTOR_VIEW,
        "doctor/{id}",
        DOCTOR_DETAIL_ACTIONS,
    ),
    GuardedPage::list("/clinics", "Clinics", CLINIC_READ, "clinic", CLINIC_LIST_ACTIONS),
    GuardedPage::detail(
        "/clinics/{id}",
        "Clinic Registration",
        CLINIC_VIEW,
        "clinic/{id}",
        CLINIC_DETAIL_ACTIONS,
    ),
    GuardedPage::list("/approvals", "Approvals", APPROVAL_READ, "approval", &[ACCEPT, REJECT]),
    GuardedPage::list("/renewals", "Renewals", RENEWAL_READ, "renewal", &[]),
    GuardedPage::list("/customers", "Customers", CUSTOMER_READ, "customer", &[]),
    GuardedPage::list("/services", "Services", SERVICE_READ, "service", CRUD_SERVICE),
    GuardedPage::list(
        "/subscription-plans",
        "Subscription Plans",
        SUBSCRIPTION_READ,
        "subscription-plan",
        CRUD_SUBSCRIPTION,
    ),
    GuardedPage::list(
        "/transactions",
        "Transactions",
        TRANSACTION_READ,
        "transaction",
        &[],
    ),
    GuardedPage::list(
        "/cms/onboarding",
        "Onboarding Screens",
        ONBOARDING_READ,
        "onboarding",
        CRUD_ONBOARDING,
    ),
    GuardedPage::list("/cms/banners", "Banners", BANNER_READ, "banner", CRUD_BANNER),
    GuardedPage::list("/roles", "Roles", ROLE_READ, "role", CRUD_ROLE),
    GuardedPage::list("/users", "Users", USER_READ, "user", CRUD_USER),
];

/// Finds the page serving a concrete path, with its captured id.
pub fn find_page(path: &str) -> Option<(&'static GuardedPage, Option<String>)> {
    PAGES.iter().find_map(|page| {
        page.match_path(path)
            .map(|id| (page, id.map(str::to_string)))
    })
}
