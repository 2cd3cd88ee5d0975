//! The console sidebar.
//!
//! Links are static. A link tied to a resource is shown only when the session
//! holds `"<resource>-read"`; a section is shown only when at least one of its
//! links is. Dashboard has no requirement and is always shown.

use medadmin_core::{Permission, Resource};
use serde::Serialize;

use crate::directory::PermissionDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    /// `None` means always visible.
    pub required_resource: Option<Resource>,
}

impl NavLink {
    const fn always(label: &'static str, path: &'static str, icon: &'static str) -> Self {
        Self {
            label,
            path,
            icon,
            required_resource: None,
        }
    }

    const fn gated(
        label: &'static str,
        path: &'static str,
        icon: &'static str,
        resource: Resource,
    ) -> Self {
        Self {
            label,
            path,
            icon,
            required_resource: Some(resource),
        }
    }

    pub fn is_visible(&self, directory: &PermissionDirectory) -> bool {
        match self.required_resource {
            None => true,
            Some(resource) => directory.has(Permission::read(resource)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    pub title: &'static str,
    pub links: &'static [NavLink],
}

pub static NAVIGATION: &[NavSection] = &[
    NavSection {
        title: "Overview",
        links: &[NavLink::always("Dashboard", "/dashboard", "dashboard")],
    },
    NavSection {
        title: "Registrations",
        links: &[
            NavLink::gated("Doctors", "/doctors", "medical_services", Resource::Doctor),
            NavLink::gated("Clinics", "/clinics", "local_hospital", Resource::Clinic),
            NavLink::gated("Approvals", "/approvals", "fact_check", Resource::Approval),
            NavLink::gated("Renewals", "/renewals", "autorenew", Resource::Renewal),
        ],
    },
    NavSection {
        title: "Marketplace",
        links: &[
            NavLink::gated("Customers", "/customers", "people", Resource::Customer),
            NavLink::gated("Services", "/services", "design_services", Resource::Service),
            NavLink::gated(
                "Subscription Plans",
                "/subscription-plans",
                "card_membership",
                Resource::Subscription,
            ),
            NavLink::gated(
                "Transactions",
                "/transactions",
                "receipt_long",
                Resource::Transaction,
            ),
        ],
    },
    NavSection {
        title: "CMS",
        links: &[
            NavLink::gated(
                "Onboarding Screens",
                "/cms/onboarding",
                "slideshow",
                Resource::Onboarding,
            ),
            NavLink::gated("Banners", "/cms/banners", "view_carousel", Resource::Banner),
        ],
    },
    NavSection {
        title: "Roles & Permissions",
        links: &[
            NavLink::gated("Roles", "/roles", "admin_panel_settings", Resource::Role),
            NavLink::gated("Users", "/users", "manage_accounts", Resource::User),
        ],
    },
];

/// A section as a particular session sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleSection {
    pub title: &'static str,
    pub links: Vec<&'static NavLink>,
}

pub fn visible_navigation(directory: &PermissionDirectory) -> Vec<VisibleSection> {
    NAVIGATION
        .iter()
        .filter_map(|section| {
            let links: Vec<&'static NavLink> = section
                .links
                .iter()
                .filter(|link| link.is_visible(directory))
                .collect();

            (!links.is_empty()).then_some(VisibleSection {
                title: section.title,
                links,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(sections: &[VisibleSection]) -> Vec<&'static str> {
        sections
            .iter()
            .flat_map(|section| section.links.iter().map(|link| link.label))
            .collect()
    }

    #[test]
    fn test_dashboard_is_always_visible() {
        let pending = PermissionDirectory::new();
        let failed = PermissionDirectory::new();
        failed.fail();
        let empty = PermissionDirectory::with_permissions(Vec::<String>::new());

        for directory in [&pending, &failed, &empty] {
            let sections = visible_navigation(directory);
            assert_eq!(labels(&sections), vec!["Dashboard"]);
            assert_eq!(sections[0].title, "Overview");
        }
    }

    #[test]
    fn test_doctor_read_shows_only_doctors() {
        let directory = PermissionDirectory::with_permissions(["doctor-read"]);
        let visible = labels(&visible_navigation(&directory));

        assert_eq!(visible, vec!["Dashboard", "Doctors"]);
        for hidden in ["Customers", "Approvals", "Services", "Roles", "Users"] {
            assert!(!visible.contains(&hidden));
        }
    }

    #[test]
    fn test_only_read_unlocks_a_link() {
        let directory = PermissionDirectory::with_permissions([
            "customer-view",
            "customer-edit",
            "service-delete",
        ]);

        assert_eq!(labels(&visible_navigation(&directory)), vec!["Dashboard"]);
    }

    #[test]
    fn test_roles_section_appears_after_repopulation() {
        let directory = PermissionDirectory::with_permissions(Vec::<String>::new());
        assert!(
            !visible_navigation(&directory)
                .iter()
                .any(|section| section.title == "Roles & Permissions")
        );

        directory.replace(["role-read", "user-read"]);
        let sections = visible_navigation(&directory);
        let roles = sections
            .iter()
            .find(|section| section.title == "Roles & Permissions")
            .expect("roles section visible");

        assert_eq!(roles.links.len(), 2);
    }

    #[test]
    fn test_renewals_use_upstream_resource_name() {
        let directory = PermissionDirectory::with_permissions(["revewal-read"]);
        assert!(labels(&visible_navigation(&directory)).contains(&"Renewals"));
    }

    #[test]
    fn test_every_gated_link_has_a_guarded_page() {
        for link in NAVIGATION.iter().flat_map(|section| section.links.iter()) {
            if let Some(resource) = link.required_resource {
                let (page, _) = crate::find_page(link.path).expect("page for nav link");
                assert_eq!(page.required, Permission::read(resource));
            }
        }
    }
}
