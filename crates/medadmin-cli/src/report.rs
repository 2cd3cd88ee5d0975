//! Plain-text reports printed by the CLI.

use std::fmt::Write as _;

use medadmin_access::{
    DirectorySnapshot, PermissionDirectory, RouteAccess, check_route, find_page,
    permitted_affordances, visible_navigation,
};
use medadmin_core::Permission;
use medadmin_core::session::DASHBOARD_PATH;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no console page serves {0}")]
    UnknownPath(String),
}

/// Granted names that do not parse as permissions, in input order.
pub fn unknown_grants(grants: &[String]) -> Vec<&str> {
    grants
        .iter()
        .map(String::as_str)
        .filter(|name| name.parse::<Permission>().is_err())
        .collect()
}

pub fn render_permissions(snapshot: &DirectorySnapshot) -> String {
    let mut out = format!("status: {}\n", snapshot.status.as_str());
    if let Some(loaded_at) = snapshot.loaded_at {
        let _ = writeln!(out, "loaded at: {}", loaded_at.to_rfc3339());
    }
    let _ = writeln!(out, "permissions ({}):", snapshot.permissions.len());
    for permission in &snapshot.permissions {
        let _ = writeln!(out, "  {}", permission);
    }
    out
}

pub fn render_navigation(directory: &PermissionDirectory) -> String {
    let mut out = String::new();
    for section in visible_navigation(directory) {
        let _ = writeln!(out, "{}", section.title);
        for link in section.links {
            let _ = writeln!(out, "  {:<20} {}", link.label, link.path);
        }
    }
    out
}

/// Whether `path` would render for `directory`, and with which actions.
pub fn render_check(directory: &PermissionDirectory, path: &str) -> Result<String, ReportError> {
    if path.trim_end_matches('/') == DASHBOARD_PATH {
        return Ok(format!("allowed: {} (always visible)\n", DASHBOARD_PATH));
    }

    let (page, _) = find_page(path).ok_or_else(|| ReportError::UnknownPath(path.to_string()))?;

    let mut out = String::new();
    match check_route(directory, page.required) {
        RouteAccess::Allowed => {
            let _ = writeln!(out, "allowed: {} ({}, requires {})", path, page.title, page.required);
            let actions: Vec<&str> = permitted_affordances(directory, page.affordances)
                .into_iter()
                .map(|affordance| affordance.key)
                .collect();
            if actions.is_empty() {
                out.push_str("actions: none\n");
            } else {
                let _ = writeln!(out, "actions: {}", actions.join(", "));
            }
        }
        RouteAccess::Denied(reason) => {
            let _ = writeln!(out, "denied: {} ({})", path, reason);
            let _ = writeln!(out, "redirects to: {}", DASHBOARD_PATH);
        }
    }
    Ok(out)
}
