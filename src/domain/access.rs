//! Role-based access gate for the protected areas of the site.

use crate::domain::user::Role;

/// Part of the site a request wants to reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    /// Marketing pages, tracking, sign-in.
    Public,
    /// Customer self-service: package history and addresses.
    Customer,
    /// Courier dashboard with assigned packages.
    Courier,
    /// Read-only admin panel pages.
    Staff,
    /// Package creation and courier assignment.
    PackageManagement,
    /// Employee account administration.
    AdminOnly,
}

/// Outcome of [`check_access`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not signed in: go to the login page.
    Login,
    /// Signed in with the wrong role: go to the home page.
    Home,
}

/// Decides whether a user with `role` (or nobody) may enter `area`.
pub fn check_access(role: Option<Role>, area: Area) -> Access {
    let Some(role) = role else {
        return if area == Area::Public {
            Access::Granted
        } else {
            Access::Login
        };
    };

    let allowed = match area {
        Area::Public | Area::Customer => true,
        Area::Courier | Area::Staff => role.is_staff(),
        Area::PackageManagement => matches!(role, Role::Admin | Role::Manager),
        Area::AdminOnly => role == Role::Admin,
    };

    if allowed { Access::Granted } else { Access::Home }
}

/// Page a signed-in user lands on after visiting the login page.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin | Role::Manager => "/admin",
        Role::Courier => "/courier",
        Role::Customer => "/my-packages",
    }
}
