//! Navigation guards and landing resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected surface applies identical redirect behavior: anonymous
//! actors go to the login page carrying the path they came from, wrong-role
//! actors go to a caller-chosen fallback. The navigation side effect sits
//! behind [`Navigator`] so the CLI announces it and tests record it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::api::types::Role;
use crate::services::session::SessionManager;

pub const LOGIN_PATH: &str = "/auth/login";

/// Characters left literal in a query value; everything else is escaped,
/// `/` included, so a path survives as one parameter.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Navigation side effect used by the guards.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Login path carrying the origin as a `redirect` query parameter, e.g.
/// `/profile` becomes `/auth/login?redirect=%2Fprofile`.
#[must_use]
pub fn login_redirect_path(current: &str) -> String {
    format!(
        "{LOGIN_PATH}?redirect={}",
        utf8_percent_encode(current, QUERY_COMPONENT)
    )
}

/// Gate for authenticated-only surfaces. Returns true for an authenticated
/// session with no side effect; otherwise navigates to the login redirect
/// and returns false.
pub fn require_auth(manager: &SessionManager, navigator: &dyn Navigator, current: &str) -> bool {
    if manager.is_authenticated() {
        return true;
    }
    navigator.navigate(&login_redirect_path(current));
    false
}

/// Gate for role-restricted surfaces. Anonymous actors get the login
/// redirect; authenticated actors with the wrong role are sent to `fallback`.
pub fn require_role(
    manager: &SessionManager,
    role: Role,
    navigator: &dyn Navigator,
    current: &str,
    fallback: &str,
) -> bool {
    if !require_auth(manager, navigator, current) {
        return false;
    }
    if manager.is_role(role) {
        return true;
    }
    navigator.navigate(fallback);
    false
}

/// Where a freshly authenticated actor lands.
#[must_use]
pub fn default_landing(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/admin/dashboard",
        Some(Role::Business | Role::Provider) => "/business/dashboard",
        Some(Role::Customer) => "/profile",
        None => "/",
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
