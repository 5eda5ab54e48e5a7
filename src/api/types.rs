//! Auth API types: the wire contract shared by the HTTP client and the demo
//! backend.
//!
//! The backend speaks a `{success, data, message}` envelope with camelCase
//! fields. Everything here mirrors that contract; the rest of the crate works
//! with these types and never touches raw JSON.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the credentials or the registration.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The backend failed with a non-auth error status.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected envelope.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// ROLES
// =============================================================================

/// Actor roles. Closed set; every dispatch on role matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Business,
    Provider,
    #[default]
    Customer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Business, Role::Provider, Role::Customer];

    /// Wire/storage form of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Business => "business",
            Role::Provider => "provider",
            Role::Customer => "customer",
        }
    }

    /// True for roles that manage a business listing.
    #[must_use]
    pub fn is_business_side(self) -> bool {
        matches!(self, Role::Business | Role::Provider)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role from user input fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0} (expected admin, business, provider, or customer)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "business" => Ok(Role::Business),
            "provider" => Ok(Role::Provider),
            "customer" => Ok(Role::Customer),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

// =============================================================================
// USER
// =============================================================================

/// Business-side profile fields, present for `Business` and `Provider` users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub address: String,
}

/// The authenticated actor as the backend reports it and as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessProfile>,
}

impl User {
    /// Membership test against the permission set.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Body of `POST /auth/register`: the registration form posted wholesale,
/// confirmation and terms fields included, as the backend expects it.
///
/// Business-side fields stay empty strings for customer signups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
    pub role: Role,
    pub business_name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub address: String,
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// The `data` half of a successful auth response. `token` is parsed but goes
/// unused; nothing in this client persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Envelope wrapping every auth endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AuthPayload>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// AUTH API TRAIT
// =============================================================================

/// Backend-neutral async trait for auth calls. The session manager only ever
/// talks to this, which keeps it testable against a mock and lets the demo
/// backend stand in for the real one.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with email and password. Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] when the backend rejects the
    /// pair, [`ApiError::Network`] when the request never completes, and
    /// [`ApiError::Server`] / [`ApiError::Parse`] for backend or envelope
    /// failures.
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError>;

    /// Create an account from an already-validated registration form.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AuthApi::login`]; `InvalidCredentials` covers
    /// backend-side rejections such as an email already in use.
    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, ApiError>;

    /// Notify the backend of a logout. Callers treat failure as non-fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] or [`ApiError::Server`] when the
    /// notification fails; local logout proceeds regardless.
    async fn logout(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
