//! Demo auth backend.
//!
//! DESIGN
//! ======
//! A fixture-account [`AuthApi`] implementation, selected with `--demo`. It
//! exists so the session manager has exactly one login path: the manager
//! always talks to an injected `AuthApi`, and "demo mode" is just this
//! implementation behind that seam rather than a second login code path.
//!
//! Accounts registered at runtime live only as long as the process.

use std::collections::BTreeSet;
use std::sync::Mutex;

use uuid::Uuid;

use super::types::{ApiError, AuthApi, AuthPayload, BusinessProfile, RegisterForm, Role, User};

const BAD_CREDENTIALS: &str = "invalid email or password";

// =============================================================================
// FIXTURES
// =============================================================================

struct DemoAccount {
    password: String,
    user: User,
}

fn role_permissions(role: Role) -> BTreeSet<String> {
    let names: &[&str] = match role {
        Role::Admin => &["manage_users", "manage_businesses", "view_reports"],
        Role::Business | Role::Provider => &["manage_listings", "respond_reviews"],
        Role::Customer => &["save_favorites", "write_reviews"],
    };
    names.iter().map(|&name| name.to_string()).collect()
}

fn fixture(
    id: u128,
    email: &str,
    password: &str,
    name: &str,
    phone: &str,
    role: Role,
    business: Option<BusinessProfile>,
) -> DemoAccount {
    DemoAccount {
        password: password.to_string(),
        user: User {
            id: Uuid::from_u128(id),
            email: email.to_string(),
            name: name.to_string(),
            phone: Some(phone.to_string()),
            role,
            verified: true,
            permissions: role_permissions(role),
            business,
        },
    }
}

fn seed_accounts() -> Vec<DemoAccount> {
    vec![
        fixture(
            1,
            "admin@servicerw.rw",
            "admin123",
            "ServiceRW Admin",
            "+250788000001",
            Role::Admin,
            None,
        ),
        fixture(
            2,
            "business@servicerw.rw",
            "business123",
            "Claudine Uwase",
            "+250788000002",
            Role::Business,
            Some(BusinessProfile {
                business_name: "Kigali Construction Ltd.".to_string(),
                category: "construction".to_string(),
                description: "General contractor and renovations".to_string(),
                location: "Gasabo".to_string(),
                address: "KG 11 Ave".to_string(),
            }),
        ),
        fixture(
            3,
            "provider@servicerw.rw",
            "provider123",
            "Eric Niyonsaba",
            "+250788000003",
            Role::Provider,
            Some(BusinessProfile {
                business_name: "Amahoro Plumbing Services".to_string(),
                category: "plumbing".to_string(),
                description: "Residential plumbing and drainage".to_string(),
                location: "Nyarugenge".to_string(),
                address: "KN 5 Rd".to_string(),
            }),
        ),
        fixture(
            4,
            "customer@servicerw.rw",
            "customer123",
            "Aline Mukamana",
            "+250788000004",
            Role::Customer,
            None,
        ),
    ]
}

// =============================================================================
// BACKEND
// =============================================================================

pub struct DemoAuth {
    accounts: Mutex<Vec<DemoAccount>>,
}

impl DemoAuth {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(seed_accounts()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DemoAccount>> {
        self.accounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for DemoAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuthApi for DemoAuth {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let needle = email.trim();
        let accounts = self.lock();
        let account = accounts
            .iter()
            .find(|account| account.user.email.eq_ignore_ascii_case(needle));

        match account {
            Some(account) if account.password == password => Ok(AuthPayload {
                user: account.user.clone(),
                token: None,
            }),
            _ => Err(ApiError::InvalidCredentials(BAD_CREDENTIALS.to_string())),
        }
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, ApiError> {
        let email = form.email.trim().to_string();
        let mut accounts = self.lock();

        if accounts
            .iter()
            .any(|account| account.user.email.eq_ignore_ascii_case(&email))
        {
            return Err(ApiError::InvalidCredentials(
                "email already registered".to_string(),
            ));
        }

        let business = form.role.is_business_side().then(|| BusinessProfile {
            business_name: form.business_name.trim().to_string(),
            category: form.category.trim().to_string(),
            description: form.description.trim().to_string(),
            location: form.location.trim().to_string(),
            address: form.address.trim().to_string(),
        });

        let phone = form.phone.trim();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name: form.name.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            role: form.role,
            verified: false,
            permissions: role_permissions(form.role),
            business,
        };

        accounts.push(DemoAccount {
            password: form.password.clone(),
            user: user.clone(),
        });

        Ok(AuthPayload { user, token: None })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "demo_test.rs"]
mod tests;
