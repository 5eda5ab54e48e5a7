//! Registration form validation.
//!
//! Failures are keyed by the form's field names so callers can annotate each
//! input. All rule violations are collected in one pass; the caller never has
//! to resubmit to discover the next problem.

use std::fmt;

use crate::api::types::RegisterForm;

pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// FIELD-KEYED ERRORS
// =============================================================================

/// Validation failures in form order. Field keys are the form's own names
/// (`businessName`, `confirmPassword`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push((field, message.to_string()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// RULES
// =============================================================================

fn email_is_well_formed(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Checks a registration form against the signup rules.
///
/// Business and provider signups additionally require the business fields.
/// Passwords are compared untrimmed; leading and trailing spaces are legal
/// password characters.
///
/// # Errors
///
/// Returns every violated rule keyed by field name.
pub fn validate_registration(form: &RegisterForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.push("name", "Name is required");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !email_is_well_formed(email) {
        errors.push("email", "Email address is invalid");
    }

    if form.phone.trim().is_empty() {
        errors.push("phone", "Phone number is required");
    }

    if form.password.is_empty() {
        errors.push("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 6 characters");
    }

    if form.confirm_password != form.password {
        errors.push("confirmPassword", "Passwords do not match");
    }

    if !form.accept_terms {
        errors.push("acceptTerms", "You must accept the terms of service");
    }

    if form.role.is_business_side() {
        if form.business_name.trim().is_empty() {
            errors.push("businessName", "Business name is required");
        }
        if form.category.trim().is_empty() {
            errors.push("category", "Category is required");
        }
        if form.description.trim().is_empty() {
            errors.push("description", "Description is required");
        }
        if form.location.trim().is_empty() {
            errors.push("location", "Location is required");
        }
        if form.address.trim().is_empty() {
            errors.push("address", "Address is required");
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
