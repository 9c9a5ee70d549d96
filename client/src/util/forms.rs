//! Form-draft validation for the login, registration, and user forms.
//!
//! DESIGN
//! ======
//! Drafts are ephemeral and UI-local: validated before submit, discarded on
//! submit or cancel, never persisted. Errors map field names to messages so
//! front ends can render them inline. A draft with errors never reaches the
//! network.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::BTreeMap;

use crate::net::types::{LoginCredentials, NewUser, RegisterCredentials, UserPatch};

/// Field name → human-readable message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Candidate registration record, including the confirmation field that
/// never leaves the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterDraft {
    /// Convert a validated draft into the wire payload, dropping the
    /// confirmation field.
    #[must_use]
    pub fn into_credentials(self) -> RegisterCredentials {
        RegisterCredentials {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Candidate user record for the create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job: Option<String>,
}

impl UserForm {
    #[must_use]
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            job: self.job,
        }
    }

    #[must_use]
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            email: Some(self.email),
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            job: self.job,
        }
    }
}

/// Loose email shape check: something before the `@`, a domain with an
/// interior dot, and no whitespace or second `@` anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validate a login draft.
#[must_use]
pub fn validate_login(draft: &LoginCredentials) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_valid_email(&draft.email) {
        errors.insert("email", "Please enter a valid email address");
    }
    if draft.password.len() < 6 {
        errors.insert("password", "Password must be at least 6 characters");
    }
    errors
}

/// Validate a registration draft.
#[must_use]
pub fn validate_register(draft: &RegisterDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.first_name.len() < 2 {
        errors.insert("first_name", "First name must be at least 2 characters");
    }
    if draft.last_name.len() < 2 {
        errors.insert("last_name", "Last name must be at least 2 characters");
    }
    if !is_valid_email(&draft.email) {
        errors.insert("email", "Please enter a valid email address");
    }
    if draft.password.len() < 6 {
        errors.insert("password", "Password must be at least 6 characters");
    }
    if draft.confirm_password.len() < 6 {
        errors.insert("confirm_password", "Please confirm your password");
    } else if draft.password != draft.confirm_password {
        errors.insert("confirm_password", "Passwords do not match");
    }
    errors
}

/// Validate a user create/edit draft.
#[must_use]
pub fn validate_user_form(draft: &UserForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.first_name.trim().is_empty() {
        errors.insert("first_name", "First name is required");
    }
    if draft.last_name.trim().is_empty() {
        errors.insert("last_name", "Last name is required");
    }
    if draft.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert("email", "Please enter a valid email address");
    }
    errors
}
