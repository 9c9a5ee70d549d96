//! Deterministic avatar URLs for locally synthesized user records.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

/// Build the ui-avatars URL used for records created or renamed locally.
#[must_use]
pub fn avatar_url(first_name: &str, last_name: &str) -> String {
    format!("https://ui-avatars.com/api/?name={first_name}+{last_name}&background=3b82f6&color=fff")
}
