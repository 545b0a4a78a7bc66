//! # Authorization Policy
//!
//! Role assignment for the single active session.
//!
//! The admin identity is an externally supplied policy injected at
//! construction, not a literal constant baked into the engine: callers
//! build an [`AdminAllowList`] (or any [`AuthPolicy`] implementation) and
//! hand it to the session layer. The role then travels as plain data on
//! [`User`]; surface code decides what the role may do.

use uuid::Uuid;

use crate::catalog::{Role, User};
use crate::error::CoreResult;
use crate::validation::validate_email;

// =============================================================================
// Policy
// =============================================================================

/// Decides whether a login email carries the admin role.
pub trait AuthPolicy {
    fn is_admin(&self, email: &str) -> bool;
}

/// The default policy: a configurable allow-list of admin emails,
/// compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    /// Creates an allow-list from any collection of email strings.
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AdminAllowList {
            emails: emails
                .into_iter()
                .map(|e| e.into().trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// An allow-list that grants nobody the admin role.
    pub fn empty() -> Self {
        AdminAllowList::default()
    }
}

impl AuthPolicy for AdminAllowList {
    fn is_admin(&self, email: &str) -> bool {
        let email = email.trim().to_ascii_lowercase();
        self.emails.iter().any(|e| *e == email)
    }
}

// =============================================================================
// Login
// =============================================================================

impl User {
    /// Builds a session user from a login email.
    ///
    /// The display name is the email local-part; the role comes from the
    /// injected policy. Malformed emails are rejected before any state
    /// exists.
    pub fn from_login(email: &str, policy: &dyn AuthPolicy) -> CoreResult<User> {
        validate_email(email)?;
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email).to_string();
        let role = if policy.is_admin(email) {
            Role::Admin
        } else {
            Role::User
        };

        Ok(User {
            id: Uuid::new_v4().to_string(),
            name,
            email: email.to_string(),
            role,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_grants_admin() {
        let policy = AdminAllowList::new(["ops@microfarm.example"]);
        let user = User::from_login("ops@microfarm.example", &policy).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_admin());
        assert_eq!(user.name, "ops");
    }

    #[test]
    fn test_allow_list_is_case_insensitive() {
        let policy = AdminAllowList::new(["Ops@MicroFarm.example"]);
        let user = User::from_login("ops@microfarm.example", &policy).unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_everyone_else_is_a_user() {
        let policy = AdminAllowList::new(["ops@microfarm.example"]);
        let user = User::from_login("anna@example.com", &policy).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.name, "anna");
    }

    #[test]
    fn test_empty_policy() {
        let policy = AdminAllowList::empty();
        let user = User::from_login("ops@microfarm.example", &policy).unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_malformed_email_rejected() {
        let policy = AdminAllowList::empty();
        assert!(User::from_login("not-an-email", &policy).is_err());
    }
}
