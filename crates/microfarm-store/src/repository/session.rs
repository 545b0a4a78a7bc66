//! # Session Repository
//!
//! Persistence for the single active session identity.
//!
//! The role is decided by the injected [`AuthPolicy`] at login time and
//! then travels as plain data; this layer never re-derives it. A corrupt
//! stored session is cleared and treated as signed-out rather than
//! surfacing a parse error.

use std::sync::Arc;

use microfarm_core::{AuthPolicy, User};
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::keys;
use crate::store::Store;

/// Repository for the session identity record.
#[derive(Clone)]
pub struct SessionRepository {
    store: Store,
    policy: Arc<dyn AuthPolicy>,
}

impl std::fmt::Debug for SessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRepository")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SessionRepository {
    /// Creates a session repository with the given authorization policy.
    pub fn new(store: Store, policy: Arc<dyn AuthPolicy>) -> Self {
        SessionRepository { store, policy }
    }

    /// The currently signed-in user, if any.
    ///
    /// Corrupt session data is cleared and reported as signed-out.
    pub fn current_user(&self) -> Option<User> {
        match self.store.get_raw(keys::USER) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(%err, "corrupt session record, clearing");
                    let _ = self.store.remove(keys::USER);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "session read failed");
                None
            }
        }
    }

    /// Signs a user in by email and persists the session.
    ///
    /// The session stays valid in memory even when persisting it fails -
    /// identity is best-effort durable, like the rest of the store.
    pub fn login(&self, email: &str) -> StoreResult<User> {
        let user = User::from_login(email, self.policy.as_ref())?;
        self.store.save_safe(keys::USER, &user);
        info!(user = %user.name, role = ?user.role, "signed in");
        Ok(user)
    }

    /// Signs the current user out.
    pub fn logout(&self) {
        if let Err(err) = self.store.remove(keys::USER) {
            warn!(%err, "failed to clear session record");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use microfarm_core::{AdminAllowList, Role};

    fn repo() -> (Store, SessionRepository) {
        let store = Store::in_memory();
        let policy = Arc::new(AdminAllowList::new(["ops@microfarm.example"]));
        (store.clone(), SessionRepository::new(store, policy))
    }

    #[test]
    fn test_login_round_trip() {
        let (_store, repo) = repo();
        assert!(repo.current_user().is_none());

        let user = repo.login("anna@example.com").unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(repo.current_user().as_ref(), Some(&user));
    }

    #[test]
    fn test_policy_grants_admin() {
        let (_store, repo) = repo();
        let user = repo.login("ops@microfarm.example").unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_logout_clears_session() {
        let (_store, repo) = repo();
        repo.login("anna@example.com").unwrap();
        repo.logout();
        assert!(repo.current_user().is_none());
        repo.logout(); // signed-out: no-op
    }

    #[test]
    fn test_corrupt_session_is_cleared() {
        let (store, repo) = repo();
        store.save(crate::keys::USER, &"{not json").unwrap();

        assert!(repo.current_user().is_none());
        // the bad record is gone, not just skipped
        assert!(store.get_raw(crate::keys::USER).unwrap().is_none());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let (_store, repo) = repo();
        assert!(repo.login("nope").is_err());
        assert!(repo.current_user().is_none());
    }
}
