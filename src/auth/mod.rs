//! Sign-in state for the library. The gate owns the current session, issues and
//! checks tokens through a [`TokenVerifier`], and answers the one question the
//! catalog cares about: which role is acting right now.

mod token;

use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::{Storage, TOKEN_KEY};
use crate::models::Role;

pub use token::{Claims, HmacTokenCodec, TokenError, TokenVerifier};

/// Demo accounts: (username, password, role).
pub const DEMO_CREDENTIALS: [(&str, &str, Role); 2] = [
    ("admin", "admin123", Role::Admin),
    ("user", "user123", Role::User),
];

/// Anything that can tell the catalog who is acting. Mutations only go through
/// when this returns `Some(Role::Admin)`.
pub trait RoleSource {
    fn current_role(&self) -> Option<Role>;

    fn is_admin(&self) -> bool {
        self.current_role() == Some(Role::Admin)
    }
}

impl RoleSource for Option<Role> {
    fn current_role(&self) -> Option<Role> {
        *self
    }
}

/// Wall-clock source, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub role: Role,
    pub token: String,
}

pub struct AuthGate {
    storage: Rc<Storage>,
    tokens: Box<dyn TokenVerifier>,
    clock: Box<dyn Clock>,
    token_ttl_secs: i64,
    session: Option<Session>,
}

impl AuthGate {
    pub fn new(
        storage: Rc<Storage>,
        tokens: Box<dyn TokenVerifier>,
        clock: Box<dyn Clock>,
        token_ttl_secs: i64,
    ) -> Self {
        Self {
            storage,
            tokens,
            clock,
            token_ttl_secs,
            session: None,
        }
    }

    /// Pick up a session saved by a previous run. A token that fails to
    /// verify or has expired is deleted and treated as if it never existed.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(token) = self.storage.get_item(TOKEN_KEY)? else {
            return Ok(false);
        };

        match self.tokens.verify(&token) {
            Ok(claims) if claims.exp > self.clock.now() => {
                tracing::info!(user = %claims.user, role = claims.role.as_str(), "restored session");
                self.session = Some(Session {
                    user: claims.user,
                    role: claims.role,
                    token,
                });
                Ok(true)
            }
            Ok(claims) => {
                tracing::info!(user = %claims.user, exp = claims.exp, "stored session expired");
                self.storage.remove_item(TOKEN_KEY)?;
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable session token");
                self.storage.remove_item(TOKEN_KEY)?;
                Ok(false)
            }
        }
    }

    /// Check the demo credentials, persist a fresh token and open a session.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Role, AuthError> {
        let Some(&(user, _, role)) = DEMO_CREDENTIALS
            .iter()
            .find(|(name, secret, _)| *name == username && *secret == password)
        else {
            tracing::info!(username, "rejected login");
            return Err(AuthError::InvalidCredentials);
        };

        let now = self.clock.now();
        let token = self
            .tokens
            .issue(&Claims {
                user: user.to_string(),
                role,
                exp: now.saturating_add(self.token_ttl_secs),
                iat: now,
            })
            .context("failed to issue session token")?;
        self.storage.set_item(TOKEN_KEY, &token)?;

        tracing::info!(user, role = role.as_str(), "signed in");
        self.session = Some(Session {
            user: user.to_string(),
            role,
            token,
        });
        Ok(role)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        if let Some(session) = self.session.take() {
            tracing::info!(user = %session.user, "signed out");
        }
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_user(&self) -> bool {
        self.current_role() == Some(Role::User)
    }
}

impl RoleSource for AuthGate {
    fn current_role(&self) -> Option<Role> {
        self.session.as_ref().map(|session| session.role)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct FixedClock(Rc<Cell<i64>>);

    impl Clock for FixedClock {
        fn now(&self) -> i64 {
            self.0.get()
        }
    }

    const HOUR: i64 = 3_600;

    fn gate_at(storage: &Rc<Storage>, now: &Rc<Cell<i64>>) -> AuthGate {
        AuthGate::new(
            Rc::clone(storage),
            Box::new(HmacTokenCodec::new("test-secret")),
            Box::new(FixedClock(Rc::clone(now))),
            HOUR,
        )
    }

    #[test]
    fn admin_login_grants_admin_role_and_persists_token() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let now = Rc::new(Cell::new(1_000));
        let mut gate = gate_at(&storage, &now);

        assert_eq!(gate.login("admin", "admin123").unwrap(), Role::Admin);
        assert!(gate.is_admin());
        assert!(!gate.is_user());
        let stored = storage.get_item(TOKEN_KEY).unwrap().unwrap();
        assert_eq!(gate.session().unwrap().token, stored);
    }

    #[test]
    fn bad_password_is_rejected_without_side_effects() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let now = Rc::new(Cell::new(1_000));
        let mut gate = gate_at(&storage, &now);

        let err = gate.login("admin", "user123").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(gate.current_role(), None);
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn session_restores_until_it_expires() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let now = Rc::new(Cell::new(1_000));
        gate_at(&storage, &now).login("user", "user123").unwrap();

        let mut next_run = gate_at(&storage, &now);
        assert!(next_run.restore().unwrap());
        assert_eq!(next_run.current_role(), Some(Role::User));
        assert_eq!(next_run.session().unwrap().user, "user");

        now.set(1_000 + HOUR);
        let mut later_run = gate_at(&storage, &now);
        assert!(!later_run.restore().unwrap());
        assert_eq!(later_run.current_role(), None);
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn huge_lifetime_does_not_wrap_into_the_past() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let now = Rc::new(Cell::new(1_000));
        let mut gate = AuthGate::new(
            Rc::clone(&storage),
            Box::new(HmacTokenCodec::new("test-secret")),
            Box::new(FixedClock(Rc::clone(&now))),
            i64::MAX,
        );
        gate.login("admin", "admin123").unwrap();

        let mut next_run = gate_at(&storage, &now);
        assert!(next_run.restore().unwrap());
        assert_eq!(next_run.current_role(), Some(Role::Admin));
    }

    #[test]
    fn garbage_token_is_discarded_on_restore() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        storage.set_item(TOKEN_KEY, "not-a-token").unwrap();
        let now = Rc::new(Cell::new(1_000));
        let mut gate = gate_at(&storage, &now);

        assert!(!gate.restore().unwrap());
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn logout_clears_session_and_token() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let now = Rc::new(Cell::new(1_000));
        let mut gate = gate_at(&storage, &now);
        gate.login("admin", "admin123").unwrap();

        gate.logout().unwrap();
        assert!(gate.session().is_none());
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn option_role_acts_as_role_source() {
        assert!(Some(Role::Admin).is_admin());
        assert!(!Some(Role::User).is_admin());
        assert!(!None::<Role>.is_admin());
    }
}
