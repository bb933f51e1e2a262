//! Administrator authentication policy.
//!
//! The crate ships no credential store. A host that needs real sign-in
//! implements [`AuthProvider`] and passes the result of
//! [`ensure_admin_account`] to `AppShell::on_session_changed`; the bundled
//! shell instead opens a trusted local session.

use thiserror::Error;

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub username: String,
    pub email: String,
}

impl AdminUser {
    /// A session for someone already trusted by the host, such as the user
    /// running the local shell.
    pub fn local(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            email: format!("{username}@localhost"),
            username,
        }
    }
}

/// The configured administrator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("incorrect credentials")]
    WrongUsername,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("account already exists")]
    AccountExists,
    #[error("auth provider error: {0}")]
    Provider(String),
}

/// Whatever authenticates administrators.
pub trait AuthProvider: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError>;
    fn create_account(&self, email: &str, password: &str) -> Result<AdminUser, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
}

/// Signs the administrator in, creating the account the first time.
///
/// Only `UserNotFound` and `InvalidCredential` trigger account creation; any
/// other failure is returned as-is. Repeating the call once the account exists
/// just signs in again.
pub fn ensure_admin_account(
    provider: &dyn AuthProvider,
    admin: &AdminIdentity,
    username: &str,
    password: &str,
) -> Result<AdminUser, AuthError> {
    if username.trim() != admin.username {
        return Err(AuthError::WrongUsername);
    }
    match provider.sign_in(&admin.email, password) {
        Ok(user) => Ok(user),
        Err(AuthError::UserNotFound | AuthError::InvalidCredential) => {
            tracing::info!(email = %admin.email, "provisioning administrator account");
            provider.create_account(&admin.email, password)
        }
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProvider {
        accounts: Mutex<HashMap<String, String>>,
        creations: Mutex<usize>,
    }

    impl AuthProvider for FakeProvider {
        fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
            match self.accounts.lock().unwrap().get(email) {
                None => Err(AuthError::UserNotFound),
                Some(stored) if stored == password => Ok(AdminUser {
                    username: "admin".into(),
                    email: email.into(),
                }),
                Some(_) => Err(AuthError::InvalidCredential),
            }
        }

        fn create_account(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::AccountExists);
            }
            accounts.insert(email.into(), password.into());
            *self.creations.lock().unwrap() += 1;
            Ok(AdminUser {
                username: "admin".into(),
                email: email.into(),
            })
        }

        fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn admin() -> AdminIdentity {
        AdminIdentity {
            username: "admin".into(),
            email: "admin@example.org".into(),
        }
    }

    #[test]
    fn first_login_creates_account_and_later_logins_reuse_it() {
        let provider = FakeProvider::default();
        ensure_admin_account(&provider, &admin(), "admin", "s3cret").unwrap();
        ensure_admin_account(&provider, &admin(), "admin", "s3cret").unwrap();
        assert_eq!(*provider.creations.lock().unwrap(), 1);
    }

    #[test]
    fn wrong_username_never_reaches_provider() {
        let provider = FakeProvider::default();
        let err = ensure_admin_account(&provider, &admin(), "root", "s3cret").unwrap_err();
        assert_eq!(err, AuthError::WrongUsername);
        assert_eq!(*provider.creations.lock().unwrap(), 0);
    }

    #[test]
    fn wrong_password_for_existing_account_fails() {
        let provider = FakeProvider::default();
        ensure_admin_account(&provider, &admin(), "admin", "s3cret").unwrap();
        let err = ensure_admin_account(&provider, &admin(), "admin", "other").unwrap_err();
        assert_eq!(err, AuthError::AccountExists);
    }
}
