//! Registration, login, and token-based identity.

use std::sync::Arc;

use ledgerly_core::{DomainError, DomainResult, UserId};

use crate::password;
use crate::store::UserStore;
use crate::token::{TokenIdentity, TokenSigner};
use crate::user::{PublicUser, User};

/// One generic message for every credential failure. Never distinguishes
/// "no such user" from "wrong password".
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Minimum accepted password length (enforced server-side).
const MIN_PASSWORD_LEN: usize = 6;

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: PublicUser,
    pub access_token: String,
}

/// Issues identities: registers users, verifies credentials, and signs and
/// validates bearer tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenSigner,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenSigner) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and log them in.
    ///
    /// The email comparison against existing records is exact and
    /// case-sensitive, matching how emails are stored.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> DomainResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict("user already exists"));
        }

        let password_hash = password::hash(password)?;
        let user = User::new(email.to_string(), password_hash, name);
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    /// Verify credentials and issue a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }

        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(DomainError::authentication(INVALID_CREDENTIALS));
        };
        if !password::verify(password, &user.password_hash) {
            return Err(DomainError::authentication(INVALID_CREDENTIALS));
        }

        self.session_for(&user)
    }

    /// Validate a bearer token and return the identity embedded in it.
    ///
    /// No store read happens here; the claims can be stale for at most the
    /// token lifetime.
    pub fn verify_token(&self, token: &str) -> DomainResult<TokenIdentity> {
        self.tokens.verify(token)
    }

    /// Load the fresh user record behind a verified identity.
    ///
    /// A structurally valid token can outlive its user; that surfaces here
    /// as `NotFound`.
    pub async fn current_user(&self, user_id: UserId) -> DomainResult<PublicUser> {
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user.public()),
            None => Err(DomainError::not_found()),
        }
    }

    fn session_for(&self, user: &User) -> DomainResult<AuthSession> {
        let access_token = self.tokens.issue(user.id, &user.email)?;
        Ok(AuthSession {
            user: user.public(),
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use async_trait::async_trait;

    use super::*;

    /// Minimal in-crate store double; the real implementations live in
    /// `ledgerly-infra`.
    #[derive(Default)]
    struct MapUserStore {
        inner: RwLock<HashMap<UserId, User>>,
    }

    #[async_trait]
    impl UserStore for MapUserStore {
        async fn insert(&self, user: &User) -> DomainResult<()> {
            self.inner.write().unwrap().insert(user.id, user.clone());
            Ok(())
        }

        async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
            Ok(self
                .inner
                .read()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
            Ok(self.inner.read().unwrap().get(&id).cloned())
        }
    }

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MapUserStore::default()),
            TokenSigner::new(b"test-secret", 3600),
        )
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let svc = service();
        let session = svc
            .register("alice@example.com", "hunter22", Some("Alice".into()))
            .await
            .unwrap();
        assert_eq!(session.user.email, "alice@example.com");

        let login = svc.login("alice@example.com", "hunter22").await.unwrap();
        let identity = svc.verify_token(&login.access_token).unwrap();
        assert_eq!(identity.user_id, session.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        svc.register("alice@example.com", "hunter22", None)
            .await
            .unwrap();

        let err = svc
            .register("alice@example.com", "other-password", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let svc = service();
        svc.register("alice@example.com", "hunter22", None)
            .await
            .unwrap();

        // Different casing is a different stored email, so this registers.
        assert!(svc
            .register("Alice@example.com", "hunter22", None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_identically() {
        let svc = service();
        svc.register("alice@example.com", "hunter22", None)
            .await
            .unwrap();

        let wrong_pw = svc.login("alice@example.com", "nope-nope").await.unwrap_err();
        let no_user = svc.login("bob@example.com", "hunter22").await.unwrap_err();
        assert_eq!(wrong_pw, no_user);
    }

    #[tokio::test]
    async fn blank_fields_are_validation_errors() {
        let svc = service();
        assert!(matches!(
            svc.register("", "hunter22", None).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.register("alice@example.com", "", None).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.login("", "").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = service();
        let err = svc
            .register("alice@example.com", "short", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn current_user_of_deleted_account_is_not_found() {
        let svc = service();
        let err = svc.current_user(UserId::new()).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
