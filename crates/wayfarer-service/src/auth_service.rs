//! Authentication service implementation.

use crate::dto::{AuthResponse, LoginRequest, SignupRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wayfarer_core::{Email, User, ValidateExt, WayfarerError, WayfarerResult};
use wayfarer_repository::UserRepository;
use wayfarer_security::{IssuedToken, PasswordHasher, TokenProvider};

/// Message returned on successful signup.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User signup success";

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user and returns an access token.
    async fn signup(&self, request: SignupRequest) -> WayfarerResult<AuthResponse>;

    /// Checks credentials and returns an access token.
    async fn login(&self, request: LoginRequest) -> WayfarerResult<AuthResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    fn issue_for(&self, user: &User) -> WayfarerResult<IssuedToken> {
        self.token_provider.issue(user.id, user.email.as_str())
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn signup(&self, request: SignupRequest) -> WayfarerResult<AuthResponse> {
        request.validate_request()?;

        let email = Email::new(&request.email)
            .map_err(|e| WayfarerError::Validation(e.to_string()))?;
        debug!("Signing up user: {}", email);

        if self.user_repository.exists_by_email(&email).await? {
            return Err(WayfarerError::conflict("User is already present"));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = User::new(email, password_hash);

        // A concurrent signup for the same email loses on the unique index.
        let saved_user = self.user_repository.save(&user).await.map_err(|e| match e {
            WayfarerError::Conflict(_) => WayfarerError::conflict("User is already present"),
            other => other,
        })?;

        info!("User signed up: {}", saved_user.id);

        let issued = self.issue_for(&saved_user)?;
        Ok(AuthResponse {
            message: Some(SIGNUP_SUCCESS_MESSAGE.to_string()),
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }

    async fn login(&self, request: LoginRequest) -> WayfarerResult<AuthResponse> {
        request.validate_request()?;

        let user_missing = || WayfarerError::validation("User does not exist");

        // A malformed address cannot belong to any account.
        let email = Email::new(&request.email).map_err(|_| user_missing())?;
        debug!("Login attempt for: {}", email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found - {}", email);
                user_missing()
            })?;

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(WayfarerError::InvalidCredentials);
        }

        info!("User logged in: {}", user.id);

        let issued = self.issue_for(&user)?;
        Ok(AuthResponse {
            message: None,
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}

impl std::fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_config::SecurityConfig;
    use wayfarer_repository::InMemoryUserRepository;

    fn tokens() -> TokenProvider {
        TokenProvider::new(&SecurityConfig::default())
    }

    fn service() -> (AuthServiceImpl, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = AuthServiceImpl::new(
            repo.clone(),
            Arc::new(PasswordHasher::with_memory_cost(64)),
            Arc::new(tokens()),
        );
        (service, repo)
    }

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_returns_token_for_new_user() {
        let (service, repo) = service();

        let response = service.signup(signup("Ann@Example.com", "secret")).await.unwrap();

        assert_eq!(response.message.as_deref(), Some(SIGNUP_SUCCESS_MESSAGE));
        assert_eq!(response.expires_in, 3600);

        let claims = tokens().verify(&response.token).unwrap();
        assert_eq!(claims.email, "ann@example.com");

        let stored = repo
            .find_by_email(&Email::new("ann@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claims.user_id(), stored.id);
        assert_ne!(stored.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let (service, _) = service();
        service.signup(signup("ann@example.com", "secret")).await.unwrap();

        let err = service
            .signup(signup(" ANN@example.com ", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, WayfarerError::Conflict(ref m) if m == "User is already present"));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_signup_rejects_empty_fields() {
        let (service, _) = service();

        let err = service.signup(signup("", "secret")).await.unwrap_err();
        assert_eq!(err.public_message(), "Email field is empty");

        let err = service.signup(signup("ann@example.com", "")).await.unwrap_err();
        assert_eq!(err.public_message(), "Password field is empty");
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_email() {
        let (service, _) = service();
        let err = service.signup(signup("not-an-email", "secret")).await.unwrap_err();
        assert!(matches!(err, WayfarerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_succeeds_with_correct_password() {
        let (service, _) = service();
        service.signup(signup("ann@example.com", "secret")).await.unwrap();

        let response = service.login(login("ann@example.com", "secret")).await.unwrap();
        assert!(response.message.is_none());
        assert!(tokens().verify(&response.token).is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, _) = service();

        let err = service.login(login("ghost@example.com", "secret")).await.unwrap_err();
        assert_eq!(err.public_message(), "User does not exist");
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = service();
        service.signup(signup("ann@example.com", "secret")).await.unwrap();

        let err = service.login(login("ann@example.com", "wrong")).await.unwrap_err();
        assert!(matches!(err, WayfarerError::InvalidCredentials));
        assert_eq!(err.status_code(), 401);
    }
}
