//! Authentication service: registration, login and bearer tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Always "bearer"
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[schema(example = 900)]
    pub expires_in: i64,
}

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a password account
    async fn register(&self, username: String, email: String, password: String) -> AppResult<User>;

    /// Register an account backed by an OAuth provider instead of a password
    async fn register_oauth(
        &self,
        username: String,
        email: String,
        provider: String,
        access_token: String,
    ) -> AppResult<User>;

    /// Check a username/password pair and issue a bearer token.
    /// OAuth-only accounts cannot log in this way.
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.jwt_expiration_minutes);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::new(config.jwt_algorithm),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_minutes * SECONDS_PER_MINUTE,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::new(config.jwt_algorithm),
    )?;

    Ok(token_data.claims)
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    /// Username and email must both be unused.
    async fn ensure_available(&self, username: &str, email: &str) -> AppResult<()> {
        let users = self.uow.users();

        if users.find_by_username(username).await?.is_some()
            || users.find_by_email(email).await?.is_some()
        {
            return Err(AppError::conflict("Username or email"));
        }

        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, email: String, password: String) -> AppResult<User> {
        self.ensure_available(&username, &email).await?;

        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(username, email, password_hash).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn register_oauth(
        &self,
        username: String,
        email: String,
        provider: String,
        access_token: String,
    ) -> AppResult<User> {
        self.ensure_available(&username, &email).await?;

        let (user, account) = with_transaction!(self.uow, |ctx| {
            ctx.users()
                .create_oauth(username, email, provider, access_token)
                .await
        })?;

        tracing::info!(user_id = user.id, provider = %account.provider, "OAuth user registered");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self
            .uow
            .users()
            .find_by_username(&username)
            .await?
            .filter(User::has_password);

        // Unknown and OAuth-only accounts still pay for one verification
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

        let password_hash = user_result
            .as_ref()
            .and_then(|user| user.password_hash.as_deref())
            .unwrap_or(dummy_hash);

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        match user_result {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::test_support::{test_user, TestUnitOfWork};
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-that-is-32-chars!";

    fn authenticator(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork::builder().users(users).build();
        Authenticator::new(Arc::new(uow), Config::for_testing(SECRET))
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .with(eq("andy"))
            .returning(|_| Ok(Some(test_user(1, "andy"))));
        users.expect_create().never();

        let result = authenticator(users)
            .register("andy".into(), "new@example.com".into(), "password123".into())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .with(eq("andy@example.com"))
            .returning(|_| Ok(Some(test_user(1, "andy"))));
        users.expect_create().never();

        let result = authenticator(users)
            .register("other".into(), "andy@example.com".into(), "password123".into())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|username, _, hash| {
                username == "andy" && Password::from_hash(hash.clone()).verify("password123")
            })
            .returning(|username, _, _| Ok(test_user(1, &username)));

        let user = authenticator(users)
            .register("andy".into(), "andy@example.com".into(), "password123".into())
            .await
            .unwrap();

        assert_eq!(user.username, "andy");
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let hash = Password::new("password123").unwrap().into_string();
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(move |username| {
            let mut user = test_user(7, username);
            user.password_hash = Some(hash.clone());
            Ok(Some(user))
        });

        let auth = authenticator(users);
        let token = auth.login("andy".into(), "password123".into()).await.unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 15 * 60);

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "andy");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = Password::new("password123").unwrap().into_string();
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(move |username| {
            let mut user = test_user(7, username);
            user.password_hash = Some(hash.clone());
            Ok(Some(user))
        });

        let result = authenticator(users)
            .login("andy".into(), "wrong-password".into())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_and_oauth_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .with(eq("ghost"))
            .returning(|_| Ok(None));
        users
            .expect_find_by_username()
            .with(eq("oauth"))
            .returning(|username| {
                let mut user = test_user(3, username);
                user.is_oauth = true;
                user.password_hash = None;
                Ok(Some(user))
            });

        let auth = authenticator(users);

        assert!(matches!(
            auth.login("ghost".into(), "password123".into()).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("oauth".into(), "password123".into()).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let user = test_user(1, "andy");
        let token = generate_token(&user, &Config::for_testing("another-secret-that-is-32-chars!!"))
            .unwrap();

        let auth = authenticator(MockUserRepository::new());
        assert!(matches!(
            auth.verify_token(&token.access_token),
            Err(AppError::Jwt(_))
        ));
    }
}
