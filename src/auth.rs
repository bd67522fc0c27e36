//! Credential verification for the login endpoint.
//!
//! Sessions are issued but not stored; the CRUD endpoints stay open.

use crate::error::AppError;
use crate::settings::AdminCredentials;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    fn issue(username: &str) -> Self {
        Session {
            token: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            issued_at: Utc::now(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Login is not configured")]
    Disabled,
    #[error("credential check failed: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            AuthError::Disabled => AppError::Unavailable(e.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError>;
}

/// A single operator account checked against a bcrypt hash.
pub struct StaticCredentials {
    username: String,
    password_hash: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        StaticCredentials {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn from_plaintext(username: impl Into<String>, password: &str, cost: u32) -> Result<Self, AuthError> {
        let hash = bcrypt::hash(password, cost).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self::new(username, hash))
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let hash = self.password_hash.clone();
        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        // Hash check runs even for an unknown username.
        let same_user: bool = username.as_bytes().ct_eq(self.username.as_bytes()).into();
        if !valid || !same_user {
            tracing::warn!(%username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        tracing::info!(%username, "login accepted");
        Ok(Session::issue(username))
    }
}

/// Used when no operator account is configured.
pub struct DisabledCredentials;

#[async_trait]
impl CredentialVerifier for DisabledCredentials {
    async fn authenticate(&self, _username: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::Disabled)
    }
}

/// Pick the verifier for the configured admin account.
pub fn verifier_from_settings(admin: Option<&AdminCredentials>) -> Result<Arc<dyn CredentialVerifier>, AuthError> {
    Ok(match admin {
        Some(AdminCredentials::Hashed { username, password_hash }) => {
            Arc::new(StaticCredentials::new(username.clone(), password_hash.clone()))
        }
        Some(AdminCredentials::Plain { username, password }) => Arc::new(StaticCredentials::from_plaintext(
            username.clone(),
            password,
            bcrypt::DEFAULT_COST,
        )?),
        None => {
            tracing::warn!("no admin account configured; login is disabled");
            Arc::new(DisabledCredentials)
        }
    })
}
