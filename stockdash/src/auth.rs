//! Authentication seam.
//!
//! Pages hand submitted forms to an [`AuthService`]. The backend that would
//! check credentials lives outside this application; [`LogOnlyAuth`] records
//! what was submitted and accepts it.

use async_trait::async_trait;
use thiserror::Error;

use crate::profile::Profile;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpData {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Country code.
    pub country: String,
    pub profile: Profile,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, data: SignInData) -> Result<(), AuthError>;

    async fn sign_up(&self, data: SignUpData) -> Result<(), AuthError>;
}

/// Logs each submission and succeeds. Passwords are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyAuth;

#[async_trait]
impl AuthService for LogOnlyAuth {
    async fn sign_in(&self, data: SignInData) -> Result<(), AuthError> {
        log::info!("sign-in submitted for {}", data.email);
        Ok(())
    }

    async fn sign_up(&self, data: SignUpData) -> Result<(), AuthError> {
        log::info!(
            "sign-up submitted: {} <{}> from {}, goals {}, risk {}, industry {}",
            data.full_name,
            data.email,
            data.country,
            data.profile.investment_goals,
            data.profile.risk_tolerance,
            data.profile.preferred_industry
        );
        Ok(())
    }
}
