//! Bearer-token authentication.
//!
//! The server holds exactly one valid token. `POST /login` hands it out and
//! every item route requires `Authorization: Bearer <token>`.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredentials,
    #[error("Authorization header is not a bearer token")]
    MalformedHeader,
    #[error("Invalid bearer token")]
    InvalidToken,
}

/// Credentials extracted from an `Authorization` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Parse a raw header value. The scheme is matched case-insensitively.
    pub fn from_header(header: Option<&str>) -> Result<Self, AuthError> {
        let Some(raw) = header else {
            return Ok(Credentials::Anonymous);
        };
        let (scheme, token) = raw
            .trim()
            .split_once(char::is_whitespace)
            .ok_or(AuthError::MalformedHeader)?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }
        Ok(Credentials::Bearer(token.to_string()))
    }
}

/// Issues and checks the session token.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    token: String,
}

impl TokenAuthority {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// A fresh random token.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }

    /// Use the configured token, or generate one.
    pub fn from_config(token: Option<&str>) -> Self {
        match token {
            Some(token) => Self::new(token),
            None => Self::generate(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError> {
        match credentials {
            Credentials::Bearer(token) if token == &self.token => Ok(()),
            Credentials::Bearer(_) => {
                debug!("Rejected request with unknown bearer token");
                Err(AuthError::InvalidToken)
            }
            Credentials::Anonymous => Err(AuthError::MissingCredentials),
        }
    }

    /// Parse and check an `Authorization` header in one step.
    pub fn authorize_header(&self, header: Option<&str>) -> Result<(), AuthError> {
        self.authenticate(&Credentials::from_header(header)?)
    }
}
