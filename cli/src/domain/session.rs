//! The signed-in session as read from local storage.

use agentic_common::User;

use crate::domain::error::{AccountError, SessionError};

/// Bearer token and profile of the current user, either possibly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl SessionContext {
    #[must_use]
    pub fn new(token: Option<String>, user: Option<User>) -> Self {
        // A blank token is the same as no token.
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token, user }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no token is stored.
    pub fn require_token(&self) -> Result<&str, SessionError> {
        self.token.as_deref().ok_or(SessionError::NotAuthenticated)
    }

    /// # Errors
    ///
    /// Returns [`AccountError::NoProfile`] when no user is stored.
    pub fn require_user(&self) -> Result<&User, AccountError> {
        self.user.as_ref().ok_or(AccountError::NoProfile)
    }

    /// Numeric id of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error when no profile is stored or it carries no id.
    pub fn user_id(&self) -> Result<i64, AccountError> {
        self.require_user()?.id.ok_or(AccountError::MissingUserId)
    }
}
