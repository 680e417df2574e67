//! Application service: login, logout and the stored profile.

use agentic_common::{User, local_keys};
use anyhow::{Context, Result};

use crate::application::ports::{AuthApi, LocalStore};
use crate::domain::error::AccountError;
use crate::domain::session::SessionContext;

/// Credentials of the seeded demo account.
pub const DEMO_EMAIL: &str = "admin@agenticai.com";
pub const DEMO_PASSWORD: &str = "Admin123!";

/// Read the session once at startup.
///
/// # Errors
///
/// Returns an error if the local store cannot be read or holds a malformed
/// token or user.
pub fn load_session(store: &impl LocalStore) -> Result<SessionContext> {
    let token = store
        .get::<String>(local_keys::TOKEN)
        .context("cannot read stored token")?;
    let user = store
        .get::<User>(local_keys::USER)
        .context("cannot read stored profile")?;
    Ok(SessionContext::new(token, user))
}

/// Authenticate and store the token and profile.
///
/// # Errors
///
/// Returns an error if the backend rejects the credentials or the session
/// cannot be stored.
pub async fn login(
    api: &impl AuthApi,
    store: &impl LocalStore,
    email: &str,
    password: &str,
) -> Result<User> {
    let response = api
        .login(email, password)
        .await
        .context("login failed")?;
    store.set(local_keys::TOKEN, &response.access_token)?;
    store.set(local_keys::USER, &response.user)?;
    tracing::info!(email = %response.user.email, "logged in");
    Ok(response.user)
}

/// Forget the session and every locally created agent.
///
/// # Errors
///
/// Returns an error if a key cannot be removed.
pub fn logout(store: &impl LocalStore) -> Result<()> {
    for key in local_keys::SESSION_KEYS {
        store
            .remove(key)
            .with_context(|| format!("cannot remove '{key}'"))?;
    }
    Ok(())
}

/// Fields `profile update` may change. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company.is_none()
            && self.role.is_none()
            && self.bio.is_none()
    }

    fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if self.company.is_some() {
            user.company = self.company;
        }
        if self.role.is_some() {
            user.role = self.role;
        }
        if self.bio.is_some() {
            user.bio = self.bio;
        }
    }
}

/// Merge `update` into the stored profile. Local only.
///
/// # Errors
///
/// Returns [`AccountError::NoProfile`] when nobody is logged in, or an
/// error if the store cannot be written.
pub fn update_profile(store: &impl LocalStore, update: ProfileUpdate) -> Result<User> {
    let mut user: User = store
        .get(local_keys::USER)?
        .ok_or(AccountError::NoProfile)?;
    update.apply(&mut user);
    store.set(local_keys::USER, &user)?;
    Ok(user)
}
