//! Identity-provider seam.
//!
//! Views never reach for a global auth object. They receive an
//! `AuthSession` wrapping any `IdentityProvider`; tests and the runner use
//! `InMemoryIdentityProvider`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// A failed identity-provider call. `message` is shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid:          String,
    pub email:        String,
    pub display_name: Option<String>,
    pub photo_url:    Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url:    Option<String>,
}

/// Operations consumed from the external identity service.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<User>;
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<User>;
    /// Interactive Google account chooser.
    async fn sign_in_with_google(&self) -> AuthResult<User>;
    async fn sign_out(&self) -> AuthResult<()>;
    async fn send_password_reset(&self, email: &str) -> AuthResult<()>;
    /// Updates the signed-in user; rejects when nobody is signed in.
    async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<User>;
    fn current_user(&self) -> Option<User>;
}

/// Injected handle passed to every view that needs identity.
pub struct AuthSession<P> {
    provider: P,
}

impl<P: IdentityProvider> AuthSession<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn current_user(&self) -> Option<User> {
        self.provider.current_user()
    }

    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await
    }
}

/// What the Google popup does on the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    Account { email: String, display_name: String },
    Closed,
}

#[derive(Debug, Clone)]
struct Account {
    user:     User,
    password: String,
}

#[derive(Debug, Default)]
struct ProviderState {
    accounts:    HashMap<String, Account>,
    current:     Option<String>,
    popup:       Option<PopupOutcome>,
    reset_mails: Vec<String>,
}

/// In-process identity provider with Firebase-style error messages.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    state: Mutex<ProviderState>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account directly, bypassing sign-up.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.lock().accounts.insert(
            email.to_string(),
            Account { user: new_user(email, None), password: password.to_string() },
        );
        self
    }

    pub fn set_popup_outcome(&self, outcome: PopupOutcome) {
        self.lock().popup = Some(outcome);
    }

    /// Addresses that have been sent a reset mail, oldest first.
    pub fn reset_mails(&self) -> Vec<String> {
        self.lock().reset_mails.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProviderState> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn new_user(email: &str, display_name: Option<String>) -> User {
    User {
        uid: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        display_name,
        photo_url: None,
    }
}

fn validate_email(email: &str) -> AuthResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AuthError::new("Firebase: Error (auth/invalid-email).")),
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<User> {
        validate_email(email)?;
        let mut state = self.lock();
        let user = match state.accounts.get(email) {
            Some(account) if account.password == password => account.user.clone(),
            _ => return Err(AuthError::new("Firebase: Error (auth/invalid-credential).")),
        };
        state.current = Some(email.to_string());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<User> {
        validate_email(email)?;
        if password.len() < 6 {
            return Err(AuthError::new(
                "Firebase: Password should be at least 6 characters (auth/weak-password).",
            ));
        }
        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(AuthError::new("Firebase: Error (auth/email-already-in-use)."));
        }
        let user = new_user(email, None);
        state.accounts.insert(
            email.to_string(),
            Account { user: user.clone(), password: password.to_string() },
        );
        state.current = Some(email.to_string());
        Ok(user)
    }

    async fn sign_in_with_google(&self) -> AuthResult<User> {
        let mut state = self.lock();
        let (email, display_name) = match state.popup.take() {
            Some(PopupOutcome::Account { email, display_name }) => (email, display_name),
            Some(PopupOutcome::Closed) | None => {
                return Err(AuthError::new("Firebase: Error (auth/popup-closed-by-user)."));
            }
        };
        let user = state
            .accounts
            .entry(email.clone())
            .or_insert_with(|| Account {
                user: new_user(&email, Some(display_name)),
                password: String::new(),
            })
            .user
            .clone();
        state.current = Some(email);
        Ok(user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.lock().current = None;
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        validate_email(email)?;
        let mut state = self.lock();
        if !state.accounts.contains_key(email) {
            return Err(AuthError::new("Firebase: Error (auth/user-not-found)."));
        }
        state.reset_mails.push(email.to_string());
        Ok(())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<User> {
        let mut state = self.lock();
        let Some(email) = state.current.clone() else {
            return Err(AuthError::new("No user"));
        };
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or_else(|| AuthError::new("No user"))?;
        if let Some(name) = update.display_name {
            account.user.display_name = Some(name);
        }
        if let Some(url) = update.photo_url {
            account.user.photo_url = Some(url);
        }
        Ok(account.user.clone())
    }

    fn current_user(&self) -> Option<User> {
        let state = self.lock();
        let email = state.current.as_ref()?;
        state.accounts.get(email).map(|a| a.user.clone())
    }
}
