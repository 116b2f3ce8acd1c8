//! Authentication form view-models.
//!
//! A submit awaits the identity provider once. Success navigates to the
//! dashboard; failure stores the provider's message for inline display and
//! keeps the user on the form. No retries.

use crate::{
    auth::{AuthError, AuthSession, IdentityProvider, ProfileUpdate},
    routes::Route,
};

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Sign up failed";
pub const GOOGLE_FAILED: &str = "Google Sign-in failed";
pub const RESET_FAILED: &str = "Password reset failed";
pub const RESET_SENT: &str = "Password reset email sent. Check your inbox.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Navigate(Route),
    Stay,
}

/// Fields shared by every form: the in-flight flag and the inline error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub loading: bool,
    pub error:   Option<String>,
}

impl FormStatus {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish<T>(&mut self, result: Result<T, AuthError>, fallback: &str) -> Option<T> {
        self.loading = false;
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Identity provider call failed: {e}");
                let message = if e.message.is_empty() { fallback.to_string() } else { e.message };
                self.error = Some(message);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email:    String,
    pub password: String,
    pub status:   FormStatus,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self { email: email.to_string(), password: password.to_string(), ..Default::default() }
    }

    pub async fn submit<P: IdentityProvider>(&mut self, session: &AuthSession<P>) -> FormOutcome {
        self.status.begin();
        let result = session.provider().sign_in(&self.email, &self.password).await;
        match self.status.finish(result, LOGIN_FAILED) {
            Some(_) => FormOutcome::Navigate(Route::Dashboard),
            None => FormOutcome::Stay,
        }
    }

    pub async fn submit_google<P: IdentityProvider>(&mut self, session: &AuthSession<P>) -> FormOutcome {
        google(&mut self.status, session).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name:     String,
    pub email:    String,
    pub password: String,
    pub status:   FormStatus,
}

impl SignupForm {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    /// Create the account, then set its display name.
    pub async fn submit<P: IdentityProvider>(&mut self, session: &AuthSession<P>) -> FormOutcome {
        self.status.begin();
        let provider = session.provider();
        let result = match provider.sign_up(&self.email, &self.password).await {
            Ok(_) => {
                provider
                    .update_profile(ProfileUpdate {
                        display_name: Some(self.name.clone()),
                        photo_url: None,
                    })
                    .await
            }
            Err(e) => Err(e),
        };
        match self.status.finish(result, SIGNUP_FAILED) {
            Some(_) => FormOutcome::Navigate(Route::Dashboard),
            None => FormOutcome::Stay,
        }
    }

    pub async fn submit_google<P: IdentityProvider>(&mut self, session: &AuthSession<P>) -> FormOutcome {
        google(&mut self.status, session).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub email:   String,
    pub status:  FormStatus,
    pub notice:  Option<String>,
}

impl ResetForm {
    pub fn new(email: &str) -> Self {
        Self { email: email.to_string(), ..Default::default() }
    }

    pub async fn submit<P: IdentityProvider>(&mut self, session: &AuthSession<P>) -> FormOutcome {
        self.status.begin();
        self.notice = None;
        let result = session.provider().send_password_reset(&self.email).await;
        if self.status.finish(result, RESET_FAILED).is_some() {
            self.notice = Some(RESET_SENT.to_string());
        }
        FormOutcome::Stay
    }
}

async fn google<P: IdentityProvider>(status: &mut FormStatus, session: &AuthSession<P>) -> FormOutcome {
    status.begin();
    let result = session.provider().sign_in_with_google().await;
    match status.finish(result, GOOGLE_FAILED) {
        Some(_) => FormOutcome::Navigate(Route::Dashboard),
        None => FormOutcome::Stay,
    }
}
