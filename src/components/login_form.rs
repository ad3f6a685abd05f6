use crate::api::{AuthApi, LoginError};
use crate::storage::{persist_tokens, KeyValueStore, StoreError};
use serde::Serialize;
use tera::Context;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const SUCCESS_MESSAGE: &str = "Logged in successfully. Tokens stored.";
pub const FALLBACK_ERROR: &str = "Unable to login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(t) | Self::Error(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is required")]
    MissingUsername,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A login request is already in progress")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Holds the form in `Submitting` and returns it to `Idle` when dropped, so a
/// cancelled submit does not leave the form locked.
struct Submitting<'a>(&'a mut FormStatus);

impl<'a> Submitting<'a> {
    fn enter(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Submitting;
        Self(status)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        *self.0 = FormStatus::Idle;
    }
}

/// Login form state. Each `submit` is one independent attempt; on success
/// the issued tokens are written to the injected store.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    username: String,
    #[serde(skip_serializing)]
    password: String,
    status: FormStatus,
    message: Option<FormMessage>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            status: FormStatus::Idle,
            message: None,
        }
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.set_username(username);
        form.set_password(password);
        form
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        match self.status {
            FormStatus::Idle => "Sign in",
            FormStatus::Submitting => "Signing in...",
        }
    }

    /// Expose the form and its button state to the `login_form.html` partial.
    pub fn fill_context(&self, ctx: &mut Context) {
        ctx.insert("form", self);
        ctx.insert("submit_label", self.submit_label());
        ctx.insert("submit_disabled", &self.submit_disabled());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }

    pub async fn submit<A, S>(&mut self, api: &A, store: &mut S) -> Result<(), SubmitError>
    where
        A: AuthApi + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        if self.status == FormStatus::Submitting {
            return Err(SubmitError::Busy);
        }

        if let Err(e) = self.validate() {
            self.message = Some(FormMessage::Error(e.to_string()));
            return Err(e.into());
        }

        self.message = None;
        let submitting = Submitting::enter(&mut self.status);

        let result = match api.login(&self.username, &self.password).await {
            Ok(tokens) => persist_tokens(store, &tokens).map_err(SubmitError::from),
            Err(e) => Err(e.into()),
        };

        drop(submitting);
        self.message = Some(match &result {
            Ok(()) => {
                tracing::info!("Stored tokens for '{}'", self.username);
                FormMessage::Success(SUCCESS_MESSAGE.to_string())
            }
            Err(e) => {
                let text = e.to_string();
                if text.trim().is_empty() {
                    FormMessage::Error(FALLBACK_ERROR.to_string())
                } else {
                    FormMessage::Error(text)
                }
            }
        });

        result
    }
}
