//! Account operations behind the header and the auth forms.
//!
//! Every operation reports back through the toast slot or a dialog and
//! returns a [`Submission`] so a shell can tell how the interaction ended.
//! Transport errors are logged and replaced by a fixed message; the user
//! never sees the underlying cause.

mod forms;
mod validation;

use std::sync::Arc;

pub use forms::AuthFormController;
pub use validation::{
    check_password_length, FormError, LoginForm, SignupForm, ValidSignup, MIN_PASSWORD_CHARS,
};

use crate::api::{
    LoginOutcome, ProfileUpdate, SignupOutcome, SignupRequest, StatusOutcome, StudyBuddyClient,
};
use crate::avatar::AvatarFile;
use crate::models::DEFAULT_AVATAR_URL;
use crate::notify::NotificationCenter;
use crate::session::SessionStore;
use crate::util::message_or;
use crate::view::{Dialogs, PageView};

pub const NO_USER_MESSAGE: &str = "No user logged in.";
pub const REMOVE_ACCOUNT_PROMPT: &str =
    "Are you sure you want to delete your account? This action cannot be undone.";

/// How a user interaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Completed,
    /// Refused locally or by the backend, or the request failed
    Rejected,
    /// The user declined a confirmation
    Cancelled,
}

impl Submission {
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Login, signup, logout, account removal and profile changes.
#[derive(Clone)]
pub struct AuthService {
    client: StudyBuddyClient,
    session: SessionStore,
    notifications: NotificationCenter,
    view: PageView,
    dialogs: Arc<dyn Dialogs>,
}

impl AuthService {
    pub fn new(
        client: StudyBuddyClient,
        session: SessionStore,
        notifications: NotificationCenter,
        view: PageView,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self {
            client,
            session,
            notifications,
            view,
            dialogs,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn login(&self, form: &LoginForm) -> Submission {
        let email = match form.validate() {
            Ok(email) => email,
            Err(error) => {
                self.notifications.error(error.to_string());
                return Submission::Rejected;
            }
        };

        self.notifications.info("Logging in...");
        match self.client.login(&email, &form.password).await {
            Ok(LoginOutcome::SignedIn(user)) => {
                if let Err(error) = self.session.set(user) {
                    tracing::error!("Failed to persist session: {}", error);
                    self.notifications.error("Login failed. Please try again.");
                    return Submission::Rejected;
                }
                self.view.close_auth_overlay();
                self.notifications.success("Login successful!");
                Submission::Completed
            }
            Ok(LoginOutcome::Rejected { message }) => {
                tracing::info!(%email, "Login rejected");
                self.notifications
                    .error(message_or(message.as_deref(), "Invalid credentials"));
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!("Login request failed: {}", error);
                self.notifications.error("Login failed. Please try again.");
                Submission::Rejected
            }
        }
    }

    /// Creates an account. Success leaves the session untouched; the user
    /// signs in after verifying their email.
    pub async fn signup(&self, form: &SignupForm, avatar: Option<&AvatarFile>) -> Submission {
        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(error) => {
                self.notifications.error(error.to_string());
                return Submission::Rejected;
            }
        };

        self.notifications.info("Creating account...");
        let request = SignupRequest {
            name: valid.name,
            email: valid.email,
            password: valid.password,
            avatar: avatar.map_or_else(|| DEFAULT_AVATAR_URL.to_string(), AvatarFile::to_data_uri),
        };

        match self.client.signup(&request).await {
            Ok(SignupOutcome::VerificationSent { message }) => {
                tracing::info!(email = %request.email, "Account created, awaiting verification");
                self.notifications.success(message_or(
                    message.as_deref(),
                    "Verification email sent. Please check your inbox.",
                ));
                self.view.close_auth_overlay();
                self.view.reset_avatar_preview();
                Submission::Completed
            }
            Ok(SignupOutcome::Rejected { message }) => {
                self.notifications
                    .error(message_or(message.as_deref(), "Signup failed"));
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!("Signup request failed: {}", error);
                self.notifications.error("Signup failed. Please try again.");
                Submission::Rejected
            }
        }
    }

    /// Clears the saved user and the backend session cookie.
    pub fn logout(&self) {
        self.client.clear_cookies();
        if let Err(error) = self.session.clear() {
            tracing::error!("Failed to remove saved session: {}", error);
        }
        self.notifications.info("Logged out successfully");
    }

    /// Deletes the signed-in account after the user confirms.
    pub async fn remove_account(&self) -> Submission {
        let Some(user) = self.session.get() else {
            self.dialogs.alert(NO_USER_MESSAGE);
            return Submission::Rejected;
        };
        if !self.dialogs.confirm(REMOVE_ACCOUNT_PROMPT) {
            return Submission::Cancelled;
        }

        match self.client.remove_account(&user.email).await {
            Ok(StatusOutcome::Accepted { .. }) => {
                tracing::info!(email = %user.email, "Account removed");
                self.dialogs.alert("Account removed successfully.");
                self.logout();
                self.view.set_profile_modal(false);
                Submission::Completed
            }
            Ok(StatusOutcome::Rejected { message }) => {
                self.dialogs
                    .alert(&message_or(message.as_deref(), "Account removal failed"));
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!("Account removal request failed: {}", error);
                self.dialogs.alert("Account removal failed. Please try again.");
                Submission::Rejected
            }
        }
    }

    /// Changes the avatar, the password, or both.
    pub async fn update_profile(
        &self,
        avatar: Option<&AvatarFile>,
        new_password: Option<&str>,
    ) -> Submission {
        let Some(user) = self.session.get() else {
            self.dialogs.alert(NO_USER_MESSAGE);
            return Submission::Rejected;
        };

        let new_password = new_password.filter(|password| !password.is_empty());
        let checked = if avatar.is_none() && new_password.is_none() {
            Err(FormError::NothingToUpdate)
        } else {
            new_password.map_or(Ok(()), check_password_length)
        };
        if let Err(error) = checked {
            self.notifications.error(error.to_string());
            return Submission::Rejected;
        }

        let update = ProfileUpdate {
            avatar: avatar.map(AvatarFile::to_data_uri),
            new_password: new_password.map(ToString::to_string),
        };

        match self.client.update_profile(&update).await {
            Ok(StatusOutcome::Accepted { message }) => {
                if let Some(avatar) = update.avatar {
                    if let Err(error) = self.session.set(user.with_avatar(avatar)) {
                        tracing::error!("Failed to persist updated avatar: {}", error);
                    }
                }
                self.notifications.success(message_or(
                    message.as_deref(),
                    "Profile updated successfully.",
                ));
                Submission::Completed
            }
            Ok(StatusOutcome::Rejected { message }) => {
                self.notifications
                    .error(message_or(message.as_deref(), "Profile update failed"));
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!("Profile update request failed: {}", error);
                self.notifications.error("Profile update failed");
                Submission::Rejected
            }
        }
    }
}
