use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use super::{AuthService, LoginForm, SignupForm, Submission};
use crate::avatar::AvatarFile;
use crate::error::Error;
use crate::notify::NotificationCenter;
use crate::view::{AuthOverlay, OverlayClick, PageView};

/// Front of the login and signup forms.
///
/// Runs the same field checks as [`AuthService`] so a bad form fails before
/// anything is sent, owns the overlay navigation and keeps the picture picked
/// for the signup and profile forms.
#[derive(Clone)]
pub struct AuthFormController {
    auth: AuthService,
    view: PageView,
    notifications: NotificationCenter,
    selected_avatar: Arc<watch::Sender<Option<AvatarFile>>>,
}

impl AuthFormController {
    pub fn new(auth: AuthService, view: PageView, notifications: NotificationCenter) -> Self {
        Self {
            auth,
            view,
            notifications,
            selected_avatar: Arc::new(watch::channel(None).0),
        }
    }

    pub fn show_login_form(&self) {
        self.view.set_auth_overlay(AuthOverlay::Login);
    }

    pub fn show_signup_form(&self) {
        self.view.set_auth_overlay(AuthOverlay::Signup);
    }

    pub fn switch_to_signup(&self) {
        self.show_signup_form();
    }

    pub fn switch_to_login(&self) {
        self.show_login_form();
    }

    pub fn close_auth_forms(&self) {
        self.view.close_auth_overlay();
    }

    pub fn handle_escape(&self) {
        self.close_auth_forms();
    }

    /// Only clicks on the backdrop close the overlay.
    pub fn handle_overlay_click(&self, target: OverlayClick) {
        if target == OverlayClick::Backdrop {
            self.close_auth_forms();
        }
    }

    pub async fn submit_login(&self, form: &LoginForm) -> Submission {
        if let Err(error) = form.validate() {
            self.notifications.error(error.to_string());
            return Submission::Rejected;
        }
        self.auth.login(form).await
    }

    /// Submits the signup form with the selected picture, if any.
    pub async fn submit_signup(&self, form: &SignupForm) -> Submission {
        if let Err(error) = form.validate() {
            self.notifications.error(error.to_string());
            return Submission::Rejected;
        }

        let avatar = self.selected_avatar();
        let result = self.auth.signup(form, avatar.as_ref()).await;
        if result.is_completed() {
            self.clear_selected_avatar();
        }
        result
    }

    /// Submits the profile form with the selected picture, if any.
    pub async fn submit_profile_update(&self, new_password: Option<&str>) -> Submission {
        let avatar = self.selected_avatar();
        let result = self.auth.update_profile(avatar.as_ref(), new_password).await;
        if result.is_completed() {
            self.clear_selected_avatar();
        }
        result
    }

    /// Loads a picture for the signup or profile form and previews it.
    ///
    /// Files that are not images or exceed the size limit are refused with a
    /// notification and leave the previous selection in place.
    pub async fn select_profile_picture(&self, path: impl AsRef<Path>) -> Submission {
        match AvatarFile::load(path.as_ref()).await {
            Ok(avatar) => {
                self.view.set_avatar_preview(avatar.to_data_uri());
                self.selected_avatar.send_replace(Some(avatar));
                Submission::Completed
            }
            Err(Error::InvalidInput(message)) => {
                self.notifications.error(message);
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!(
                    path = %path.as_ref().display(),
                    "Failed to read profile picture: {}",
                    error
                );
                self.notifications.error("Could not read the selected picture");
                Submission::Rejected
            }
        }
    }

    pub fn selected_avatar(&self) -> Option<AvatarFile> {
        self.selected_avatar.borrow().clone()
    }

    pub fn clear_selected_avatar(&self) {
        self.selected_avatar.send_replace(None);
    }
}
