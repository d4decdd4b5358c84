use std::path::Path;

use studybuddy_core::auth::{LoginForm, SignupForm};
use studybuddy_core::{StudyBuddy, Submission};

use super::print_toast;
use crate::render::format_status;

pub async fn run_login(app: &StudyBuddy, email: String, password: String) -> bool {
    let result = app
        .auth_forms
        .submit_login(&LoginForm::new(email, password))
        .await;
    print_toast(app);
    result.is_completed()
}

pub async fn run_signup(app: &StudyBuddy, form: &SignupForm, avatar: Option<&Path>) -> bool {
    if let Some(path) = avatar {
        if app.auth_forms.select_profile_picture(path).await != Submission::Completed {
            print_toast(app);
            return false;
        }
    }

    let result = app.auth_forms.submit_signup(form).await;
    print_toast(app);
    result.is_completed()
}

pub fn run_logout(app: &StudyBuddy) -> bool {
    app.auth.logout();
    print_toast(app);
    true
}

pub fn run_status(app: &StudyBuddy) -> bool {
    for line in format_status(app.session.get().as_ref()) {
        println!("{line}");
    }
    true
}

/// Declining the confirmation is not a failure.
pub async fn run_remove_account(app: &StudyBuddy) -> bool {
    let result = app.auth.remove_account().await;
    print_toast(app);
    result != Submission::Rejected
}

pub async fn run_profile(
    app: &StudyBuddy,
    avatar: Option<&Path>,
    new_password: Option<&str>,
) -> bool {
    if let Some(path) = avatar {
        if app.auth_forms.select_profile_picture(path).await != Submission::Completed {
            print_toast(app);
            return false;
        }
    }

    let result = app.auth_forms.submit_profile_update(new_password).await;
    print_toast(app);
    result.is_completed()
}
