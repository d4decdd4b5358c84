//! Client-side form checks run before any request is issued.

use thiserror::Error;

/// Shortest password accepted on signup and password change, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// A form the page refuses to submit. The display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Please select an image file")]
    NotAnImage,
    #[error("Image size should be less than 5MB")]
    ImageTooLarge,
    #[error("Please enter some study notes first!")]
    EmptyNotes,
    #[error("Please choose a new avatar or password")]
    NothingToUpdate,
}

pub fn check_password_length(password: &str) -> Result<(), FormError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FormError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the trimmed email when both fields are present.
    pub fn validate(&self) -> Result<String, FormError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(email.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A signup form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// Checks presence, then matching passwords, then password length.
    pub fn validate(&self) -> Result<ValidSignup, FormError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        check_password_length(&self.password)?;

        Ok(ValidSignup {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
