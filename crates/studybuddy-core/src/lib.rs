//! studybuddy-core - Client library for AI Study Buddy
//!
//! Session state, toast notifications, the auth forms and the flashcard
//! panel of the study buddy page, independent of any particular front end.
//! Shells drive the controllers and render the state they publish.

pub mod api;
pub mod app;
pub mod auth;
pub mod avatar;
pub mod config;
pub mod contact;
pub mod error;
pub mod flashcards;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod util;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app::StudyBuddy;
pub use auth::{FormError, Submission};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{Flashcard, Notification, NotificationKind, User};
pub use session::SessionMode;
