//! Data models for AI Study Buddy

mod flashcard;
mod notification;
mod user;

pub use flashcard::Flashcard;
pub use notification::{Notification, NotificationKind};
pub use user::{User, DEFAULT_AVATAR_URL};
