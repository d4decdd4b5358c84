//! User identity model

use serde::{Deserialize, Serialize};

/// Stock avatar shown when a user has not picked a profile picture.
pub const DEFAULT_AVATAR_URL: &str = "https://images.unsplash.com/photo-1677442136019-21780ecad995?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=100&q=80";

/// The signed-in user as reported by the backend.
///
/// The email is the identity key. Extra fields the backend returns (row ids,
/// verification flags) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    /// Image URL or `data:` URI
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Avatar to display, falling back to the stock image.
    pub fn avatar_or_default(&self) -> &str {
        self.avatar
            .as_deref()
            .map(str::trim)
            .filter(|avatar| !avatar.is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
    }
}
