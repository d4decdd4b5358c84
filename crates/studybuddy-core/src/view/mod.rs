//! Typed page bindings shared by all controllers.
//!
//! A [`PageView`] is built once at startup and handed to every controller.
//! It owns the observable state of the page outside the session and the
//! toast slot: the auth overlay, the profile modal, the avatar preview and
//! the flashcard panel. Renderers subscribe to it; controllers mutate it.

use std::sync::Arc;

use tokio::sync::watch;

use crate::flashcards::FlashcardPanel;
use crate::models::DEFAULT_AVATAR_URL;

/// Blocking browser-style dialogs.
pub trait Dialogs: Send + Sync {
    fn alert(&self, message: &str);
    /// Returns `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;
}

/// Which auth form, if any, the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthOverlay {
    #[default]
    Hidden,
    Login,
    Signup,
}

impl AuthOverlay {
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Where a click on the auth overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    /// The dimmed area around the form
    Backdrop,
    Form,
}

#[derive(Debug)]
struct Bindings {
    auth_overlay: watch::Sender<AuthOverlay>,
    profile_modal: watch::Sender<bool>,
    avatar_preview: watch::Sender<String>,
    flashcards: watch::Sender<FlashcardPanel>,
}

/// Handle to the page state. Clones share the same bindings.
#[derive(Debug, Clone)]
pub struct PageView {
    bindings: Arc<Bindings>,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        Self {
            bindings: Arc::new(Bindings {
                auth_overlay: watch::channel(AuthOverlay::Hidden).0,
                profile_modal: watch::channel(false).0,
                avatar_preview: watch::channel(DEFAULT_AVATAR_URL.to_string()).0,
                flashcards: watch::channel(FlashcardPanel::default()).0,
            }),
        }
    }

    pub fn auth_overlay(&self) -> AuthOverlay {
        *self.bindings.auth_overlay.borrow()
    }

    pub fn subscribe_auth_overlay(&self) -> watch::Receiver<AuthOverlay> {
        self.bindings.auth_overlay.subscribe()
    }

    pub fn set_auth_overlay(&self, overlay: AuthOverlay) {
        self.bindings.auth_overlay.send_if_modified(|current| {
            let changed = *current != overlay;
            *current = overlay;
            changed
        });
    }

    pub fn close_auth_overlay(&self) {
        self.set_auth_overlay(AuthOverlay::Hidden);
    }

    pub fn profile_modal_open(&self) -> bool {
        *self.bindings.profile_modal.borrow()
    }

    pub fn set_profile_modal(&self, open: bool) {
        self.bindings.profile_modal.send_if_modified(|current| {
            let changed = *current != open;
            *current = open;
            changed
        });
    }

    pub fn avatar_preview(&self) -> String {
        self.bindings.avatar_preview.borrow().clone()
    }

    pub fn subscribe_avatar_preview(&self) -> watch::Receiver<String> {
        self.bindings.avatar_preview.subscribe()
    }

    pub fn set_avatar_preview(&self, source: impl Into<String>) {
        self.bindings.avatar_preview.send_replace(source.into());
    }

    pub fn reset_avatar_preview(&self) {
        self.set_avatar_preview(DEFAULT_AVATAR_URL);
    }

    pub fn flashcards(&self) -> FlashcardPanel {
        self.bindings.flashcards.borrow().clone()
    }

    pub fn subscribe_flashcards(&self) -> watch::Receiver<FlashcardPanel> {
        self.bindings.flashcards.subscribe()
    }

    /// Applies `update` to the flashcard panel and notifies subscribers.
    pub fn update_flashcards(&self, update: impl FnOnce(&mut FlashcardPanel)) {
        self.bindings.flashcards.send_modify(update);
    }

    /// Applies `update` and notifies only when it returns `true`.
    ///
    /// The check and the write happen under one lock, so two callers racing
    /// on the same condition cannot both see it hold.
    pub fn update_flashcards_if(&self, update: impl FnOnce(&mut FlashcardPanel) -> bool) -> bool {
        self.bindings.flashcards.send_if_modified(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_starts_hidden_and_toggles() {
        let view = PageView::new();
        assert_eq!(view.auth_overlay(), AuthOverlay::Hidden);
        assert!(!view.auth_overlay().is_open());

        view.set_auth_overlay(AuthOverlay::Signup);
        assert!(view.auth_overlay().is_open());

        view.close_auth_overlay();
        assert_eq!(view.auth_overlay(), AuthOverlay::Hidden);
    }

    #[test]
    fn clones_share_bindings() {
        let view = PageView::new();
        let other = view.clone();
        other.set_profile_modal(true);
        assert!(view.profile_modal_open());

        other.set_avatar_preview("data:image/png;base64,AAAA");
        assert_eq!(view.avatar_preview(), "data:image/png;base64,AAAA");
        view.reset_avatar_preview();
        assert_eq!(other.avatar_preview(), DEFAULT_AVATAR_URL);
    }

    #[test]
    fn unchanged_overlay_does_not_notify() {
        let view = PageView::new();
        let receiver = view.subscribe_auth_overlay();
        view.close_auth_overlay();
        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn conditional_flashcard_update_reports_and_notifies_only_on_change() {
        let view = PageView::new();
        let receiver = view.subscribe_flashcards();

        assert!(!view.update_flashcards_if(|_| false));
        assert!(!receiver.has_changed().unwrap());

        assert!(view.update_flashcards_if(|panel| {
            panel.notes = "cells".to_string();
            true
        }));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(view.flashcards().notes, "cells");
    }
}
