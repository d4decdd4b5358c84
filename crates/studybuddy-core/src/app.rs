//! Page wiring.

use std::sync::Arc;

use crate::api::StudyBuddyClient;
use crate::auth::{AuthFormController, AuthService};
use crate::config::ClientConfig;
use crate::contact::ContactController;
use crate::error::Result;
use crate::flashcards::FlashcardController;
use crate::notify::NotificationCenter;
use crate::session::{SessionMode, SessionStore};
use crate::storage::KeyValueStore;
use crate::view::{Dialogs, PageView};

/// One page's worth of state and controllers.
///
/// Everything shares a single [`PageView`], [`SessionStore`] and
/// [`NotificationCenter`]. The saved user and the backend's session cookie
/// live in the same storage, so a later instance on that storage resumes both.
#[derive(Clone)]
pub struct StudyBuddy {
    pub view: PageView,
    pub session: SessionStore,
    pub notifications: NotificationCenter,
    pub auth: AuthService,
    pub auth_forms: AuthFormController,
    pub flashcards: FlashcardController,
    pub contact: ContactController,
}

impl StudyBuddy {
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStore>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Result<Self> {
        let client = StudyBuddyClient::with_storage(config, storage.clone())?;
        let view = PageView::new();
        let session = SessionStore::new(storage);
        let notifications = NotificationCenter::new();

        let auth = AuthService::new(
            client.clone(),
            session.clone(),
            notifications.clone(),
            view.clone(),
            dialogs.clone(),
        );
        let auth_forms = AuthFormController::new(auth.clone(), view.clone(), notifications.clone());
        let flashcards = FlashcardController::new(client.clone(), view.clone(), dialogs);
        let contact = ContactController::new(client, notifications.clone());

        Ok(Self {
            view,
            session,
            notifications,
            auth,
            auth_forms,
            flashcards,
            contact,
        })
    }

    /// Restores the saved session. A storage failure starts the page as a guest.
    pub fn start(&self) -> SessionMode {
        if let Err(error) = self.session.restore() {
            tracing::error!("Failed to restore saved session: {}", error);
        }
        self.session.mode()
    }
}
