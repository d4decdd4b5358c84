//! Flashcard generation panel.
//!
//! State machine over the generate button: `Idle → Loading → Idle`. The
//! return to idle runs from a drop guard, so it happens on every outcome,
//! including transport failures and a dropped request future.

use std::sync::Arc;

use crate::api::{GenerateOutcome, StudyBuddyClient};
use crate::auth::FormError;
use crate::models::Flashcard;
use crate::util::message_or;
use crate::view::{Dialogs, PageView};

pub const GENERATE_LABEL: &str = "Generate Flashcards";
pub const GENERATING_LABEL: &str = "Generating...";
pub const GENERATING_PLACEHOLDER: &str = "Generating flashcards...";
pub const NO_CARDS_MESSAGE: &str =
    "No flashcards were generated. Please try with different content.";
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to server. Please check your internet connection.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
pub const LIMIT_MESSAGE: &str = "You have reached the daily limit of generating flashcards.";
pub const LIMIT_FOLLOW_UP: &str = "Please come back tomorrow or upgrade your plan.";
pub const UPGRADE_PATH: &str = "/payment";
pub const UPGRADE_LINK_TEXT: &str = "upgrade your plan";

/// The generate button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateButton {
    pub enabled: bool,
    pub label: &'static str,
}

impl GenerateButton {
    pub const fn idle() -> Self {
        Self {
            enabled: true,
            label: GENERATE_LABEL,
        }
    }

    pub const fn loading() -> Self {
        Self {
            enabled: false,
            label: GENERATING_LABEL,
        }
    }

    pub const fn is_loading(&self) -> bool {
        !self.enabled
    }
}

impl Default for GenerateButton {
    fn default() -> Self {
        Self::idle()
    }
}

/// One rendered card, numbered from 1 in response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

impl RenderedCard {
    pub fn heading(&self) -> String {
        format!("Q{}: {}", self.number, self.question)
    }
}

/// Contents of the result area under the notes input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultArea {
    #[default]
    Empty,
    Generating,
    Cards(Vec<RenderedCard>),
    NoCards,
    Error(String),
    ConnectionFailed,
}

impl ResultArea {
    fn from_cards(cards: Vec<Flashcard>) -> Self {
        if cards.is_empty() {
            return Self::NoCards;
        }
        Self::Cards(
            cards
                .into_iter()
                .enumerate()
                .map(|(index, card)| RenderedCard {
                    number: index + 1,
                    question: card.question,
                    answer: card.answer,
                })
                .collect(),
        )
    }

    /// Status line shown in the area, if it has one.
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Generating => Some(GENERATING_PLACEHOLDER.to_string()),
            Self::Cards(cards) => Some(format!(
                "Successfully generated {} flashcards!",
                cards.len()
            )),
            Self::NoCards => Some(NO_CARDS_MESSAGE.to_string()),
            Self::Error(message) => Some(format!("Error: {message}")),
            Self::ConnectionFailed => Some(CONNECTION_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn cards(&self) -> &[RenderedCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// Modal shown when the daily generation limit is hit.
///
/// It has no backdrop dismissal; only [`FlashcardController::close_limit_popup`]
/// closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitPopup {
    pub message: &'static str,
    pub follow_up: &'static str,
    pub upgrade_path: &'static str,
    pub upgrade_link_text: &'static str,
}

impl Default for LimitPopup {
    fn default() -> Self {
        Self {
            message: LIMIT_MESSAGE,
            follow_up: LIMIT_FOLLOW_UP,
            upgrade_path: UPGRADE_PATH,
            upgrade_link_text: UPGRADE_LINK_TEXT,
        }
    }
}

/// Daily quota counters reported with a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub remaining: i64,
    pub limit: i64,
}

/// Everything the flashcard section of the page displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlashcardPanel {
    pub notes: String,
    pub button: GenerateButton,
    pub result: ResultArea,
    pub limit_popup: Option<LimitPopup>,
    pub quota: Option<Quota>,
}

/// Resets the button when dropped. A placeholder nothing replaced is removed.
struct LoadingGuard<'a> {
    view: &'a PageView,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.update_flashcards(|panel| {
            panel.button = GenerateButton::idle();
            if panel.result == ResultArea::Generating {
                panel.result = ResultArea::Empty;
            }
        });
    }
}

/// What a click found when it tried to start a request.
enum Start {
    Busy,
    NoNotes,
    Started(String),
}

/// Drives the flashcard panel.
#[derive(Clone)]
pub struct FlashcardController {
    client: StudyBuddyClient,
    view: PageView,
    dialogs: Arc<dyn Dialogs>,
}

impl FlashcardController {
    pub fn new(client: StudyBuddyClient, view: PageView, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            client,
            view,
            dialogs,
        }
    }

    /// Replaces the notes input text.
    pub fn set_notes(&self, notes: impl Into<String>) {
        let notes = notes.into();
        self.view.update_flashcards(|panel| panel.notes = notes);
    }

    /// The Clear button: empties the notes input and the result area.
    pub fn clear(&self) {
        self.view.update_flashcards(|panel| {
            panel.notes.clear();
            panel.result = ResultArea::Empty;
        });
    }

    pub fn close_limit_popup(&self) {
        self.view.update_flashcards(|panel| panel.limit_popup = None);
    }

    /// The generate button click.
    ///
    /// Blank notes raise an alert and send nothing. A click while a request
    /// is pending is ignored.
    pub async fn generate(&self) {
        let mut start = Start::Busy;
        self.view.update_flashcards_if(|panel| {
            if panel.button.is_loading() {
                return false;
            }
            let notes = panel.notes.trim();
            if notes.is_empty() {
                start = Start::NoNotes;
                return false;
            }
            start = Start::Started(notes.to_string());
            panel.button = GenerateButton::loading();
            panel.result = ResultArea::Generating;
            true
        });

        let notes = match start {
            Start::Busy => {
                tracing::debug!("Generate ignored while a request is pending");
                return;
            }
            Start::NoNotes => {
                self.dialogs.alert(&FormError::EmptyNotes.to_string());
                return;
            }
            Start::Started(notes) => notes,
        };
        let _guard = LoadingGuard { view: &self.view };

        tracing::debug!(chars = notes.chars().count(), "Requesting flashcards");
        match self.client.generate(&notes).await {
            Ok(GenerateOutcome::Generated {
                cards,
                remaining,
                limit,
            }) => {
                tracing::info!(count = cards.len(), "Flashcards generated");
                self.view.update_flashcards(|panel| {
                    panel.result = ResultArea::from_cards(cards);
                    if let (Some(remaining), Some(limit)) = (remaining, limit) {
                        panel.quota = Some(Quota { remaining, limit });
                    }
                });
            }
            Ok(GenerateOutcome::LimitReached { message }) => {
                tracing::info!(
                    server_message = message.as_deref().unwrap_or_default(),
                    "Daily flashcard limit reached"
                );
                self.view.update_flashcards(|panel| {
                    panel.limit_popup = Some(LimitPopup::default());
                    panel.result = ResultArea::Empty;
                });
            }
            Ok(GenerateOutcome::Rejected { message }) => {
                let message = message_or(message.as_deref(), GENERIC_ERROR_MESSAGE);
                tracing::warn!("Flashcard generation rejected: {}", message);
                self.view
                    .update_flashcards(|panel| panel.result = ResultArea::Error(message));
            }
            Err(error) => {
                tracing::error!("Flashcard request failed: {}", error);
                self.view
                    .update_flashcards(|panel| panel.result = ResultArea::ConnectionFailed);
            }
        }
    }
}
