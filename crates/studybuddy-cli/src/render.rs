//! Plain-text rendering of the page state.

use studybuddy_core::flashcards::{FlashcardPanel, LimitPopup, ResultArea};
use studybuddy_core::notify::Toast;
use studybuddy_core::{ClientConfig, User};

pub fn format_toast(toast: &Toast) -> String {
    format!(
        "[{}] {}",
        toast.notification.kind, toast.notification.message
    )
}

pub fn format_panel_lines(panel: &FlashcardPanel, config: &ClientConfig) -> Vec<String> {
    let mut lines = Vec::new();

    for card in panel.result.cards() {
        lines.push(card.heading());
        lines.push(format!("   {}", card.answer));
        lines.push(String::new());
    }
    if let Some(status) = panel.result.status_line() {
        lines.push(status);
    }
    if let Some(quota) = panel.quota {
        lines.push(format!(
            "{} of {} generations left today",
            quota.remaining, quota.limit
        ));
    }
    if let Some(popup) = &panel.limit_popup {
        lines.extend(format_limit_popup(popup, &config.url_for(popup.upgrade_path)));
    }

    lines
}

pub fn format_limit_popup(popup: &LimitPopup, upgrade_url: &str) -> Vec<String> {
    vec![
        popup.message.to_string(),
        format!(
            "{} ({}: {upgrade_url})",
            popup.follow_up, popup.upgrade_link_text
        ),
    ]
}

/// Whether the generate interaction ended without cards to show.
pub fn panel_failed(panel: &FlashcardPanel) -> bool {
    panel.limit_popup.is_some()
        || matches!(
            panel.result,
            ResultArea::Empty | ResultArea::Error(_) | ResultArea::ConnectionFailed
        )
}

pub fn format_status(user: Option<&User>) -> Vec<String> {
    user.map_or_else(
        || vec!["Not signed in (guest)".to_string()],
        |user| {
            vec![
                format!("Signed in as {} <{}>", user.name, user.email),
                format!("Avatar: {}", summarize_avatar(user.avatar_or_default())),
            ]
        },
    )
}

/// Data URIs are shortened to their media type.
fn summarize_avatar(avatar: &str) -> String {
    avatar
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
        .map_or_else(
            || avatar.to_string(),
            |(mime, _)| format!("uploaded {mime} image"),
        )
}
