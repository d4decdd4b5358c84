pub mod account;
pub mod contact;
pub mod generate;

use studybuddy_core::StudyBuddy;

use crate::render::format_toast;

/// Prints the toast left on screen by the last interaction.
pub fn print_toast(app: &StudyBuddy) {
    if let Some(toast) = app.notifications.current() {
        println!("{}", format_toast(&toast));
    }
}
