//! Support contact form.

use crate::api::{ContactMessage, StatusOutcome, StudyBuddyClient};
use crate::auth::{FormError, Submission};
use crate::notify::NotificationCenter;
use crate::util::message_or;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactMessage, FormError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct ContactController {
    client: StudyBuddyClient,
    notifications: NotificationCenter,
}

impl ContactController {
    pub fn new(client: StudyBuddyClient, notifications: NotificationCenter) -> Self {
        Self {
            client,
            notifications,
        }
    }

    pub async fn submit(&self, form: &ContactForm) -> Submission {
        let message = match form.validate() {
            Ok(message) => message,
            Err(error) => {
                self.notifications.error(error.to_string());
                return Submission::Rejected;
            }
        };

        match self.client.send_message(&message).await {
            Ok(StatusOutcome::Accepted { .. }) => {
                tracing::info!(from = %message.email, "Support message sent");
                self.notifications.success("Message sent successfully!");
                Submission::Completed
            }
            Ok(StatusOutcome::Rejected { message }) => {
                self.notifications
                    .error(message_or(message.as_deref(), "Failed to send message"));
                Submission::Rejected
            }
            Err(error) => {
                tracing::error!("Support message request failed: {}", error);
                self.notifications
                    .error("Failed to send message. Please try again.");
                Submission::Rejected
            }
        }
    }
}
