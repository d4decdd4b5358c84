//! HTTP client for the study buddy backend.
//!
//! Every endpoint answers with a JSON envelope carrying a `status` string.
//! The body is decoded whatever the HTTP status code is: the backend reports
//! the daily limit with 403 and validation problems with 4xx bodies, and those
//! are ordinary outcomes for the page rather than transport failures.

mod cookies;

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

pub use cookies::{SessionCookies, SESSION_COOKIES_KEY};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Flashcard, User};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::util::compact_text;

const STATUS_OK: &str = "ok";
const STATUS_LIMIT: &str = "limit";

/// Raw response envelope shared by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub questions: Option<Vec<Flashcard>>,
    #[serde(default)]
    pub remaining: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ApiReply {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Result of a flashcard generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated {
        cards: Vec<Flashcard>,
        remaining: Option<i64>,
        limit: Option<i64>,
    },
    LimitReached {
        message: Option<String>,
    },
    Rejected {
        message: Option<String>,
    },
}

impl From<ApiReply> for GenerateOutcome {
    fn from(reply: ApiReply) -> Self {
        match reply.status.as_str() {
            STATUS_OK => Self::Generated {
                cards: reply.questions.unwrap_or_default(),
                remaining: reply.remaining,
                limit: reply.limit,
            },
            STATUS_LIMIT => Self::LimitReached {
                message: reply.message,
            },
            _ => Self::Rejected {
                message: reply.message,
            },
        }
    }
}

/// Result of a login request. An `ok` status without a user is a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn(User),
    Rejected { message: Option<String> },
}

impl From<ApiReply> for LoginOutcome {
    fn from(reply: ApiReply) -> Self {
        match reply.user {
            Some(user) if reply.status == STATUS_OK => Self::SignedIn(user),
            _ => Self::Rejected {
                message: reply.message,
            },
        }
    }
}

/// Result of a signup request. Success never signs the user in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    VerificationSent { message: Option<String> },
    Rejected { message: Option<String> },
}

impl From<ApiReply> for SignupOutcome {
    fn from(reply: ApiReply) -> Self {
        if reply.is_ok() && reply.user.is_some() {
            Self::VerificationSent {
                message: reply.message,
            }
        } else {
            Self::Rejected {
                message: reply.message,
            }
        }
    }
}

/// Result of endpoints that only report success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Accepted { message: Option<String> },
    Rejected { message: Option<String> },
}

impl From<ApiReply> for StatusOutcome {
    fn from(reply: ApiReply) -> Self {
        if reply.is_ok() {
            Self::Accepted {
                message: reply.message,
            }
        } else {
            Self::Rejected {
                message: reply.message,
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of `POST /api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Image URL or `data:` URI
    pub avatar: String,
}

/// Body of `POST /api/update_profile`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Body of `POST /send_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct AccountRef<'a> {
    email: &'a str,
}

/// Client for the flashcard and account endpoints.
///
/// Cookies set by the backend (its login session) go into a
/// [`SessionCookies`] jar. Clones share the jar.
#[derive(Debug, Clone)]
pub struct StudyBuddyClient {
    base_url: String,
    client: Client,
    cookies: Arc<SessionCookies>,
}

impl StudyBuddyClient {
    /// A client whose cookies last as long as the process.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStore::new()))
    }

    /// A client whose cookies are saved in `storage` and reloaded from it.
    pub fn with_storage(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let cookies = Arc::new(SessionCookies::load(storage));
        let client = Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
            cookies,
        })
    }

    /// Forgets the backend session cookie.
    pub fn clear_cookies(&self) {
        self.cookies.clear();
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /generate` with a form-encoded `notes` field.
    pub async fn generate(&self, notes: &str) -> Result<GenerateOutcome> {
        let body = format!("notes={}", urlencoding::encode(notes));
        let request = self
            .client
            .post(self.endpoint("/generate"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        Ok(self.send(request).await?.into())
    }

    /// `POST /api/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let request = self
            .client
            .post(self.endpoint("/api/login"))
            .json(&Credentials { email, password });
        Ok(self.send(request).await?.into())
    }

    /// `POST /api/signup`.
    pub async fn signup(&self, signup: &SignupRequest) -> Result<SignupOutcome> {
        let request = self.client.post(self.endpoint("/api/signup")).json(signup);
        Ok(self.send(request).await?.into())
    }

    /// `POST /api/remove_account`.
    pub async fn remove_account(&self, email: &str) -> Result<StatusOutcome> {
        let request = self
            .client
            .post(self.endpoint("/api/remove_account"))
            .json(&AccountRef { email });
        Ok(self.send(request).await?.into())
    }

    /// `POST /api/update_profile`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<StatusOutcome> {
        let request = self
            .client
            .post(self.endpoint("/api/update_profile"))
            .json(update);
        Ok(self.send(request).await?.into())
    }

    /// `POST /send_message` (support contact form).
    pub async fn send_message(&self, message: &ContactMessage) -> Result<StatusOutcome> {
        let request = self.client.post(self.endpoint("/send_message")).json(message);
        Ok(self.send(request).await?.into())
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiReply> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        tracing::debug!(route = %url, status = status.as_u16(), "Backend responded");

        serde_json::from_str::<ApiReply>(&body).map_err(|error| {
            Error::InvalidResponse(format!(
                "HTTP {} from {}: {} ({})",
                status.as_u16(),
                url,
                error,
                compact_text(&body)
            ))
        })
    }
}
