//! Backend cookies kept in the key-value store.
//!
//! The backend is a single origin, so cookies are tracked by name only and
//! sent back on every request. Domain, path and expiry attributes are not
//! interpreted, except that `Max-Age=0` (or a negative value) deletes the
//! cookie.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::storage::KeyValueStore;

/// Storage key holding the cookie jar as a JSON object of name to value.
pub const SESSION_COOKIES_KEY: &str = "sessionCookies";

type Jar = BTreeMap<String, String>;

/// Write-through cookie jar for [`StudyBuddyClient`](super::StudyBuddyClient).
pub struct SessionCookies {
    storage: Arc<dyn KeyValueStore>,
    jar: Mutex<Jar>,
}

impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SessionCookies")
            .field("names", &self.lock().keys().cloned().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SessionCookies {
    /// Loads saved cookies. Unreadable or malformed entries start an empty jar.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let jar = match storage.get_item(SESSION_COOKIES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::warn!("Ignoring malformed saved cookies: {}", error);
                Jar::new()
            }),
            Ok(None) => Jar::new(),
            Err(error) => {
                tracing::warn!("Failed to read saved cookies: {}", error);
                Jar::new()
            }
        };

        Self {
            storage,
            jar: Mutex::new(jar),
        }
    }

    /// Names of the cookies currently held.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Drops every cookie, in memory and in storage.
    pub fn clear(&self) {
        self.lock().clear();
        if let Err(error) = self.storage.remove_item(SESSION_COOKIES_KEY) {
            tracing::warn!("Failed to remove saved cookies: {}", error);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Jar> {
        self.jar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist(&self, jar: &Jar) {
        let result = if jar.is_empty() {
            self.storage.remove_item(SESSION_COOKIES_KEY)
        } else {
            serde_json::to_string(jar)
                .map_err(Into::into)
                .and_then(|raw| self.storage.set_item(SESSION_COOKIES_KEY, &raw))
        };
        if let Err(error) = result {
            tracing::warn!("Failed to save cookies: {}", error);
        }
    }
}

/// Splits a `Set-Cookie` value into its name and value. `None` for a
/// malformed header. The value is `None` when the cookie is being deleted.
fn parse_set_cookie(header: &str) -> Option<(String, Option<String>)> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let expired = parts.any(|attribute| {
        attribute
            .split_once('=')
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case("max-age"))
            .and_then(|(_, seconds)| seconds.trim().parse::<i64>().ok())
            .is_some_and(|seconds| seconds <= 0)
    });
    let value = value.trim().trim_matches('"');
    Some((name.to_string(), (!expired).then(|| value.to_string())))
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, _url: &Url) {
        let mut jar = self.lock();
        let mut changed = false;
        for header in cookie_headers {
            let Some((name, value)) = header.to_str().ok().and_then(parse_set_cookie) else {
                continue;
            };
            changed |= match value {
                Some(value) => jar.insert(name, value.clone()).as_ref() != Some(&value),
                None => jar.remove(&name).is_some(),
            };
        }
        if changed {
            tracing::debug!(count = jar.len(), "Backend cookies updated");
            self.persist(&jar);
        }
    }

    fn cookies(&self, _url: &Url) -> Option<HeaderValue> {
        let jar = self.lock();
        if jar.is_empty() {
            return None;
        }
        let header = jar
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&header).ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::MemoryStore;

    fn url() -> Url {
        Url::parse("http://127.0.0.1:5000/api/login").unwrap()
    }

    fn receive(cookies: &SessionCookies, headers: &[&'static str]) {
        let values: Vec<HeaderValue> = headers
            .iter()
            .copied()
            .map(HeaderValue::from_static)
            .collect();
        cookies.set_cookies(&mut values.iter(), &url());
    }

    #[test]
    fn set_cookie_attributes_are_dropped() {
        assert_eq!(
            parse_set_cookie("session=abc.def; HttpOnly; Path=/"),
            Some(("session".to_string(), Some("abc.def".to_string())))
        );
        assert_eq!(
            parse_set_cookie("session=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/"),
            Some(("session".to_string(), None))
        );
        assert_eq!(parse_set_cookie("no-equals-sign"), None);
        assert_eq!(parse_set_cookie("=orphan"), None);
    }

    #[test]
    fn received_cookies_are_saved_and_reloaded() {
        let storage = Arc::new(MemoryStore::new());
        let cookies = SessionCookies::load(storage.clone());
        receive(&cookies, &["session=abc; HttpOnly; Path=/", "theme=dark"]);

        let reloaded = SessionCookies::load(storage);
        assert_eq!(
            reloaded.cookies(&url()),
            Some(HeaderValue::from_static("session=abc; theme=dark"))
        );
    }

    #[test]
    fn expired_cookie_is_removed_from_storage() {
        let storage = Arc::new(MemoryStore::new());
        let cookies = SessionCookies::load(storage.clone());
        receive(&cookies, &["session=abc"]);
        receive(&cookies, &["session=; Max-Age=0"]);

        assert_eq!(cookies.cookies(&url()), None);
        assert_eq!(storage.get_item(SESSION_COOKIES_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_saved_cookies_start_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_item(SESSION_COOKIES_KEY, "not json").unwrap();

        let cookies = SessionCookies::load(storage);
        assert!(cookies.names().is_empty());
        assert_eq!(cookies.cookies(&url()), None);
    }

    #[test]
    fn clear_forgets_saved_cookies() {
        let storage = Arc::new(MemoryStore::new());
        let cookies = SessionCookies::load(storage.clone());
        receive(&cookies, &["session=abc"]);

        cookies.clear();

        assert!(cookies.names().is_empty());
        assert_eq!(storage.get_item(SESSION_COOKIES_KEY).unwrap(), None);
    }
}
