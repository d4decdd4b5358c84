//! Shared fixtures for unit tests: a scripted backend and recording dialogs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::view::Dialogs;

/// One scripted endpoint.
#[derive(Debug, Clone)]
pub struct MockRoute {
    path: &'static str,
    status: u16,
    body: String,
    content_type: &'static str,
    set_cookie: Option<&'static str>,
    delay: Duration,
}

impl MockRoute {
    pub fn new(path: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            path,
            status,
            body: body.to_string(),
            content_type: "application/json",
            set_cookie: None,
            delay: Duration::ZERO,
        }
    }

    pub fn ok(path: &'static str, body: serde_json::Value) -> Self {
        Self::new(path, 200, body)
    }

    pub fn raw(path: &'static str, status: u16, body: &str) -> Self {
        Self {
            path,
            status,
            body: body.to_string(),
            content_type: "text/html",
            set_cookie: None,
            delay: Duration::ZERO,
        }
    }

    /// Adds a `Set-Cookie` header to the response.
    pub const fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    /// Holds the response back for `delay` after recording the request.
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
}

/// Local HTTP server answering scripted routes and recording every request.
pub struct MockBackend {
    base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub async fn spawn(routes: Vec<MockRoute>) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let mut router = Router::new();

        for route in routes {
            let recorded = recorded.clone();
            router = router.route(
                route.path,
                post(move |headers: HeaderMap, body: String| {
                    let recorded = recorded.clone();
                    let route = route.clone();
                    async move {
                        let text = |name: header::HeaderName| {
                            headers
                                .get(name)
                                .and_then(|value| value.to_str().ok())
                                .map(ToString::to_string)
                        };
                        recorded.lock().unwrap().push(RecordedRequest {
                            path: route.path.to_string(),
                            body,
                            content_type: text(header::CONTENT_TYPE),
                            cookie: text(header::COOKIE),
                        });
                        if !route.delay.is_zero() {
                            tokio::time::sleep(route.delay).await;
                        }
                        let mut response = Response::builder()
                            .status(StatusCode::from_u16(route.status).unwrap())
                            .header(header::CONTENT_TYPE, route.content_type);
                        if let Some(cookie) = route.set_cookie {
                            response = response.header(header::SET_COOKIE, cookie);
                        }
                        response.body(Body::from(route.body)).unwrap()
                    }
                }),
            );
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}"),
            recorded,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }
}

/// Config pointing at a socket that accepts connections but never answers.
///
/// Requests stay pending for as long as the returned listener is alive.
pub async fn silent_config() -> (ClientConfig, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    (ClientConfig::new(format!("http://{address}")).unwrap(), listener)
}

/// Config pointing at a port nothing listens on.
pub async fn unreachable_config() -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    ClientConfig::new(format!("http://{address}")).unwrap()
}

/// Dialogs that record alerts and answer confirmations with a fixed choice.
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub answer: bool,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            ..Self::default()
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}
