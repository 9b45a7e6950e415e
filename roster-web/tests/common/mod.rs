/// Common test utilities for router tests
///
/// Every test gets a fresh in-memory store and a router built around it, so
/// tests can run in parallel without sharing rows.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use roster_shared::store::{MemoryUserStore, UserStore};
use roster_web::{
    app::{build_router, AppState},
    config::Config,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Fields for the canonical sample user
pub const SAMPLE_USER: [(&str, &str); 5] = [
    ("first_name", "John"),
    ("last_name", "Doe"),
    ("email", "john.doe@example.com"),
    ("age", "25"),
    ("city", "New York"),
];

/// Test context containing the app and direct access to its store
pub struct TestContext {
    pub store: MemoryUserStore,
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryUserStore::new();
        let shared: Arc<dyn UserStore> = Arc::new(store.clone());
        let app = build_router(AppState::new(shared, config));

        Self { store, app }
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        self.post_raw(
            uri,
            Some("application/x-www-form-urlencoded"),
            encode_form(fields),
        )
        .await
    }

    /// POSTs an arbitrary body, with or without a `Content-Type`
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> Response {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body.into()).unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// GETs `uri` and follows one redirect if the response is a 303
    pub async fn get_following(&self, uri: &str) -> Response {
        let response = self.get(uri).await;
        match location(&response) {
            Some(target) if response.status() == StatusCode::SEE_OTHER => self.get(&target).await,
            _ => response,
        }
    }

    /// POSTs a form and follows one redirect if the response is a 303
    pub async fn post_form_following(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let response = self.post_form(uri, fields).await;
        match location(&response) {
            Some(target) if response.status() == StatusCode::SEE_OTHER => self.get(&target).await,
            _ => response,
        }
    }
}

/// Sample user with some fields replaced
pub fn sample_user_with<'a>(overrides: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    SAMPLE_USER
        .iter()
        .map(|&(key, value)| {
            overrides
                .iter()
                .find(|(k, _)| *k == key)
                .copied()
                .unwrap_or((key, value))
        })
        .collect()
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `application/x-www-form-urlencoded` encoding
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}
