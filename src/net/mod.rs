//! Bookmark persistence client
//!
//! Issues the fire-and-forget bookmark toggle request: one POST per
//! toggle, JSON body with the question id, anti-forgery token in a custom
//! header. The response is discarded and failures are swallowed; there is
//! deliberately no retry and no user-visible error surface.

use serde::Serialize;

use crate::{BOOKMARK_PATH, CSRF_HEADER};

/// Request body for the bookmark toggle endpoint
#[derive(Debug, Serialize)]
pub struct BookmarkRequest<'a> {
    pub question_id: &'a str,
}

/// HTTP client for the bookmark endpoint of the quiz server
#[derive(Debug, Clone)]
pub struct BookmarkClient {
    http: reqwest::Client,
    base_url: String,
    csrf_token: String,
}

impl BookmarkClient {
    /// Create a client for `base_url` using `csrf_token` as the
    /// anti-forgery token
    pub fn new(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Full URL of the bookmark endpoint
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), BOOKMARK_PATH)
    }

    /// Send one toggle request for `question_id` and forget it
    ///
    /// The request runs on a spawned task; its outcome is intentionally
    /// dropped. Exactly one request is issued per call.
    pub fn toggle(&self, question_id: &str) {
        let request = self
            .http
            .post(self.endpoint_url())
            .header(CSRF_HEADER, &self.csrf_token)
            .json(&BookmarkRequest { question_id });

        tokio::spawn(async move {
            let _ = request.send().await;
        });
    }
}
