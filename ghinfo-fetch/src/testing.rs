//! In-memory transport for unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderValue, LINK};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::HttpError;
use crate::transport::{Transport, TransportResponse};

enum Scripted {
    Respond(TransportResponse),
    Fail,
}

/// Serves canned responses by exact URL. Unknown URLs get a 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    script: HashMap<String, Scripted>,
    requests: Mutex<Vec<String>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, url: &str, response: TransportResponse) -> Self {
        self.script.insert(url.to_string(), Scripted::Respond(response));
        self
    }

    /// Answers `url` with a transport error.
    pub(crate) fn fail(mut self, url: &str) -> Self {
        self.script.insert(url.to_string(), Scripted::Fail);
        self
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Cancels `token` once `count` requests have been answered.
    pub(crate) fn cancel_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of requests observed in flight at once.
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, HttpError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let answered = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(url.to_string());
            requests.len()
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some((count, token)) = &self.cancel_after {
            if answered >= *count {
                token.cancel();
            }
        }

        match self.script.get(url) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail) => Err(HttpError::InvalidUrl(format!("connection reset: {url}"))),
            None => Ok(status(StatusCode::NOT_FOUND)),
        }
    }
}

/// 200 with `body`.
pub(crate) fn ok(body: &str) -> TransportResponse {
    TransportResponse::new(StatusCode::OK, body)
}

/// Empty response with `code`.
pub(crate) fn status(code: StatusCode) -> TransportResponse {
    TransportResponse::new(code, "")
}

/// A listing page of repositories `owner{id}/repo{id}`.
pub(crate) fn page(ids: &[u64], next: Option<&str>) -> TransportResponse {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "owner": { "login": format!("owner{id}") },
                "name": format!("repo{id}"),
            })
        })
        .collect();
    let mut response = ok(&serde_json::Value::Array(items).to_string());
    if let Some(next) = next {
        let link = format!(r#"<{next}>; rel="next""#);
        response
            .headers
            .insert(LINK, HeaderValue::from_str(&link).unwrap());
    }
    response
}

/// A repository body with `stargazers_count`.
pub(crate) fn stars(count: u64) -> TransportResponse {
    ok(&serde_json::json!({ "stargazers_count": count }).to_string())
}

/// A license body. `None` renders `"license": null`.
pub(crate) fn license(name: Option<&str>) -> TransportResponse {
    let license = name.map(|name| serde_json::json!({ "name": name }));
    ok(&serde_json::json!({ "license": license }).to_string())
}
