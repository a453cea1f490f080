//! Scripted in-memory transport for tests.
//!
//! Replies are registered per `(method, path suffix)` route and handed out in
//! order. The last reply on a route is sticky so a poll loop can keep reading
//! the same state. Every request is recorded, including unmatched ones.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use http::{Method, StatusCode};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::http::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

#[derive(Debug, Clone)]
pub enum MockReply {
    Respond { status: StatusCode, body: Vec<u8> },
    Timeout,
    ConnectionRefused,
}

impl MockReply {
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        MockReply::Respond {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        MockReply::Respond {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        MockReply::Respond {
            status,
            body: Vec::new(),
        }
    }

    /// The API's structured error envelope.
    pub fn api_error(status: StatusCode, code: &str, message: &str) -> Self {
        Self::json(
            status,
            &serde_json::json!({ "errorCode": code, "errorMsg": message }),
        )
    }

    fn into_result(self, url: &str) -> Result<HttpResponse, TransportError> {
        match self {
            MockReply::Respond { status, body } => Ok(HttpResponse { status, body }),
            MockReply::Timeout => Err(TransportError::Timeout {
                url: url.to_string(),
            }),
            MockReply::ConnectionRefused => Err(TransportError::Connect {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
}

impl Route {
    fn matches(&self, request: &HttpRequest) -> bool {
        let path = request.url.split('?').next().unwrap_or_default();
        self.method == request.method && path.ends_with(&self.path)
    }

    fn next_reply(&mut self) -> Option<MockReply> {
        if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().cloned()
        }
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicU64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` for requests with `method` whose path ends with `path`.
    pub fn on(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes
            .iter_mut()
            .find(|route| route.method == method && route.path == path)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
        self
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Number of recorded calls matching `method` and path suffix.
    pub fn calls_to(&self, method: &Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| {
                let url = request.url.split('?').next().unwrap_or_default();
                request.method == *method && url.ends_with(path)
            })
            .count()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let reply = {
            let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
            routes
                .iter_mut()
                .find(|route| route.matches(&request))
                .and_then(Route::next_reply)
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            matched = reply.is_some(),
            "[MOCK] request"
        );

        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        match reply {
            Some(reply) => reply.into_result(&url),
            None => Err(TransportError::Request {
                url,
                message: "no mock reply registered".to_string(),
            }),
        }
    }
}

/// An unsigned token with the given claims, shaped like the auth service's.
pub fn unsigned_token(claims: &serde_json::Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_replies_in_order_and_last_one_sticks() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/items/1", MockReply::text(StatusCode::OK, "a"))
            .on(Method::GET, "/items/1", MockReply::text(StatusCode::OK, "b"));

        let bodies: Vec<Vec<u8>> = [
            mock.send(get("http://h/items/1")).await.unwrap(),
            mock.send(get("http://h/items/1?x=1")).await.unwrap(),
            mock.send(get("http://h/items/1")).await.unwrap(),
        ]
        .into_iter()
        .map(|r| r.body)
        .collect();

        assert_eq!(bodies, vec![b"a".to_vec(), b"b".to_vec(), b"b".to_vec()]);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unmatched_request_is_a_transport_error() {
        let mock = MockTransport::new();
        let err = mock.send(get("http://h/nothing")).await.unwrap_err();

        assert!(matches!(err, TransportError::Request { .. }));
        assert_eq!(mock.requests().len(), 1);
    }
}
