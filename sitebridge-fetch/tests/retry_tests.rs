//! Integration tests for the request executor's retry behavior.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use sitebridge_fetch::{
    ErrorKind, HttpRequest, HttpResponse, RequestExecutor, RetryPolicy, Transport, TransportError,
};

/// Fails the first `failures` calls with the given outcome, then answers 200.
struct FlakyTransport {
    failures: usize,
    failure: fn() -> Result<HttpResponse, TransportError>,
    calls: AtomicUsize,
}

impl FlakyTransport {
    fn new(failures: usize, failure: fn() -> Result<HttpResponse, TransportError>) -> Self {
        Self {
            failures,
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FlakyTransport {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            (self.failure)()
        } else {
            Ok(HttpResponse::json(200, &json!({"post_id": 7, "success": true})))
        }
    }
}

fn executor(transport: Arc<FlakyTransport>) -> RequestExecutor {
    RequestExecutor::new(transport).with_policy(RetryPolicy::default().with_base_delay(Duration::ZERO))
}

fn request() -> HttpRequest {
    HttpRequest::post("https://example.com/wp-json/ma-plateforme/v1/publish").json(json!({"title": "x"}))
}

#[tokio::test]
async fn test_one_retryable_failure_matches_clean_success() {
    let clean = Arc::new(FlakyTransport::new(0, || Ok(HttpResponse::new(500, ""))));
    let flaky_5xx = Arc::new(FlakyTransport::new(1, || Ok(HttpResponse::new(502, "bad gateway"))));
    let flaky_timeout = Arc::new(FlakyTransport::new(1, || Err(TransportError::timeout("deadline"))));

    let expected = executor(clean.clone()).send_json(request()).await.unwrap();
    let after_5xx = executor(flaky_5xx.clone()).send_json(request()).await.unwrap();
    let after_timeout = executor(flaky_timeout.clone()).send_json(request()).await.unwrap();

    assert_eq!(expected, after_5xx);
    assert_eq!(expected, after_timeout);
    assert_eq!(clean.calls(), 1);
    assert_eq!(flaky_5xx.calls(), 2);
    assert_eq!(flaky_timeout.calls(), 2);
}

#[tokio::test]
async fn test_two_failures_exhaust_default_policy() {
    let transport = Arc::new(FlakyTransport::new(2, || Err(TransportError::connect("refused"))));
    let err = executor(transport.clone()).send_json(request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConnectionError);
    assert!(err.message().contains("example.com"));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_larger_policy_outlasts_failures() {
    let transport = Arc::new(FlakyTransport::new(2, || Ok(HttpResponse::new(503, ""))));
    let value = RequestExecutor::new(transport.clone())
        .with_policy(RetryPolicy::new(3).with_base_delay(Duration::ZERO))
        .send_json(request())
        .await
        .unwrap();

    assert_eq!(value["post_id"], 7);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_non_retryable_status_is_immediate() {
    let transport = Arc::new(FlakyTransport::new(1, || Ok(HttpResponse::new(403, "{}"))));
    let err = executor(transport.clone()).send_json(request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AccessForbidden);
    assert_eq!(transport.calls(), 1);
}
