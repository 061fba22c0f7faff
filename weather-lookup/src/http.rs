use std::{error::Error as _, fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Any failure below the JSON layer: connect, timeout, redirects, 4xx/5xx, body read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the API key, keep it out of messages and logs.
        let err = err.without_url();

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self(message)
    }
}

/// The single HTTP capability the lookup needs.
#[async_trait]
pub trait HttpFetcher: Send + Sync + Debug {
    /// GET `url` and return the body text of a successful (2xx) response.
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    http: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, TransportError> {
        let res = self.http.get(url).timeout(timeout).send().await?;
        let res = res.error_for_status()?;

        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn returns_body_of_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/v1/current.json", server.uri());
        let body = ReqwestFetcher::new().get_text(&url, TIMEOUT).await.unwrap();

        assert_eq!(body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn client_error_status_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such city"))
            .mount(&server)
            .await;

        let url = format!("{}/v1/current.json?key=SECRET&q=Nowhere", server.uri());
        let err = ReqwestFetcher::new().get_text(&url, TIMEOUT).await.unwrap_err();

        assert!(err.to_string().contains("404"), "unexpected message: {err}");
        assert!(!err.to_string().contains("SECRET"));
    }

    #[tokio::test]
    async fn server_error_status_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = ReqwestFetcher::new().get_text(&server.uri(), TIMEOUT).await.unwrap_err();

        assert!(err.to_string().contains("503"), "unexpected message: {err}");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let result =
            ReqwestFetcher::new().get_text(&server.uri(), Duration::from_millis(100)).await;

        assert!(result.is_err());
    }
}
