//! HTTP front end: `/weather/{city}` renders the lookup result as an HTML page.

use std::net::SocketAddr;

use anyhow::Context;
use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{error, info};
use weather_lookup::{WeatherLookup, WeatherQuery, WeatherReport, WeatherResult};

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherPage<'a> {
    city: &'a str,
    report: Option<&'a WeatherReport>,
    error: Option<&'a str>,
}

impl<'a> WeatherPage<'a> {
    fn new(city: &'a str, result: &'a WeatherResult) -> Self {
        match result {
            Ok(report) => Self { city, report: Some(report), error: None },
            Err(err) => Self { city, report: None, error: Some(err.message()) },
        }
    }
}

pub fn router(lookup: WeatherLookup) -> Router {
    Router::new()
        .route("/weather", get(default_city_weather))
        .route("/weather/{city}", get(city_weather))
        .with_state(lookup)
}

pub async fn serve(lookup: WeatherLookup, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {bind}"))?;

    info!("serving weather pages on http://{}/weather", listener.local_addr()?);

    axum::serve(listener, router(lookup)).await.context("HTTP server failed")
}

async fn default_city_weather(State(lookup): State<WeatherLookup>) -> Response {
    render_weather(&lookup, WeatherQuery::default()).await
}

async fn city_weather(
    State(lookup): State<WeatherLookup>,
    Path(city): Path<String>,
) -> Response {
    render_weather(&lookup, WeatherQuery::new(city)).await
}

async fn render_weather(lookup: &WeatherLookup, query: WeatherQuery) -> Response {
    let result = lookup.lookup(&query.city).await;

    match WeatherPage::new(&query.city, &result).render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("Failed to render weather page for {}: {err}", query.city);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render weather page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };
    use tower::ServiceExt;
    use weather_lookup::{ApiSettings, HttpFetcher, LookupLog, TransportError};

    const LONDON_BODY: &str = r#"{
        "location": {"name": "London", "country": "UK"},
        "current": {
            "temp_c": 20.5,
            "condition": {"text": "Sunny"},
            "humidity": 60,
            "wind_kph": 10,
            "last_updated": "2025-05-21 12:00"
        }
    }"#;

    #[derive(Debug)]
    struct FakeFetcher {
        reply: Result<String, TransportError>,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpFetcher for FakeFetcher {
        async fn get_text(&self, url: &str, _timeout: Duration) -> Result<String, TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.reply.clone()
        }
    }

    #[derive(Debug)]
    struct SilentLog;

    impl LookupLog for SilentLog {
        fn info(&self, _message: &str) {}
        fn warning(&self, _message: &str) {}
    }

    fn app(reply: Result<String, TransportError>) -> (Router, Arc<FakeFetcher>) {
        let http = Arc::new(FakeFetcher { reply, urls: Mutex::new(Vec::new()) });
        let lookup = WeatherLookup::new(
            ApiSettings::new("KEY", "https://api.test/v1/current.json"),
            http.clone(),
            Arc::new(SilentLog),
        );
        (router(lookup), http)
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn renders_report_for_named_city() {
        let (app, http) = app(Ok(LONDON_BODY.to_string()));

        let (status, html) = get_page(app, "/weather/London").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Weather in London"));
        assert!(html.contains("London, UK"));
        assert!(html.contains("20.5 &deg;C"));
        assert!(html.contains("Sunny"));
        assert!(html.contains("60%"));
        assert!(html.contains("2025-05-21 12:00"));
        assert!(!html.contains("class=\"error\""));
        assert_eq!(
            http.urls.lock().unwrap().as_slice(),
            ["https://api.test/v1/current.json?key=KEY&q=London"]
        );
    }

    #[tokio::test]
    async fn bare_route_defaults_to_london() {
        let (app, http) = app(Ok(LONDON_BODY.to_string()));

        let (status, _html) = get_page(app, "/weather").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            http.urls.lock().unwrap().as_slice(),
            ["https://api.test/v1/current.json?key=KEY&q=London"]
        );
    }

    #[tokio::test]
    async fn path_segment_is_decoded_then_reencoded() {
        let (app, http) = app(Ok(LONDON_BODY.to_string()));

        get_page(app, "/weather/S%C3%A3o%20Paulo").await;

        assert_eq!(
            http.urls.lock().unwrap().as_slice(),
            ["https://api.test/v1/current.json?key=KEY&q=S%C3%A3o%20Paulo"]
        );
    }

    #[tokio::test]
    async fn transport_failure_renders_error_message() {
        let (app, _http) = app(Err(TransportError::new("Connection timed out")));

        let (status, html) = get_page(app, "/weather/Paris").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Weather in Paris"));
        assert!(html.contains("Could not load weather data: Connection timed out"));
        assert!(!html.contains("class=\"report\""));
    }

    #[tokio::test]
    async fn city_is_html_escaped() {
        let (app, _http) = app(Err(TransportError::new("boom")));

        let (_status, html) = get_page(app, "/weather/%3Cscript%3E").await;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
