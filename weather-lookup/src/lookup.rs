use std::{sync::Arc, time::Duration};

use crate::{
    config::ApiSettings,
    http::{HttpFetcher, ReqwestFetcher},
    log::{LookupLog, TracingLog},
    model::{LookupError, WeatherReport, WeatherResult},
};

mod response;

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Looks up current weather for a city: one GET, one parse, one log line.
///
/// Cheap to clone; clones share the HTTP client and log sink.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    settings: ApiSettings,
    http: Arc<dyn HttpFetcher>,
    log: Arc<dyn LookupLog>,
}

impl WeatherLookup {
    pub fn new(settings: ApiSettings, http: Arc<dyn HttpFetcher>, log: Arc<dyn LookupLog>) -> Self {
        Self { settings, http, log }
    }

    /// reqwest for HTTP, `tracing` for the log lines.
    pub fn with_defaults(settings: ApiSettings) -> Self {
        Self::new(settings, Arc::new(ReqwestFetcher::new()), Arc::new(TracingLog))
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// `<api_path without trailing '/'>?key=<api_key>&q=<percent-encoded city>`
    pub fn request_url(&self, city: &str) -> String {
        format!(
            "{}?key={}&q={}",
            self.settings.api_path.trim_end_matches('/'),
            self.settings.api_key,
            urlencoding::encode(city)
        )
    }

    /// Raw provider body for `city`. Transport failures are logged at warning level.
    pub async fn fetch(&self, city: &str) -> Result<String, LookupError> {
        let url = self.request_url(city);

        match self.http.get_text(&url, REQUEST_TIMEOUT).await {
            Ok(body) => Ok(body),
            Err(err) => {
                let message = err.to_string();
                self.log.warning(&format!("HTTP request failed: {message}"));
                Err(LookupError::Transport { message })
            }
        }
    }

    pub async fn lookup(&self, city: &str) -> WeatherResult {
        let body = self.fetch(city).await?;

        let report = match parse_report(&body) {
            Ok(report) => report,
            Err(err) => {
                let message = err.to_string();
                self.log.warning(&format!("Malformed weather response: {message}"));
                return Err(LookupError::MalformedResponse { message });
            }
        };

        self.log.info(&summary_line(&report));

        Ok(report)
    }
}

pub fn parse_report(body: &str) -> Result<WeatherReport, serde_json::Error> {
    let parsed: response::WaResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

/// `London: 20.5°C, Sunny`
pub fn summary_line(report: &WeatherReport) -> String {
    format!("{}: {:.1}°C, {}", report.city, report.temperature, report.condition)
}
