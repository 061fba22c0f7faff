//! Core library for the `weather` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The narrow HTTP and logging capabilities the lookup depends on
//! - Shared domain models (query, report, lookup errors)
//! - [`WeatherLookup`], the request/parse/log round trip against WeatherAPI.com
//!
//! It is used by `weather-app`, but can also be reused by other binaries or services.

pub mod config;
pub mod http;
pub mod log;
pub mod lookup;
pub mod model;

pub use config::{ApiSettings, Config};
pub use http::{HttpFetcher, ReqwestFetcher, TransportError};
pub use log::{LookupLog, TracingLog};
pub use lookup::WeatherLookup;
pub use model::{DEFAULT_CITY, LookupError, WeatherQuery, WeatherReport, WeatherResult};
