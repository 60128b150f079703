//! Blocking HTTP client for the public forecast endpoint.
//!
//! # Responsibility
//! - Issue one GET per lookup with coordinates as query parameters.
//! - Map transport failures, non-success statuses and malformed bodies to
//!   one error type.
//!
//! # Invariants
//! - No retry, no authentication; timeout is the transport default.
//! - The base URL is injectable so tests can target a local mock server.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Production forecast endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

pub type WeatherResult<T> = Result<T, WeatherError>;

/// Forecast request errors. All of them surface to the user as the same
/// generic failure message; the distinction exists for logging only.
#[derive(Debug)]
pub enum WeatherError {
    Request(reqwest::Error),
    Status(u16),
    UnexpectedBody(String),
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "{err}"),
            Self::Status(code) => write!(f, "forecast endpoint returned status {code}"),
            Self::UnexpectedBody(message) => {
                write!(f, "forecast response body was not recognized: {message}")
            }
        }
    }
}

impl Error for WeatherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value)
    }
}

/// Successful lookup payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

#[derive(Deserialize)]
struct ForecastBody {
    current_weather: CurrentWeatherBody,
}

#[derive(Deserialize)]
struct CurrentWeatherBody {
    temperature: f64,
}

/// Thin blocking client over the forecast endpoint.
pub struct WeatherClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl WeatherClient {
    /// Creates a client against the production endpoint.
    pub fn new() -> WeatherResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a caller-provided base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> WeatherResult<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetches the current weather for one coordinate pair.
    ///
    /// # Errors
    /// - `Request` on transport failure.
    /// - `Status` on any non-success status.
    /// - `UnexpectedBody` when `current_weather.temperature` is missing.
    pub fn fetch_current(&self, lat: f64, lng: f64) -> WeatherResult<CurrentWeather> {
        let started_at = Instant::now();
        let url = format!(
            "{}/v1/forecast?latitude={lat}&longitude={lng}&current_weather=true",
            self.base_url.trim_end_matches('/')
        );

        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            log::warn!(
                "event=weather_fetch module=weather status=error duration_ms={} error_code=http_status http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: ForecastBody = response
            .json()
            .map_err(|err| WeatherError::UnexpectedBody(err.to_string()))?;

        log::info!(
            "event=weather_fetch module=weather status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(CurrentWeather {
            temperature: body.current_weather.temperature,
        })
    }
}
