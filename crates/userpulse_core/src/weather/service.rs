//! Weather view service: validation, threshold icon and resubmission guard.
//!
//! # Responsibility
//! - Validate that a city is selected before any network call.
//! - Classify the fetched temperature into a condition icon.
//! - Key every submission with a monotonically increasing request id and
//!   discard completions that are no longer the latest issued.
//!
//! # Invariants
//! - The stored result always belongs to the last *issued* request, never to
//!   a slower earlier one that resolved later.
//! - Results are transient; nothing here touches the preference store.

use super::cities::CityRecord;
use super::client::{CurrentWeather, WeatherClient, WeatherError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Translation key for the single generic fetch failure message.
pub const FAILURE_MESSAGE_KEY: &str = "weather_fetch_failed";

/// Translation key for the missing-city validation message.
pub const NO_CITY_MESSAGE_KEY: &str = "city_not_selected";

/// Temperatures below this render the cold icon.
const COLD_THRESHOLD_CELSIUS: f64 = 10.0;

/// Condition icon chosen by fixed temperature threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    Cold,
    Warm,
}

impl ConditionIcon {
    pub fn for_temperature(celsius: f64) -> Self {
        if celsius < COLD_THRESHOLD_CELSIUS {
            Self::Cold
        } else {
            Self::Warm
        }
    }
}

/// Rendered result of the most recent successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub icon: ConditionIcon,
}

/// What a completed submission did to the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Latest request succeeded; this report replaced the previous state.
    Updated(WeatherReport),
    /// Latest request failed; the generic failure key replaced the state.
    Failed(&'static str),
    /// A newer request was issued meanwhile; this completion was discarded.
    Stale,
}

/// Validation errors raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherServiceError {
    NoCitySelected,
}

impl Display for WeatherServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCitySelected => write!(f, "no city selected"),
        }
    }
}

impl Error for WeatherServiceError {}

impl WeatherServiceError {
    /// Translation key for the inline validation message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::NoCitySelected => NO_CITY_MESSAGE_KEY,
        }
    }
}

/// Ticket identifying one issued request; completions present it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Weather view service over a `WeatherClient`.
pub struct WeatherService {
    client: WeatherClient,
    latest_issued: AtomicU64,
    last_result: Mutex<Option<Result<WeatherReport, &'static str>>>,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            latest_issued: AtomicU64::new(0),
            last_result: Mutex::new(None),
        }
    }

    /// Validates and performs one lookup synchronously.
    ///
    /// Convenience wrapper over `begin_request`/`complete` for callers that
    /// fetch on the current thread.
    ///
    /// # Errors
    /// - `NoCitySelected` when `city` is `None`; no network call is made.
    pub fn submit(&self, city: Option<&CityRecord>) -> Result<FetchOutcome, WeatherServiceError> {
        let city = city.ok_or(WeatherServiceError::NoCitySelected)?;
        let ticket = self.begin_request();
        let fetched = self.client.fetch_current(city.lat, city.lng);
        Ok(self.complete(ticket, &city.city, fetched))
    }

    /// Issues a new request id; every later completion with an older ticket
    /// is discarded.
    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket(self.latest_issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Records a completed fetch, unless a newer request was issued since.
    pub fn complete(
        &self,
        ticket: RequestTicket,
        city_name: &str,
        fetched: Result<CurrentWeather, WeatherError>,
    ) -> FetchOutcome {
        if ticket.0 != self.latest_issued.load(Ordering::SeqCst) {
            log::debug!(
                "event=weather_complete module=weather status=stale request_id={}",
                ticket.0
            );
            return FetchOutcome::Stale;
        }

        let result = match fetched {
            Ok(current) => Ok(WeatherReport {
                city: city_name.to_string(),
                temperature: current.temperature,
                icon: ConditionIcon::for_temperature(current.temperature),
            }),
            Err(err) => {
                log::warn!(
                    "event=weather_complete module=weather status=error request_id={} error={err}",
                    ticket.0
                );
                Err(FAILURE_MESSAGE_KEY)
            }
        };

        *self.lock_result() = Some(result.clone());
        match result {
            Ok(report) => FetchOutcome::Updated(report),
            Err(key) => FetchOutcome::Failed(key),
        }
    }

    /// The most recent retained outcome: a report, a failure key, or nothing
    /// when no submission has completed yet.
    pub fn last_result(&self) -> Option<Result<WeatherReport, &'static str>> {
        self.lock_result().clone()
    }

    fn lock_result(
        &self,
    ) -> std::sync::MutexGuard<'_, Option<Result<WeatherReport, &'static str>>> {
        match self.last_result.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
