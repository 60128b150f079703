//! City weather lookup.
//!
//! # Responsibility
//! - Bundle the read-only city selector data.
//! - Issue the single outbound forecast request and classify its outcome.
//! - Guard rapid resubmission so the last issued request wins.

mod cities;
mod client;
mod service;

pub use cities::{cities, CityRecord};
pub use client::{CurrentWeather, WeatherClient, WeatherError, DEFAULT_BASE_URL};
pub use service::{
    ConditionIcon, FetchOutcome, RequestTicket, WeatherReport, WeatherService,
    WeatherServiceError, FAILURE_MESSAGE_KEY, NO_CITY_MESSAGE_KEY,
};
