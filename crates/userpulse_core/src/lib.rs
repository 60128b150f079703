//! Core domain logic for User Pulse.
//! This crate is the single source of truth for shell, preference and view
//! behavior; presentation layers stay thin bindings over it.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod settings;
pub mod shell;
pub mod weather;

pub use identity::{IdentityContext, IdentityError, IdentityHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::profile::{Language, TextDirection, ThemeMode, UserProfile};
pub use repo::preference_repo::{
    keys, PreferenceRepository, RepoError, RepoResult, SqlitePreferenceRepository,
};
pub use service::dashboard::{format_clock, greeting, greeting_at_hour, Greeting, GreetingBucket};
pub use service::profile_service::{ProfileError, ProfileService};
pub use service::todo_service::{EditState, TodoError, TodoService};
pub use settings::{AppSettings, SettingsBroadcast};
pub use shell::{
    menu_entries, resolve_route, NavigationShell, ResolvedRoute, Route, ShellError, ShellPhase,
};
pub use weather::{
    cities, CityRecord, ConditionIcon, FetchOutcome, WeatherClient, WeatherService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
