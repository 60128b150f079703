//! Profile/settings view service.
//!
//! # Responsibility
//! - Stage name/language/theme edits without side effects.
//! - On save, persist all three keys, sync the identity context and publish
//!   the new settings snapshot in one pass.
//!
//! # Invariants
//! - Nothing is applied until `save`; staged edits are transient view state.
//! - The three keys are written independently (per-key atomicity only).
//! - After a successful save, the identity context name equals the stored
//!   `name` key.

use crate::identity::{IdentityError, IdentityHandle};
use crate::model::profile::{Language, ThemeMode, UserProfile};
use crate::repo::preference_repo::{keys, PreferenceRepository, RepoError};
use crate::settings::{AppSettings, SettingsBroadcast};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProfileResult<T> = Result<T, ProfileError>;

/// Profile save errors.
#[derive(Debug)]
pub enum ProfileError {
    /// Staged name trims to empty; nothing is persisted or applied.
    EmptyName,
    Repo(RepoError),
    Identity(IdentityError),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "profile name must not be empty"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Identity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Identity(err) => Some(err),
            Self::EmptyName => None,
        }
    }
}

impl From<RepoError> for ProfileError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<IdentityError> for ProfileError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

/// Stages profile edits and applies them on explicit save.
pub struct ProfileService<R: PreferenceRepository> {
    repo: R,
    identity: IdentityHandle,
    settings: SettingsBroadcast,
    staged_name: String,
    staged_language: Language,
    staged_theme: ThemeMode,
}

impl<R: PreferenceRepository> ProfileService<R> {
    /// Seeds staged values from storage; absent keys fall back to defaults.
    pub fn load(
        repo: R,
        identity: IdentityHandle,
        settings: SettingsBroadcast,
    ) -> ProfileResult<Self> {
        let staged_name = repo.get(keys::NAME)?.unwrap_or_default();
        let staged_language = repo
            .get(keys::LANGUAGE)?
            .and_then(|code| Language::parse(&code))
            .unwrap_or_default();
        let staged_theme = repo
            .get(keys::THEME_MODE)?
            .and_then(|code| ThemeMode::parse(&code))
            .unwrap_or_default();

        Ok(Self {
            repo,
            identity,
            settings,
            staged_name,
            staged_language,
            staged_theme,
        })
    }

    pub fn staged_name(&self) -> &str {
        &self.staged_name
    }

    pub fn staged_language(&self) -> Language {
        self.staged_language
    }

    pub fn staged_theme(&self) -> ThemeMode {
        self.staged_theme
    }

    /// The staged values as one profile record.
    pub fn staged_profile(&self) -> UserProfile {
        UserProfile {
            display_name: self.staged_name.clone(),
            language: self.staged_language,
            theme_mode: self.staged_theme,
        }
    }

    /// Replaces the staged name. No side effects until `save`.
    pub fn stage_name(&mut self, name: impl Into<String>) {
        self.staged_name = name.into();
    }

    /// Replaces the staged language. No side effects until `save`.
    pub fn stage_language(&mut self, language: Language) {
        self.staged_language = language;
    }

    /// Replaces the staged theme. No side effects until `save`.
    pub fn stage_theme(&mut self, theme: ThemeMode) {
        self.staged_theme = theme;
    }

    /// Persists all three keys, syncs the identity context and publishes the
    /// new settings snapshot.
    ///
    /// Returns the applied snapshot so the caller can render immediately.
    ///
    /// # Errors
    /// - `EmptyName` when the staged name trims to empty (nothing written).
    pub fn save(&mut self) -> ProfileResult<AppSettings> {
        if self.staged_name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }

        self.repo.set(keys::NAME, &self.staged_name)?;
        self.repo.set(keys::LANGUAGE, self.staged_language.code())?;
        self.repo.set(keys::THEME_MODE, self.staged_theme.code())?;

        self.identity.set_display_name(self.staged_name.clone())?;
        let applied = self
            .settings
            .apply(AppSettings::new(self.staged_language, self.staged_theme));

        info!(
            "event=profile_save module=profile status=ok language={} theme={}",
            applied.language.code(),
            applied.theme_mode.code()
        );
        Ok(applied)
    }
}
