//! Navigation shell: first-run gate, route resolution and menu state.
//!
//! # Responsibility
//! - Decide between first-run and normal operation from stored state.
//! - Own transient navigation state (menu open/closed, current route).
//! - Hydrate the identity context and apply stored presentation settings on
//!   mount.
//!
//! # Invariants
//! - `FirstRun -> Normal` fires only on submission of a non-empty name and is
//!   terminal for the session.
//! - Route changes and menu toggles never alter the phase.
//! - After a successful first-run submit, the identity context name equals
//!   the stored `name` key.

use crate::identity::{IdentityContext, IdentityError, IdentityHandle};
use crate::model::profile::{Language, ThemeMode};
use crate::repo::preference_repo::{keys, PreferenceRepository, RepoError};
use crate::settings::{AppSettings, SettingsBroadcast};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod error_view;

/// Addressable views behind the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Todos,
    Weather,
    Profile,
}

impl Route {
    /// Returns the path the presentation layer links to.
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Todos => "/todos",
            Self::Weather => "/weather",
            Self::Profile => "/profile",
        }
    }

    /// Translation key for this route's menu label.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Todos => "todos",
            Self::Weather => "weather",
            Self::Profile => "profile",
        }
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRoute {
    /// The bare shell at `/`, no view selected yet.
    Shell,
    View(Route),
    /// Unmatched path; the presentation layer renders the error view.
    NotFound,
}

/// Resolves a path against the fixed routing table.
pub fn resolve_route(path: &str) -> ResolvedRoute {
    match path {
        "/" => ResolvedRoute::Shell,
        "/dashboard" => ResolvedRoute::View(Route::Dashboard),
        "/todos" => ResolvedRoute::View(Route::Todos),
        "/weather" => ResolvedRoute::View(Route::Weather),
        "/profile" => ResolvedRoute::View(Route::Profile),
        _ => ResolvedRoute::NotFound,
    }
}

/// One side-menu entry for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub route: Route,
    pub message_key: &'static str,
}

/// Menu entries in display order.
pub fn menu_entries() -> [MenuEntry; 4] {
    [
        Route::Dashboard,
        Route::Todos,
        Route::Weather,
        Route::Profile,
    ]
    .map(|route| MenuEntry {
        route,
        message_key: route.message_key(),
    })
}

/// Session phase of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPhase {
    /// No name has ever been stored; all views are gated behind name capture.
    FirstRun,
    /// A name exists. Terminal for the session.
    Normal,
}

/// Shell state machine errors.
#[derive(Debug)]
pub enum ShellError {
    /// Submitted first-run name is empty after trimming.
    EmptyName,
    /// First-run submit attempted while already in `Normal`.
    NotFirstRun,
    Repo(RepoError),
    Identity(IdentityError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "first-run name must not be empty"),
            Self::NotFirstRun => write!(f, "shell is not in first-run phase"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Identity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Identity(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<IdentityError> for ShellError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

/// Composes the persistent side menu and first-run gate around the views.
pub struct NavigationShell<R: PreferenceRepository> {
    repo: R,
    identity: IdentityContext,
    settings: SettingsBroadcast,
    phase: ShellPhase,
    is_menu_open: bool,
    current_route: ResolvedRoute,
}

impl<R: PreferenceRepository> NavigationShell<R> {
    /// Mounts the shell: decides the phase and applies stored presentation
    /// settings process-wide.
    ///
    /// # Side effects
    /// - Hydrates the identity context from the stored `name` key.
    /// - Publishes stored language/theme through the settings broadcast.
    pub fn mount(repo: R, settings: SettingsBroadcast) -> Result<Self, ShellError> {
        let identity = IdentityContext::new();

        let stored_name = repo.get(keys::NAME)?;
        let phase = match &stored_name {
            Some(name) => {
                identity.set_display_name(name.clone());
                ShellPhase::Normal
            }
            None => ShellPhase::FirstRun,
        };

        let language = match repo.get(keys::LANGUAGE)? {
            Some(code) => Language::parse(&code).unwrap_or_else(|| {
                debug!("event=shell_mount module=shell status=fallback key=language value={code}");
                Language::default()
            }),
            None => Language::default(),
        };
        let theme_mode = match repo.get(keys::THEME_MODE)? {
            Some(code) => ThemeMode::parse(&code).unwrap_or_else(|| {
                debug!("event=shell_mount module=shell status=fallback key=themeMode value={code}");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };
        settings.apply(AppSettings::new(language, theme_mode));

        info!(
            "event=shell_mount module=shell status=ok phase={:?} language={} theme={}",
            phase,
            language.code(),
            theme_mode.code()
        );

        Ok(Self {
            repo,
            identity,
            settings,
            phase,
            // The side menu starts open.
            is_menu_open: true,
            current_route: ResolvedRoute::Shell,
        })
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub fn is_menu_open(&self) -> bool {
        self.is_menu_open
    }

    pub fn current_route(&self) -> ResolvedRoute {
        self.current_route
    }

    /// Handle for injecting the identity context into views.
    pub fn identity(&self) -> IdentityHandle {
        self.identity.handle()
    }

    /// Settings broadcast shared with views and the presentation layer.
    pub fn settings(&self) -> &SettingsBroadcast {
        &self.settings
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Flips the side menu. Orthogonal to the phase.
    pub fn toggle_menu(&mut self) {
        self.is_menu_open = !self.is_menu_open;
    }

    /// Updates the current route. Never changes the phase.
    pub fn navigate(&mut self, path: &str) -> ResolvedRoute {
        self.current_route = resolve_route(path);
        self.current_route
    }

    /// The only transition out of `FirstRun`.
    ///
    /// Persists the name, updates the identity context and navigates to the
    /// dashboard. `Normal` is terminal; calling this again is a state error.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to empty (state unchanged).
    /// - `NotFirstRun` when the shell already left first run.
    pub fn submit_first_run_name(&mut self, name: &str) -> Result<(), ShellError> {
        if self.phase != ShellPhase::FirstRun {
            return Err(ShellError::NotFirstRun);
        }
        if name.trim().is_empty() {
            return Err(ShellError::EmptyName);
        }

        self.repo.set(keys::NAME, name)?;
        self.identity.set_display_name(name);
        self.phase = ShellPhase::Normal;
        self.current_route = ResolvedRoute::View(Route::Dashboard);

        info!("event=first_run_submit module=shell status=ok");
        Ok(())
    }
}
