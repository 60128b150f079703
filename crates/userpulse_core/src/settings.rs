//! Presentation settings value and change broadcast.
//!
//! # Responsibility
//! - Represent the process-wide language/theme selection as an immutable
//!   value.
//! - Fan new snapshots out to presentation-layer subscribers; the core never
//!   mutates global flags itself.
//!
//! # Invariants
//! - `apply` replaces the whole snapshot; subscribers always observe a
//!   complete `AppSettings`, never one changed field at a time.

use crate::model::profile::{Language, TextDirection, ThemeMode};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Immutable process-wide presentation settings snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub language: Language,
    pub theme_mode: ThemeMode,
}

impl AppSettings {
    pub fn new(language: Language, theme_mode: ThemeMode) -> Self {
        Self {
            language,
            theme_mode,
        }
    }

    /// Direction the presentation layer must apply at document level.
    pub fn text_direction(&self) -> TextDirection {
        self.language.text_direction()
    }
}

/// Identifier returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SettingsSubscriptionId(u64);

type SettingsCallback = Arc<dyn Fn(AppSettings) + Send + Sync>;

struct BroadcastInner {
    current: AppSettings,
    next_subscription: u64,
    subscribers: BTreeMap<SettingsSubscriptionId, SettingsCallback>,
}

/// Publishes settings snapshots to the presentation layer.
///
/// Owned by the shell; views apply settings through it instead of touching
/// document direction or theme flags directly.
#[derive(Clone)]
pub struct SettingsBroadcast {
    inner: Arc<Mutex<BroadcastInner>>,
}

impl SettingsBroadcast {
    /// Creates a broadcast seeded with default settings (`en`, `light`).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcastInner {
                current: AppSettings::default(),
                next_subscription: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Returns the latest applied snapshot.
    pub fn current(&self) -> AppSettings {
        self.lock().current
    }

    /// Applies a new snapshot and notifies every subscriber with it.
    ///
    /// Returns the applied value for caller convenience.
    pub fn apply(&self, settings: AppSettings) -> AppSettings {
        let callbacks: Vec<SettingsCallback> = {
            let mut guard = self.lock();
            guard.current = settings;
            guard.subscribers.values().cloned().collect()
        };
        for callback in callbacks {
            callback(settings);
        }
        settings
    }

    /// Registers a callback invoked synchronously after every `apply`.
    pub fn subscribe(
        &self,
        callback: impl Fn(AppSettings) + Send + Sync + 'static,
    ) -> SettingsSubscriptionId {
        let mut guard = self.lock();
        let id = SettingsSubscriptionId(guard.next_subscription);
        guard.next_subscription += 1;
        guard.subscribers.insert(id, Arc::new(callback));
        id
    }

    /// Removes a subscription. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SettingsSubscriptionId) {
        self.lock().subscribers.remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BroadcastInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for SettingsBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
