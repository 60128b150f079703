//! Shared identity context.
//!
//! # Responsibility
//! - Hold the current user's display name for every view in one place.
//! - Notify subscribers synchronously when the name changes.
//!
//! # Invariants
//! - One logical context per running application, owned by the shell and
//!   passed into views as an explicit dependency (no ambient globals).
//! - The context never persists anything; callers that need the name to
//!   survive a restart must also write the `name` preference key.
//! - Using a handle after the owning context is gone is a wiring defect and
//!   fails with `IdentityError::NotInstalled` instead of being masked.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, Weak};

/// Identifier returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Identity context usage errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// A handle outlived its context. Programming-contract violation;
    /// callers propagate this instead of recovering.
    NotInstalled,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInstalled => {
                write!(f, "identity context used outside the scope it was installed in")
            }
        }
    }
}

impl Error for IdentityError {}

type NameCallback = Arc<dyn Fn(&str) + Send + Sync>;

struct IdentityInner {
    display_name: String,
    next_subscription: u64,
    subscribers: BTreeMap<SubscriptionId, NameCallback>,
}

/// Process-wide holder of the current display name.
///
/// Created once by the navigation shell; views receive an `IdentityHandle`.
pub struct IdentityContext {
    inner: Arc<Mutex<IdentityInner>>,
}

impl IdentityContext {
    /// Creates an empty context; hydrated from the preference store on mount.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(IdentityInner {
                display_name: String::new(),
                next_subscription: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Returns a cheap handle for injecting into a view.
    pub fn handle(&self) -> IdentityHandle {
        IdentityHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns the current display name. Empty until hydrated.
    pub fn display_name(&self) -> String {
        lock_poisoned_ok(&self.inner).display_name.clone()
    }

    /// Replaces the display name and notifies every subscriber.
    pub fn set_display_name(&self, name: impl Into<String>) {
        set_and_notify(&self.inner, name.into());
    }

    /// Registers a callback invoked synchronously after every name change.
    pub fn subscribe(&self, callback: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = lock_poisoned_ok(&self.inner);
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.insert(id, Arc::new(callback));
        id
    }

    /// Removes a subscription. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        lock_poisoned_ok(&self.inner).subscribers.remove(&id);
    }
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::new()
    }
}

/// View-side handle onto the shell-owned identity context.
#[derive(Clone)]
pub struct IdentityHandle {
    inner: Weak<Mutex<IdentityInner>>,
}

impl IdentityHandle {
    /// Returns the current display name.
    ///
    /// # Errors
    /// - `NotInstalled` when the owning context has been dropped.
    pub fn display_name(&self) -> Result<String, IdentityError> {
        let inner = self.inner.upgrade().ok_or(IdentityError::NotInstalled)?;
        let name = lock_poisoned_ok(&inner).display_name.clone();
        Ok(name)
    }

    /// Replaces the display name and notifies every subscriber.
    ///
    /// # Errors
    /// - `NotInstalled` when the owning context has been dropped.
    pub fn set_display_name(&self, name: impl Into<String>) -> Result<(), IdentityError> {
        let inner = self.inner.upgrade().ok_or(IdentityError::NotInstalled)?;
        set_and_notify(&inner, name.into());
        Ok(())
    }
}

fn set_and_notify(inner: &Arc<Mutex<IdentityInner>>, name: String) {
    // Callbacks run outside the lock so a subscriber may read the context
    // again without deadlocking.
    let callbacks: Vec<NameCallback> = {
        let mut guard = lock_poisoned_ok(inner);
        guard.display_name = name.clone();
        guard.subscribers.values().cloned().collect()
    };
    for callback in callbacks {
        callback(&name);
    }
}

fn lock_poisoned_ok(inner: &Arc<Mutex<IdentityInner>>) -> std::sync::MutexGuard<'_, IdentityInner> {
    // A poisoned lock only means a subscriber panicked mid-notify; the stored
    // name itself is always a complete String.
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::{IdentityContext, IdentityError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn starts_empty_and_reflects_sets() {
        let context = IdentityContext::new();
        assert_eq!(context.display_name(), "");

        context.set_display_name("Ana");
        assert_eq!(context.display_name(), "Ana");

        let handle = context.handle();
        assert_eq!(handle.display_name().unwrap(), "Ana");
    }

    #[test]
    fn subscribers_run_on_every_set_until_unsubscribed() {
        let context = IdentityContext::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let id = context.subscribe(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        context.set_display_name("one");
        context.set_display_name("two");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        context.unsubscribe(id);
        context.set_display_name("three");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_fails_fast_after_context_drop() {
        let context = IdentityContext::new();
        let handle = context.handle();
        drop(context);

        assert_eq!(
            handle.display_name().unwrap_err(),
            IdentityError::NotInstalled
        );
        assert_eq!(
            handle.set_display_name("late").unwrap_err(),
            IdentityError::NotInstalled
        );
    }
}
