//! Scoped subscriptions to sign-in/sign-out events.
//!
//! The external auth service drives [`AuthNotifier::set_account`]; interested
//! parties hold a [`Subscription`] for as long as they want updates.

use crate::models::AccountRef;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Callback = Arc<dyn Fn(Option<&AccountRef>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    current: Option<AccountRef>,
    callbacks: Vec<(u64, Callback)>,
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("auth registry mutex was poisoned; recovering");
            poisoned.into_inner()
        }
    }
}

/// Broadcasts the signed-in account to subscribers.
#[derive(Clone, Default)]
pub struct AuthNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl AuthNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The account most recently announced, if any.
    pub fn current(&self) -> Option<AccountRef> {
        lock_registry(&self.registry).current.clone()
    }

    /// Register `callback` for future changes.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&AccountRef>) + Send + Sync + 'static,
    {
        let mut registry = lock_registry(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Record a sign-in (`Some`) or sign-out (`None`) and notify subscribers.
    pub fn set_account(&self, account: Option<AccountRef>) {
        let callbacks: Vec<Callback> = {
            let mut registry = lock_registry(&self.registry);
            registry.current = account.clone();
            registry
                .callbacks
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect()
        };
        // Callbacks run outside the lock so they may subscribe or unsubscribe.
        for callback in callbacks {
            callback(account.as_ref());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock_registry(&self.registry).callbacks.len()
    }
}

/// Handle keeping one callback registered.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock_registry(&registry)
                .callbacks
                .retain(|(id, _)| *id != self.id);
        }
    }
}
