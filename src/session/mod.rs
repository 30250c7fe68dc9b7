//! Shared-password session with inactivity timeout.
//!
//! Session state lives in an injected [`SessionStore`] and time comes from an
//! injected [`Clock`], so nothing here touches global state.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::config::Config;
use crate::time::Clock;

pub const SESSION_KEY: &str = "cashflow_session";
pub const ACTIVITY_KEY: &str = "cashflow_last_activity";
pub const DEFAULT_TIMEOUT_MINUTES: i64 = 30;

const AUTHENTICATED: &str = "authenticated";

/// True once more than `timeout` has elapsed since `last_activity`.
pub fn is_expired(last_activity: DateTime<Utc>, now: DateTime<Utc>, timeout: Duration) -> bool {
    now - last_activity > timeout
}

/// Key/value persistence for session markers.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

pub struct Session<C: Clock, S: SessionStore> {
    clock: C,
    store: S,
    timeout: Duration,
}

impl<C: Clock, S: SessionStore> Session<C, S> {
    pub fn new(clock: C, store: S) -> Self {
        Self::with_timeout(clock, store, Duration::minutes(DEFAULT_TIMEOUT_MINUTES))
    }

    /// Session whose inactivity timeout comes from `config`.
    pub fn from_config(clock: C, store: S, config: &Config) -> Self {
        Self::with_timeout(clock, store, config.session_timeout())
    }

    pub fn with_timeout(clock: C, store: S, timeout: Duration) -> Self {
        Self {
            clock,
            store,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.store
            .get(ACTIVITY_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }

    /// Whether a live, unexpired session is stored.
    pub fn is_authenticated(&self) -> bool {
        if self.store.get(SESSION_KEY).is_none() {
            return false;
        }
        match self.last_activity() {
            Some(last) => !is_expired(last, self.clock.now(), self.timeout),
            None => false,
        }
    }

    /// Validates the stored session, clearing it when expired.
    pub fn check(&mut self) -> bool {
        let active = self.is_authenticated();
        if !active {
            self.clear();
        }
        active
    }

    /// Starts a session when `password` matches `expected`. With no expected
    /// password configured every login succeeds.
    pub fn login(&mut self, password: &str, expected: Option<&str>) -> bool {
        match expected {
            None => {
                tracing::warn!("no application password configured; accepting login");
            }
            Some(expected) if expected == password => {}
            Some(_) => {
                tracing::info!("login rejected");
                return false;
            }
        }
        self.store.set(SESSION_KEY, AUTHENTICATED.to_string());
        self.record_activity();
        true
    }

    /// Refreshes the activity marker of an authenticated session.
    pub fn touch(&mut self) {
        if self.store.get(SESSION_KEY).is_some() {
            self.record_activity();
        }
    }

    pub fn logout(&mut self) {
        self.clear();
    }

    fn record_activity(&mut self) {
        let now = self.clock.now().timestamp_millis();
        self.store.set(ACTIVITY_KEY, now.to_string());
    }

    fn clear(&mut self) {
        self.store.remove(SESSION_KEY);
        self.store.remove(ACTIVITY_KEY);
    }
}
