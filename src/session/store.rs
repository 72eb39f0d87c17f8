/// In-memory session store with tick-based expiry
///
/// Every session carries a counter. Accepted requests reset it to 1 and each
/// sweep tick decrements it; a session whose counter is already 0 when a
/// tick arrives is removed. A session therefore survives as long as requests
/// keep arriving within one tick of each other, and expiry is quantized to
/// the tick interval rather than tracked against the wall clock.

use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Counter value given to a session when it is created or touched
const FRESH_TTL: u32 = 1;

/// Live sessions and their expiry counters
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, u32>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new session id and start tracking it
    pub fn create(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), FRESH_TTL);
        info!("Session created: {}", id);
        id
    }

    /// Reset the expiry counter of a known session
    ///
    /// Unknown ids are ignored; callers check `is_valid` first.
    pub fn touch(&mut self, id: &str) {
        if let Some(ttl) = self.sessions.get_mut(id) {
            *ttl = FRESH_TTL;
        }
    }

    /// Whether the session is present and not yet swept
    pub fn is_valid(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Remove a session immediately
    ///
    /// Returns whether the session existed.
    pub fn erase(&mut self, id: &str) -> bool {
        let existed = self.sessions.remove(id).is_some();
        if existed {
            info!("Session terminated: {}", id);
        }
        existed
    }

    /// Advance every session by one tick
    ///
    /// Sessions with a positive counter are decremented, the rest removed.
    pub fn sweep(&mut self) {
        let before = self.sessions.len();
        self.sessions.retain(|id, ttl| {
            if *ttl > 0 {
                *ttl -= 1;
                true
            } else {
                debug!("Session expired: {}", id);
                false
            }
        });

        let expired = before - self.sessions.len();
        if expired > 0 {
            info!("Session sweep removed {} expired session(s)", expired);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
