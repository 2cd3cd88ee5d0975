use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use medadmin_access::PermissionDirectory;
use medadmin_core::SessionToken;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::metrics;

#[derive(Debug)]
struct Entry {
    directory: Arc<PermissionDirectory>,
    last_seen: Mutex<Instant>,
}

impl Entry {
    fn new() -> Self {
        Self {
            directory: Arc::new(PermissionDirectory::new()),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) -> Arc<PermissionDirectory> {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
        Arc::clone(&self.directory)
    }

    fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }
}

/// Live sessions, keyed by bearer token.
///
/// Each session owns one [`PermissionDirectory`]. Handlers hold an `Arc` to it
/// for the duration of a request, so removing a session also resets its
/// directory: anything still holding it sees the empty set from then on.
/// Every lookup refreshes the session's last-seen time; sessions idle for
/// longer than the configured timeout are dropped by [`Self::spawn_sweeper`].
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionToken, Entry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &SessionToken) -> Option<Arc<PermissionDirectory>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .map(Entry::touch)
    }

    /// The session's directory, creating an unloaded one for a token seen for
    /// the first time. The flag is `true` when the directory was just created.
    pub fn get_or_create(&self, token: &SessionToken) -> (Arc<PermissionDirectory>, bool) {
        if let Some(directory) = self.get(token) {
            return (directory, false);
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(token) {
            Some(entry) => (entry.touch(), false),
            None => {
                let entry = Entry::new();
                let directory = Arc::clone(&entry.directory);
                sessions.insert(token.clone(), entry);
                debug!(sessions = sessions.len(), "Session registered");
                (directory, true)
            }
        }
    }

    /// Starts a fresh session, discarding any directory held for the token.
    pub fn insert(&self, token: &SessionToken) -> Arc<PermissionDirectory> {
        let entry = Entry::new();
        let directory = Arc::clone(&entry.directory);
        let previous = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone(), entry);

        if let Some(previous) = previous {
            previous.directory.reset();
        }
        directory
    }

    pub fn remove(&self, token: &SessionToken) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);

        match removed {
            Some(entry) => {
                entry.directory.reset();
                debug!("Session removed");
                true
            }
            None => false,
        }
    }

    /// Unregisters `token` if it still maps to `directory`, leaving the
    /// directory itself untouched for whoever holds it.
    ///
    /// A session started in the meantime (a login for the same token) is kept.
    pub fn evict(&self, token: &SessionToken, directory: &Arc<PermissionDirectory>) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let current = sessions
            .get(token)
            .is_some_and(|entry| Arc::ptr_eq(&entry.directory, directory));
        if current {
            sessions.remove(token);
            debug!("Session evicted");
        }
        current
    }

    /// Drops every session unused for at least `max_idle`. Returns how many
    /// were dropped.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| {
            let keep = entry.idle_for() < max_idle;
            if !keep {
                entry.directory.reset();
            }
            keep
        });
        before - sessions.len()
    }

    /// Sweeps idle sessions every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: Duration, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let dropped = registry.sweep_idle(max_idle);
                if dropped > 0 {
                    info!(dropped, remaining = registry.len(), "Idle sessions swept");
                    metrics::set_active_sessions(registry.len());
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
