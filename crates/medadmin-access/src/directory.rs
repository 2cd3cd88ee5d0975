//! The permission directory of one console session.
//!
//! A directory starts [`LoadStatus::Pending`] and empty. [`PermissionDirectory::load`]
//! fetches the flat permission list and replaces the held set; a failed fetch
//! leaves it [`LoadStatus::Failed`] and empty. Membership checks never block on a
//! load and answer `false` for anything not (yet) granted.
//!
//! ```text
//! Pending ──load──▶ Loading ──ok──▶ Ready ──load──▶ Loading ──▶ Ready | Failed
//!                           └─err─▶ Failed
//! ```

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use medadmin_core::Permission;
use serde::Serialize;
use tracing::{debug, warn};

/// Where a directory is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Created; no load has started.
    Pending,
    /// A load is in flight. The previous set (if any) is still served.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; the set is empty.
    Failed,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Pending => "pending",
            LoadStatus::Loading => "loading",
            LoadStatus::Ready => "ready",
            LoadStatus::Failed => "failed",
        }
    }

    /// `true` once a load has finished either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadStatus::Ready | LoadStatus::Failed)
    }
}

#[derive(Debug)]
struct DirectoryState {
    status: LoadStatus,
    granted: Arc<HashSet<Permission>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Pending,
            granted: Arc::new(HashSet::new()),
            loaded_at: None,
        }
    }
}

/// Point-in-time copy of a directory, with permissions sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySnapshot {
    pub status: LoadStatus,
    pub permissions: Vec<Permission>,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct PermissionDirectory {
    state: RwLock<DirectoryState>,
}

impl PermissionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory that is already [`LoadStatus::Ready`] with the given names.
    pub fn with_permissions<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let directory = Self::new();
        directory.replace(names);
        directory
    }

    /// Exact membership test.
    pub fn has(&self, permission: Permission) -> bool {
        self.read().granted.contains(&permission)
    }

    /// Membership test by wire name. Names that do not parse are never granted.
    pub fn has_name(&self, name: &str) -> bool {
        name.parse::<Permission>()
            .map(|permission| self.has(permission))
            .unwrap_or(false)
    }

    pub fn status(&self) -> LoadStatus {
        self.read().status
    }

    /// When the last load settled, if any has.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.read().loaded_at
    }

    /// The currently granted set. Cheap to call; the set is shared, not copied.
    pub fn granted(&self) -> Arc<HashSet<Permission>> {
        Arc::clone(&self.read().granted)
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        let state = self.read();
        let mut permissions: Vec<Permission> = state.granted.iter().copied().collect();
        permissions.sort();

        DirectorySnapshot {
            status: state.status,
            permissions,
            loaded_at: state.loaded_at,
        }
    }

    /// Runs `fetch` and replaces the held set with its result.
    ///
    /// Concurrent loads are not deduplicated: whichever resolves last wins.
    /// On error the directory is emptied and marked failed, and the error is
    /// handed back so the caller can react to an expired session.
    pub async fn load<F, N, E>(&self, fetch: F) -> Result<usize, E>
    where
        F: Future<Output = Result<Vec<N>, E>>,
        N: AsRef<str>,
        E: Display,
    {
        self.mark_loading();

        match fetch.await {
            Ok(names) => Ok(self.replace(names)),
            Err(err) => {
                warn!(error = %err, "Permission load failed; directory left empty");
                self.fail();
                Err(err)
            }
        }
    }

    /// Replaces the held set and marks the directory ready. Returns the number
    /// of distinct permissions now granted.
    pub fn replace<I, N>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut granted = HashSet::new();
        for name in names {
            let name = name.as_ref();
            match name.parse::<Permission>() {
                Ok(permission) => {
                    granted.insert(permission);
                }
                Err(err) => warn!(permission = name, error = %err, "Ignoring unknown permission"),
            }
        }

        let count = granted.len();
        let mut state = self.write();
        state.status = LoadStatus::Ready;
        state.granted = Arc::new(granted);
        state.loaded_at = Some(Utc::now());
        debug!(count, "Permission directory replaced");
        count
    }

    /// Empties the directory and marks it failed.
    pub fn fail(&self) {
        let mut state = self.write();
        state.status = LoadStatus::Failed;
        state.granted = Arc::new(HashSet::new());
        state.loaded_at = Some(Utc::now());
    }

    /// Back to a freshly created directory.
    pub fn reset(&self) {
        *self.write() = DirectoryState::default();
    }

    fn mark_loading(&self) {
        self.write().status = LoadStatus::Loading;
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
