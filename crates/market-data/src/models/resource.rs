use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

/// What a load resource fetches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    /// Most recently published table A.
    Current,
    /// All tables A published in `from..=to`.
    Historic { from: NaiveDate, to: NaiveDate },
}

/// How often a resource is (re)loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Load from the backup file only, never hit the network.
    Never,
    /// Load once when the loader starts.
    OnStartup,
    /// Load at startup and then every `period`.
    Scheduled(Duration),
}

/// A registered unit of work for the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadResource {
    /// Unique id, used for de-duplication and backup file naming
    pub id: String,
    pub kind: ResourceKind,
    pub policy: UpdatePolicy,
    /// Local copy of the payload, used when the policy is `Never`
    /// or when the remote fetch fails
    pub backup: Option<PathBuf>,
}

impl LoadResource {
    pub fn new(id: impl Into<String>, kind: ResourceKind, policy: UpdatePolicy) -> Self {
        Self {
            id: id.into(),
            kind,
            policy,
            backup: None,
        }
    }

    pub fn with_backup(mut self, backup: PathBuf) -> Self {
        self.backup = Some(backup);
        self
    }
}
