//! Change-kind vocabulary shared by the watcher and the configuration layer

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of activity reported for a watch target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// File was read
    Access,
    /// Metadata changed (permissions, timestamps, xattrs)
    Attrib,
    /// File opened for writing was closed
    CloseWrite,
    /// File not opened for writing was closed
    CloseNoWrite,
    /// Entry created inside a watched directory
    Create,
    /// Entry deleted inside a watched directory
    Delete,
    /// Watched file itself was deleted
    DeleteSelf,
    /// File contents were written
    Modify,
    /// Entry moved out of a watched directory
    MovedFrom,
    /// Entry moved into a watched directory
    MovedTo,
    /// Watched file itself was moved
    MoveSelf,
    /// File was opened
    Open,
}

impl ChangeKind {
    /// Every kind, in the order classification lines are printed
    pub const ALL: [ChangeKind; 12] = [
        ChangeKind::Access,
        ChangeKind::Attrib,
        ChangeKind::CloseWrite,
        ChangeKind::CloseNoWrite,
        ChangeKind::Create,
        ChangeKind::Delete,
        ChangeKind::DeleteSelf,
        ChangeKind::Modify,
        ChangeKind::MovedFrom,
        ChangeKind::MovedTo,
        ChangeKind::MoveSelf,
        ChangeKind::Open,
    ];

    /// Kebab-case name, as accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Access => "access",
            ChangeKind::Attrib => "attrib",
            ChangeKind::CloseWrite => "close-write",
            ChangeKind::CloseNoWrite => "close-nowrite",
            ChangeKind::Create => "create",
            ChangeKind::Delete => "delete",
            ChangeKind::DeleteSelf => "delete-self",
            ChangeKind::Modify => "modify",
            ChangeKind::MovedFrom => "moved-from",
            ChangeKind::MovedTo => "moved-to",
            ChangeKind::MoveSelf => "move-self",
            ChangeKind::Open => "open",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ChangeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

/// Set of change kinds that fire the configured command
///
/// Activity of any other kind is still classified and logged, it just
/// doesn't trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ChangeKind>", into = "Vec<ChangeKind>")]
pub struct TriggerSet {
    kinds: Vec<ChangeKind>,
}

impl TriggerSet {
    /// Build a set from any list of kinds; duplicates are dropped
    pub fn new(kinds: impl IntoIterator<Item = ChangeKind>) -> Self {
        let mut kinds: Vec<ChangeKind> = kinds.into_iter().collect();
        kinds.sort();
        kinds.dedup();
        Self { kinds }
    }

    /// Whether `kind` fires the command
    pub fn contains(&self, kind: ChangeKind) -> bool {
        self.kinds.binary_search(&kind).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = ChangeKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl Default for TriggerSet {
    /// Open and close activity, in both close variants
    fn default() -> Self {
        Self::new([
            ChangeKind::Open,
            ChangeKind::CloseWrite,
            ChangeKind::CloseNoWrite,
        ])
    }
}

impl From<Vec<ChangeKind>> for TriggerSet {
    fn from(kinds: Vec<ChangeKind>) -> Self {
        Self::new(kinds)
    }
}

impl From<TriggerSet> for Vec<ChangeKind> {
    fn from(set: TriggerSet) -> Self {
        set.kinds
    }
}

impl FromIterator<ChangeKind> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = ChangeKind>>(iter: I) -> Self {
        Self::new(iter)
    }
}
