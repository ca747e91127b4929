//! Static allow-list of administrator user IDs.
//!
//! The admin set is read once at startup from a comma-separated
//! configuration value and never changes while the process runs.

use std::collections::HashSet;

/// The configured set of administrator Discord user IDs.
///
/// Membership is exact string equality on the stable Discord user ID; no
/// normalization is applied beyond trimming whitespace around each
/// configured entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSet {
    ids: HashSet<String>,
}

impl AdminSet {
    /// Creates an empty admin set (nobody is an admin).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of Discord user IDs.
    ///
    /// Entries are trimmed; empty entries (including the whole string being
    /// empty) are dropped.
    #[must_use]
    pub fn from_list(list: &str) -> Self {
        let ids = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    /// Returns true if `user_id` is a configured administrator.
    #[must_use]
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.ids.contains(user_id)
    }

    /// Returns the number of configured administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no administrators are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
