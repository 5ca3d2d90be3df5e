//! Row identity for consolidated rows.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::sentinel::NOT_FOUND;

/// Uppercased client identity plus a collision ordinal.
///
/// The first row for a client has ordinal 1 and displays as `BASE`; later
/// rows for the same client display as `BASE_2`, `BASE_3`, ... Keeping the
/// ordinal separate means a client literally named `X_2` never collides
/// with the second `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergeKey {
    base: String,
    ordinal: usize,
}

impl MergeKey {
    pub fn new(base: impl Into<String>, ordinal: usize) -> Self {
        Self {
            base: base.into(),
            ordinal: ordinal.max(1),
        }
    }

    /// Client identity without the collision suffix.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 1 for the first occurrence of the client.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Key base for a cleaned client value, `None` when there is no client.
    pub fn base_for(client: &str) -> Option<String> {
        let client = client.trim();
        if client.is_empty() || client == NOT_FOUND {
            None
        } else {
            Some(client.to_uppercase())
        }
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ordinal == 1 {
            f.write_str(&self.base)
        } else {
            write!(f, "{}_{}", self.base, self.ordinal)
        }
    }
}

impl Serialize for MergeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
