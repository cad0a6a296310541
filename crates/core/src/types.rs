//! Identifier types
//!
//! This module defines:
//! - RecordId: store-assigned identity of a persisted record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identity of a persisted record
///
/// Ids are monotonically increasing sequence numbers handed out by the
/// record store on first save. A record that has never been saved has no
/// id (`Record::id()` returns `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw sequence number
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
