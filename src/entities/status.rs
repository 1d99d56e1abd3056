//! Last-known status cache entry per vehicle.
//!
//! This is the core's only persisted state. It exists solely to reconstruct "previous value"
//! semantics which the change stream does not supply natively.
use crate::entities::vehicle::VehicleStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusRecord {
    pub status: VehicleStatus,
    pub last_updated: DateTime<Utc>,
}

impl StatusRecord {
    /// Creates a record stamped with the store's clock, not the caller's.
    pub fn now(status: VehicleStatus) -> Self {
        Self {
            status,
            last_updated: Utc::now(),
        }
    }
}
