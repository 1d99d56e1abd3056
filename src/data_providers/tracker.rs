//! In-memory implementation of the status tracker.
use crate::entities::status::StatusRecord;
use crate::entities::vehicle::{VehicleId, VehicleStatus};
use crate::result::TrackerErr;
use crate::use_cases::tracker::StatusTracker;

use dashmap::DashMap;
use tracing::debug;

/// Keeps one [`StatusRecord`] per vehicle.
///
/// Writes are last-write-wins upserts; the timestamp is stamped here, on the store side.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    records: DashMap<VehicleId, StatusRecord>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusTracker for MemoryTracker {
    fn previous_status(&self, vehicle: &VehicleId) -> Result<Option<VehicleStatus>, TrackerErr> {
        Ok(self.records.get(vehicle).map(|rec| rec.status.clone()))
    }

    fn set_status(&self, vehicle: &VehicleId, status: VehicleStatus) -> Result<(), TrackerErr> {
        debug!("recording status '{}' of vehicle '{}'", status, vehicle);
        self.records
            .insert(vehicle.clone(), StatusRecord::now(status));
        Ok(())
    }
}
