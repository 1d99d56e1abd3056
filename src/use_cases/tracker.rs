//! Interface for the last-known vehicle status cache.
use crate::entities::vehicle::{VehicleId, VehicleStatus};
use crate::result::TrackerErr;

use std::sync::Arc;

pub type Tracker = Arc<dyn StatusTracker>;

/// Persists the last observed status per vehicle.
///
/// The store answers "what was the status before this change?", because the change stream itself
/// does not carry the previous value.
pub trait StatusTracker: Send + Sync {
    /// Returns the last recorded status, or `None` when the vehicle was never observed.
    fn previous_status(&self, vehicle: &VehicleId) -> Result<Option<VehicleStatus>, TrackerErr>;

    /// Upserts the record; last write wins. The timestamp is assigned by the store so callers
    /// with skewed clocks cannot corrupt ordering.
    fn set_status(&self, vehicle: &VehicleId, status: VehicleStatus) -> Result<(), TrackerErr>;
}
