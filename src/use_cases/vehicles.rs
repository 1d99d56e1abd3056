//! Read and write interfaces for the vehicle collection.
use crate::entities::vehicle::{Vehicle, VehicleId};
use crate::result::VehicleStoreErr;

use std::sync::Arc;

pub type VehicleRead = Arc<dyn VehicleReader>;
pub type VehicleWrite = Arc<dyn VehicleWriter>;

pub trait VehicleReader: Send + Sync {
    fn all(&self) -> Result<Vec<Vehicle>, VehicleStoreErr>;

    fn all_active(&self) -> Result<Vec<Vehicle>, VehicleStoreErr>;
}

pub trait VehicleWriter: Send + Sync {
    fn upsert(&self, vehicle: Vehicle) -> Result<UpsertOutcome, VehicleStoreErr>;

    fn remove(&self, vehicle: &VehicleId) -> Result<(), VehicleStoreErr>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
