//! In-memory implementation of the vehicle collection.
//!
//! Besides plain reads and writes, the store plays the role of the change stream collaborator:
//! every mutation is forwarded to registered watchers as a [`ChangeEvent`].
use crate::data_providers::receiver::ChannelChangeReceiver;
use crate::entities::vehicle::{Vehicle, VehicleId, VehicleStatus};
use crate::result::VehicleStoreErr;
use crate::use_cases::receiver::{ChangeEvent, ChangeRecv};
use crate::use_cases::vehicles::{UpsertOutcome, VehicleReader, VehicleWriter};

use dashmap::DashMap;
use std::sync::mpsc::{channel, Sender};
use std::sync::Mutex;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    vehicles: DashMap<VehicleId, Vehicle>,
    watchers: Mutex<Vec<Sender<ChangeEvent>>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a change stream fed by all future mutations of this store.
    pub fn watch(&self) -> ChangeRecv {
        let (tx, rx) = channel();
        self.watchers.lock().expect("poisoned mutex").push(tx);
        Box::new(ChannelChangeReceiver::new(rx))
    }

    fn emit(&self, event: ChangeEvent) {
        let mut watchers = self.watchers.lock().expect("poisoned mutex");
        // dropped receivers unregister their watcher here
        watchers.retain(|tx| tx.send(event.clone()).is_ok());
        trace!("emitted change to {} watcher(s)", watchers.len());
    }
}

impl VehicleReader for MemoryVehicleStore {
    fn all(&self) -> Result<Vec<Vehicle>, VehicleStoreErr> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(vehicles)
    }

    fn all_active(&self) -> Result<Vec<Vehicle>, VehicleStoreErr> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|vehicle| vehicle.status == VehicleStatus::Active)
            .collect())
    }
}

impl VehicleWriter for MemoryVehicleStore {
    fn upsert(&self, vehicle: Vehicle) -> Result<UpsertOutcome, VehicleStoreErr> {
        debug!("upserting vehicle '{}'", vehicle.id);
        let previous = self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        let outcome = if previous.is_some() {
            self.emit(ChangeEvent::Modified(vehicle));
            UpsertOutcome::Updated
        } else {
            self.emit(ChangeEvent::Created(vehicle));
            UpsertOutcome::Created
        };
        Ok(outcome)
    }

    fn remove(&self, vehicle: &VehicleId) -> Result<(), VehicleStoreErr> {
        if self.vehicles.remove(vehicle).is_some() {
            self.emit(ChangeEvent::Removed(vehicle.clone()));
        }
        Ok(())
    }
}
