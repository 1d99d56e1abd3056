use crate::result::BusErr;
use crate::use_cases::bus::{BusEvent, EventBus};
use crate::use_cases::receiver::{ChangeEvent, ChangeRecv};

use std::thread;
use tracing::{debug, trace, warn};

/// Watches the change stream of the vehicle collection and publishes appropriate event on the
/// event bus.
///
/// It spawns a thread in which it receives change events. Only [`ChangeEvent::Modified`] is kept
/// and turned into [`BusEvent::VehicleModified`]; creation and removal events are discarded at
/// this stage.
#[derive(Debug)]
pub struct ChangeWatcher {
    bus: EventBus,
}

impl ChangeWatcher {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    pub fn run(&self, receiver: ChangeRecv) {
        debug!("spawning watching thread");
        let mut publ = self.bus.publisher();
        thread::spawn(move || -> Result<(), BusErr> {
            debug!("watching thread spawned");
            loop {
                trace!("waiting for change event");
                match receiver.recv() {
                    Ok(ChangeEvent::Modified(vehicle)) => {
                        debug!("vehicle '{}' modified", vehicle.id);
                        publ.send(BusEvent::VehicleModified(vehicle))?;
                    }
                    Ok(e) => debug!("change not supported in ChangeWatcher: '{:?}'", e),
                    Err(e) => {
                        warn!("change stream closed: '{}'", e);
                        return Ok(());
                    }
                }
            }
        });
    }
}
