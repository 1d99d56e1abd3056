//! Runs the notification pipeline for every modified vehicle appearing on the bus.
use crate::entities::vehicle::Vehicle;
use crate::result::{BusErr, SetupErr};
use crate::use_cases::bus::{BusEvent, EventBus, EventPublisher};
use crate::use_cases::pipeline::{Outcome, Pipeline};

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::thread;
use tracing::{debug, error, instrument, trace};

/// Subscribes to [`BusEvent::VehicleModified`] and hands each event to the pipeline.
///
/// Every event is handled on a thread pool worker, independently and concurrently with other
/// in-flight events. There is no lock serializing events of the same vehicle: two racing updates
/// may both observe the stale previous status and both fire (at-least-once dispatch).
pub struct WardNotifier {
    bus: EventBus,
    tp: ThreadPool,
}

impl WardNotifier {
    pub fn new(bus: EventBus) -> Result<Self, SetupErr> {
        let tp = ThreadPoolBuilder::new().num_threads(4).build()?;
        Ok(Self { bus, tp })
    }

    #[instrument(skip(self, pipeline))]
    pub fn run(self, pipeline: Pipeline) {
        // subscribe before spawning so no event published right after this call is missed
        let sub = self.bus.subscriber();
        thread::spawn(move || -> Result<(), BusErr> {
            loop {
                match sub.recv()? {
                    BusEvent::VehicleModified(vehicle) => {
                        debug!("handling modification of vehicle '{}'", vehicle.id);
                        let publ = self.bus.publisher();
                        let pipeline = pipeline.clone();
                        self.tp.spawn(move || handle(vehicle, &pipeline, publ));
                    }
                    e => trace!("event not supported in WardNotifier: '{}'", e),
                }
            }
        });
    }
}

fn handle(vehicle: Vehicle, pipeline: &Pipeline, mut publ: EventPublisher) {
    let id = vehicle.id.clone();
    let outcome = pipeline.handle_modified(&vehicle);
    let event = match outcome {
        Outcome::Notified(summary) => BusEvent::WardNotified {
            vehicle: id.clone(),
            summary,
        },
        _ => BusEvent::NotificationSkipped(id.clone()),
    };
    if let Err(e) = publ.send(event) {
        error!("failed to publish outcome event: '{}'", e);
    }
    if let Err(e) = publ.send(BusEvent::StatusRecorded(id)) {
        error!("failed to publish tracker event: '{}'", e);
    }
}
