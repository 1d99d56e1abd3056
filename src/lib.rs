#![allow(clippy::no_effect_underscore_binding)] // needed because of how rocket macros work
#![allow(clippy::module_name_repetitions)]

pub mod configuration;
pub mod data_providers;
pub mod entities;
pub mod result;
pub mod use_cases;

#[cfg(test)]
mod testutils;

use crate::configuration::factories::{
    config_loader, config_resolver, event_bus, pipeline, push_client, tracker, user_store,
    vehicle_store,
};
use crate::configuration::telemetry::init_tracing;
use crate::data_providers::server::{
    init_tracking, register_token, remove_vehicle, rescan, update_vehicle,
};
use crate::data_providers::vehicles::MemoryVehicleStore;
use crate::result::SetupErr;
use crate::use_cases::bus::EventBus;
use crate::use_cases::config::Config;
use crate::use_cases::pipeline::Pipeline;
use crate::use_cases::services::notifier::WardNotifier;
use crate::use_cases::services::watcher::ChangeWatcher;
use crate::use_cases::vehicles::VehicleWrite;

use rocket::{routes, Build, Rocket};
use std::env;
use std::sync::Arc;
use tracing::{debug, instrument};

#[must_use]
#[instrument]
pub fn launch() -> Rocket<Build> {
    init_tracing();

    let path_override = env::var("WARDCAST_CONFIG_PATH")
        .ok()
        .or_else(|| env::args().nth(1));

    let resolver = config_resolver(config_loader());

    let cfg = resolver
        .handle_config(path_override)
        .expect("failed to get config");

    build(cfg).expect("failed to setup core")
}

/// Assembles the core services and the administrative HTTP surface.
///
/// Collaborator handles are created once here and injected into the orchestrator; they live for
/// the whole process, no teardown is required mid-process.
pub fn build(cfg: Config) -> Result<Rocket<Build>, SetupErr> {
    let bus = event_bus()?;
    let vehicles = vehicle_store();
    let (user_read, user_write) = user_store();
    let tracker = tracker();
    let push = push_client(&cfg);
    let pipeline = pipeline(
        cfg.clone(),
        tracker,
        user_read,
        user_write.clone(),
        vehicles.clone(),
        push,
    );

    setup_core(bus, &vehicles, pipeline.clone())?;

    debug!("starting server...");
    let vehicle_write: VehicleWrite = vehicles;
    Ok(rocket::build()
        .mount(
            "/",
            routes![
                register_token,
                update_vehicle,
                remove_vehicle,
                rescan,
                init_tracking
            ],
        )
        .manage(pipeline)
        .manage(user_write)
        .manage(vehicle_write)
        .manage(cfg))
}

fn setup_core(
    bus: EventBus,
    vehicles: &Arc<MemoryVehicleStore>,
    pipeline: Pipeline,
) -> Result<(), SetupErr> {
    let watcher = ChangeWatcher::new(bus.clone());
    watcher.run(vehicles.watch());
    let notifier = WardNotifier::new(bus)?;
    notifier.run(pipeline);
    Ok(())
}
