use crate::data_providers::bus::LocalBus;
use crate::data_providers::config::{FsConfigLoader, FsConfigResolver};
use crate::data_providers::push::HttpPushClient;
use crate::data_providers::tracker::MemoryTracker;
use crate::data_providers::users::MemoryUserStore;
use crate::data_providers::vehicles::MemoryVehicleStore;
use crate::result::BusErr;
use crate::use_cases::bus::EventBus;
use crate::use_cases::config::{CfgLoader, CfgResolver, Config};
use crate::use_cases::pipeline::{NotificationPipeline, Pipeline};
use crate::use_cases::push::Push;
use crate::use_cases::tracker::Tracker;
use crate::use_cases::users::{UserRead, UserWrite};

use std::sync::Arc;

pub fn config_resolver(config_loader: CfgLoader) -> CfgResolver {
    Box::new(FsConfigResolver::new(config_loader))
}

pub fn config_loader() -> CfgLoader {
    Box::new(FsConfigLoader)
}

pub fn event_bus() -> Result<EventBus, BusErr> {
    Ok(Arc::new(LocalBus::new()?))
}

pub fn tracker() -> Tracker {
    Arc::new(MemoryTracker::new())
}

pub fn user_store() -> (UserRead, UserWrite) {
    MemoryUserStore::create()
}

pub fn vehicle_store() -> Arc<MemoryVehicleStore> {
    Arc::new(MemoryVehicleStore::new())
}

pub fn push_client(cfg: &Config) -> Push {
    Arc::new(HttpPushClient::new(&cfg.push_endpoint))
}

#[allow(clippy::needless_pass_by_value)]
pub fn pipeline(
    cfg: Config,
    tracker: Tracker,
    user_read: UserRead,
    user_write: UserWrite,
    vehicles: Arc<MemoryVehicleStore>,
    push: Push,
) -> Pipeline {
    Arc::new(NotificationPipeline::new(
        cfg, tracker, user_read, user_write, vehicles, push,
    ))
}
