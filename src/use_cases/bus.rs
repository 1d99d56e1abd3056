//! Represents event bus used to coordinate components.
//!
//! The events describe the lifecycle of one vehicle change travelling through the notification
//! pipeline.
use crate::entities::vehicle::{Vehicle, VehicleId};
use crate::result::BusErr;
use crate::use_cases::dispatcher::DispatchSummary;

use std::fmt::{Debug, Display};
use std::sync::Arc;

pub type EventBus = Arc<dyn Bus>;
pub type EventSubscriber = Box<dyn Subscriber>;
pub type EventPublisher = Box<dyn Publisher>;

/// Generic bus.
///
/// It allows to publish and subscribe to particular events in the system.
pub trait Bus: Send + Sync + Debug {
    fn subscriber(&self) -> EventSubscriber;

    fn publisher(&self) -> EventPublisher;

    fn share(&self) -> EventBus;
}

/// Represents abstraction for receiving events.
pub trait Subscriber: Send {
    fn recv(&self) -> Result<BusEvent, BusErr>;
}

/// Represents abstraction for sending events.
pub trait Publisher: Send {
    fn send(&mut self, event: BusEvent) -> Result<(), BusErr>;
}

/// Represents events happening in the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// A vehicle document was modified in the watched collection. External event.
    VehicleModified(Vehicle),

    /// Published when the fan-out for a qualifying transition finished.
    WardNotified {
        vehicle: VehicleId,
        summary: DispatchSummary,
    },

    /// Published when a change did not qualify for notification.
    NotificationSkipped(VehicleId),

    /// Published when the status tracker was overwritten with the event's new status.
    StatusRecorded(VehicleId),
}

impl Display for BusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BusEvent::VehicleModified(_) => "VehicleModified",
                BusEvent::WardNotified { .. } => "WardNotified",
                BusEvent::NotificationSkipped(_) => "NotificationSkipped",
                BusEvent::StatusRecorded(_) => "StatusRecorded",
            }
        )
    }
}
