//! Abstraction over the external change stream of the vehicle collection.
use crate::entities::vehicle::{Vehicle, VehicleId};
use crate::result::ReceiverErr;

pub type ChangeRecv = Box<dyn ChangeReceiver>;

pub trait ChangeReceiver: Send {
    fn recv(&self) -> Result<ChangeEvent, ReceiverErr>;
}

/// One document change delivered by the stream collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Created(Vehicle),
    Modified(Vehicle),
    Removed(VehicleId),
}
