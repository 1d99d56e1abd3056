//! Vehicle document observed by the core.
//!
//! Vehicles are owned and mutated by an external fleet-tracking system. The core only reads them
//! and reacts to their status changes.
use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Dummy)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic subdivision used to target notifications to nearby users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Dummy)]
#[serde(transparent)]
pub struct WardId(String);

impl WardId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle status as reported by the fleet-tracking system.
///
/// Only `Active` and `Inactive` take part in transition detection. Everything else is carried
/// verbatim so repeated writes stay lossless.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Dummy)]
#[serde(from = "String", into = "String")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Other(String),
}

impl From<String> for VehicleStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Active" => VehicleStatus::Active,
            "Inactive" => VehicleStatus::Inactive,
            _ => VehicleStatus::Other(status),
        }
    }
}

impl From<VehicleStatus> for String {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::Active => "Active".into(),
            VehicleStatus::Inactive => "Inactive".into(),
            VehicleStatus::Other(other) => other,
        }
    }
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Active => write!(f, "Active"),
            VehicleStatus::Inactive => write!(f, "Inactive"),
            VehicleStatus::Other(other) => write!(f, "{}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Dummy)]
pub struct Vehicle {
    pub id: VehicleId,
    pub status: VehicleStatus,
    pub ward: WardId,
    pub vehicle_type: Option<String>,
}

impl Vehicle {
    pub fn new<I, W>(id: I, status: VehicleStatus, ward: W) -> Self
    where
        I: Into<String>,
        W: Into<String>,
    {
        Self {
            id: VehicleId::new(id),
            status,
            ward: WardId::new(ward),
            vehicle_type: None,
        }
    }
}
