//! Notification payload submitted to the push delivery collaborator.
use crate::entities::vehicle::{Vehicle, VehicleId, WardId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

impl Notification {
    pub fn new<T, B>(title: T, body: B, vehicle: &Vehicle) -> Self
    where
        T: Into<String>,
        B: Into<String>,
    {
        Self {
            title: title.into(),
            body: body.into(),
            data: NotificationData {
                vehicle_id: vehicle.id.clone(),
                ward: vehicle.ward.clone(),
                vehicle_type: vehicle.vehicle_type.clone().unwrap_or_default(),
                updated_at: Utc::now(),
            },
        }
    }
}

/// Structured data delivered next to the human-readable notification text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationData {
    pub vehicle_id: VehicleId,
    pub ward: WardId,
    pub vehicle_type: String,
    pub updated_at: DateTime<Utc>,
}
