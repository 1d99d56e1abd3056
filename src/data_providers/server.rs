//! Administrative HTTP surface.
//!
//! Thin request/response wrappers around the orchestrator primitives: user token registration,
//! vehicle ingress (standing in for the managed change stream), tracker seeding and rescan.
use crate::entities::user::{Token, UserRecord};
use crate::entities::vehicle::{Vehicle, VehicleId, VehicleStatus, WardId};
use crate::result::ApiErr;
use crate::use_cases::pipeline::{InitSummary, Pipeline, RescanSummary};
use crate::use_cases::users::UserWrite;
use crate::use_cases::vehicles::{UpsertOutcome, VehicleWrite};

use anyhow::anyhow;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::Deserialize;
use rocket::{delete, post, State};
use tracing::instrument;

#[instrument(skip(users))]
#[post("/user/token", data = "<req>")]
pub fn register_token(
    req: Json<TokenRegistration>,
    users: &State<UserWrite>,
) -> Result<Status, ApiErr> {
    let req = req.into_inner();
    let user_id = req
        .user_id
        .ok_or_else(|| ApiErr::InvalidInput("missing field 'user_id'".into()))?;
    let ward = req
        .ward
        .ok_or_else(|| ApiErr::InvalidInput("missing field 'ward'".into()))?;
    users
        .register(UserRecord::new(user_id, ward, req.token.map(Token::new)))
        .map_err(|e| ApiErr::Internal(anyhow!(e)))?;
    Ok(Status::Created)
}

#[instrument(skip(vehicles))]
#[post("/vehicle/<id>", data = "<req>")]
pub fn update_vehicle(
    id: String,
    req: Json<VehicleUpdate>,
    vehicles: &State<VehicleWrite>,
) -> Result<Status, ApiErr> {
    let req = req.into_inner();
    let status = req
        .status
        .ok_or_else(|| ApiErr::InvalidInput("missing field 'status'".into()))?;
    let ward = req
        .ward
        .ok_or_else(|| ApiErr::InvalidInput("missing field 'ward'".into()))?;
    let vehicle = Vehicle {
        id: VehicleId::new(id),
        status: VehicleStatus::from(status),
        ward: WardId::new(ward),
        vehicle_type: req.vehicle_type,
    };
    let outcome = vehicles
        .upsert(vehicle)
        .map_err(|e| ApiErr::Internal(anyhow!(e)))?;
    Ok(match outcome {
        UpsertOutcome::Created => Status::Created,
        UpsertOutcome::Updated => Status::Ok,
    })
}

#[instrument(skip(vehicles))]
#[delete("/vehicle/<id>")]
pub fn remove_vehicle(id: String, vehicles: &State<VehicleWrite>) -> Result<Status, ApiErr> {
    vehicles
        .remove(&VehicleId::new(id))
        .map_err(|e| ApiErr::Internal(anyhow!(e)))?;
    Ok(Status::Ok)
}

/// Re-checks every currently Active vehicle against the tracker and re-fires notifications
/// where the records disagree.
#[instrument(skip(pipeline))]
#[post("/vehicles/rescan")]
pub async fn rescan(pipeline: &State<Pipeline>) -> Result<Json<RescanSummary>, ApiErr> {
    let pipeline = pipeline.inner().clone();
    // dispatch performs blocking network calls, keep them off the async workers
    let summary = rocket::tokio::task::spawn_blocking(move || pipeline.rescan())
        .await
        .map_err(|e| ApiErr::Internal(anyhow!(e)))?;
    Ok(Json(summary))
}

/// Seeds one status record per existing vehicle from its current status.
#[instrument(skip(pipeline))]
#[post("/tracker/init")]
pub fn init_tracking(pipeline: &State<Pipeline>) -> Result<Json<InitSummary>, ApiErr> {
    Ok(Json(pipeline.initialize_tracking()))
}

#[derive(Debug, Deserialize)]
pub struct TokenRegistration {
    user_id: Option<String>,
    ward: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VehicleUpdate {
    status: Option<String>,
    ward: Option<String>,
    vehicle_type: Option<String>,
}
