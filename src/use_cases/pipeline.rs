//! The orchestrating pipeline behind every vehicle change event.
//!
//! One modified event travels: transition check against the status tracker, then (only for an
//! Inactive to Active transition) ward resolution, batched dispatch and token sanitization, and
//! finally an unconditional tracker overwrite. The overwrite is what prevents re-notifying on
//! the next no-op update and what arms detection of the next transition.
use crate::entities::notification::Notification;
use crate::entities::vehicle::{Vehicle, VehicleStatus};
use crate::use_cases::config::Config;
use crate::use_cases::dispatcher::{BatchDispatcher, DispatchSummary};
use crate::use_cases::push::Push;
use crate::use_cases::sanitizer::TokenSanitizer;
use crate::use_cases::tracker::Tracker;
use crate::use_cases::users::{UserRead, UserWrite};
use crate::use_cases::vehicles::VehicleRead;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub type Pipeline = Arc<NotificationPipeline>;

pub struct NotificationPipeline {
    cfg: Config,
    tracker: Tracker,
    user_read: UserRead,
    vehicles: VehicleRead,
    dispatcher: BatchDispatcher,
    sanitizer: TokenSanitizer,
}

/// Terminal state of one handled change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Qualifying transition, fan-out ran to completion.
    Notified(DispatchSummary),

    /// Qualifying transition, but the ward has no registered tokens. Normal no-op.
    NoRecipients,

    /// Non-qualifying transition, notification bypassed entirely.
    Skipped,

    /// A collaborator failed before dispatch could run. Logged, not retried.
    Aborted,
}

impl NotificationPipeline {
    pub fn new(
        cfg: Config,
        tracker: Tracker,
        user_read: UserRead,
        user_write: UserWrite,
        vehicles: VehicleRead,
        push: Push,
    ) -> Self {
        Self {
            dispatcher: BatchDispatcher::new(push),
            sanitizer: TokenSanitizer::new(user_read.clone(), user_write),
            cfg,
            tracker,
            user_read,
            vehicles,
        }
    }

    /// Handles one modified event from the change stream.
    ///
    /// Whatever branch is taken, the tracker ends up overwritten with the event's new status.
    /// There is no retry of the whole pipeline; collaborator failures are logged and the event
    /// is considered done.
    #[instrument(skip(self, vehicle), fields(vehicle = %vehicle.id))]
    pub fn handle_modified(&self, vehicle: &Vehicle) -> Outcome {
        let previous = match self.tracker.previous_status(&vehicle.id) {
            Ok(previous) => previous,
            Err(e) => {
                // unknown previous status never qualifies, the write below still happens
                error!("failed to read status record: '{}'", e);
                None
            }
        };
        let outcome = if previous == Some(VehicleStatus::Inactive)
            && vehicle.status == VehicleStatus::Active
        {
            info!(
                "vehicle '{}' in ward '{}' changed from Inactive to Active",
                vehicle.id, vehicle.ward
            );
            self.notify_ward(vehicle)
        } else {
            Outcome::Skipped
        };
        if let Err(e) = self.tracker.set_status(&vehicle.id, vehicle.status.clone()) {
            error!("failed to update status record: '{}'", e);
        }
        outcome
    }

    fn notify_ward(&self, vehicle: &Vehicle) -> Outcome {
        let tokens = match self.user_read.tokens_in_ward(&vehicle.ward) {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("failed to resolve ward members: '{}'", e);
                return Outcome::Aborted;
            }
        };
        if tokens.is_empty() {
            info!("no registered tokens in ward '{}'", vehicle.ward);
            return Outcome::NoRecipients;
        }
        let notification = Notification::new(
            &self.cfg.notification_title,
            &self.cfg.notification_body,
            vehicle,
        );
        let summary = self.dispatcher.dispatch(&tokens, &notification);
        info!(
            "successfully sent {} notifications out of {}",
            summary.success_count,
            tokens.len()
        );
        if !summary.failed.is_empty() {
            self.sanitizer.sanitize(&summary.failed);
        }
        Outcome::Notified(summary)
    }

    /// Re-checks all currently Active vehicles against the tracker and re-fires the fan-out for
    /// any whose record disagrees (including vehicles with no record at all).
    #[instrument(skip(self))]
    pub fn rescan(&self) -> RescanSummary {
        let vehicles = match self.vehicles.all_active() {
            Ok(vehicles) => vehicles,
            Err(e) => {
                error!("failed to list active vehicles: '{}'", e);
                return RescanSummary::default();
            }
        };
        let mut summary = RescanSummary {
            scanned: vehicles.len(),
            notified: 0,
        };
        for vehicle in vehicles {
            let tracked = match self.tracker.previous_status(&vehicle.id) {
                Ok(tracked) => tracked,
                Err(e) => {
                    error!("failed to read status record: '{}'", e);
                    continue;
                }
            };
            if tracked == Some(VehicleStatus::Active) {
                continue;
            }
            self.notify_ward(&vehicle);
            if let Err(e) = self.tracker.set_status(&vehicle.id, VehicleStatus::Active) {
                error!("failed to update status record: '{}'", e);
            }
            summary.notified += 1;
        }
        summary
    }

    /// Seeds one status record per existing vehicle from its current status.
    #[instrument(skip(self))]
    pub fn initialize_tracking(&self) -> InitSummary {
        let vehicles = match self.vehicles.all() {
            Ok(vehicles) => vehicles,
            Err(e) => {
                error!("failed to list vehicles: '{}'", e);
                return InitSummary::default();
            }
        };
        let mut summary = InitSummary::default();
        for vehicle in vehicles {
            match self.tracker.set_status(&vehicle.id, vehicle.status.clone()) {
                Ok(()) => summary.seeded += 1,
                Err(e) => error!("failed to seed status record: '{}'", e),
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RescanSummary {
    pub scanned: usize,
    pub notified: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InitSummary {
    pub seeded: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::configuration::telemetry::init_tracing;
    use crate::data_providers::tracker::MemoryTracker;
    use crate::data_providers::users::MemoryUserStore;
    use crate::data_providers::vehicles::MemoryVehicleStore;
    use crate::entities::user::{Token, UserRecord};
    use crate::entities::vehicle::{VehicleId, WardId};
    use crate::result::PushErr;
    use crate::use_cases::push::{BatchResponse, PushClient, SendStatus};

    use anyhow::Result;
    use claim::assert_matches;
    use std::sync::{Arc, Mutex};

    #[test]
    fn first_observation_creates_record_and_does_not_notify() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        let vehicle = Vehicle::new("v1", VehicleStatus::Active, "7");

        // when
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        assert_eq!(outcome, Outcome::Skipped);
        assert!(fixture.push.batches().is_empty());
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v1"))?,
            Some(VehicleStatus::Active)
        );

        Ok(())
    }

    #[test]
    fn notification_fires_on_inactive_to_active_transition() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.register_user("u1", "7", Some("a"))?;
        fixture.register_user("u2", "7", Some("b"))?;
        fixture.register_user("u3", "7", None)?;
        fixture.record_status("v1", VehicleStatus::Inactive)?;
        let vehicle = Vehicle::new("v1", VehicleStatus::Active, "7");

        // when
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        let batches = fixture.push.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], vec![Token::new("a"), Token::new("b")]);
        assert_eq!(
            outcome,
            Outcome::Notified(DispatchSummary {
                success_count: 2,
                failed: Vec::new(),
            })
        );
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v1"))?,
            Some(VehicleStatus::Active)
        );

        Ok(())
    }

    #[test]
    fn non_qualifying_transitions_are_skipped() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.register_user("u1", "7", Some("a"))?;
        let cases = [
            (VehicleStatus::Active, VehicleStatus::Active),
            (VehicleStatus::Active, VehicleStatus::Inactive),
            (VehicleStatus::Inactive, VehicleStatus::Inactive),
            (VehicleStatus::Other("In Repair".into()), VehicleStatus::Active),
        ];

        for (previous, new) in cases {
            fixture.record_status("v1", previous)?;
            let vehicle = Vehicle::new("v1", new, "7");

            // when
            let outcome = fixture.pipeline.handle_modified(&vehicle);

            // then
            assert_eq!(outcome, Outcome::Skipped);
        }
        assert!(fixture.push.batches().is_empty());

        Ok(())
    }

    #[test]
    fn empty_ward_is_a_normal_noop() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.register_user("u1", "8", Some("elsewhere"))?;
        fixture.record_status("v1", VehicleStatus::Inactive)?;
        let vehicle = Vehicle::new("v1", VehicleStatus::Active, "7");

        // when
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        assert_eq!(outcome, Outcome::NoRecipients);
        assert!(fixture.push.batches().is_empty());
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v1"))?,
            Some(VehicleStatus::Active)
        );

        Ok(())
    }

    #[test]
    fn rejected_tokens_are_sanitized() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(Arc::new(RejectingPush {
            rejected: Token::new("b"),
        }));
        fixture.register_user("u1", "7", Some("a"))?;
        fixture.register_user("u2", "7", Some("b"))?;
        fixture.record_status("v1", VehicleStatus::Inactive)?;
        let vehicle = Vehicle::new("v1", VehicleStatus::Active, "7");

        // when
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        assert_eq!(
            outcome,
            Outcome::Notified(DispatchSummary {
                success_count: 1,
                failed: vec![Token::new("b")],
            })
        );
        assert_eq!(
            fixture.user_read.tokens_in_ward(&WardId::new("7"))?,
            vec![Token::new("a")]
        );

        Ok(())
    }

    #[test]
    fn tracker_is_updated_even_when_dispatch_fails() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(Arc::new(BrokenPush));
        fixture.register_user("u1", "7", Some("a"))?;
        fixture.record_status("v1", VehicleStatus::Inactive)?;
        let vehicle = Vehicle::new("v1", VehicleStatus::Active, "7");

        // when
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        assert_matches!(outcome, Outcome::Notified(_));
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v1"))?,
            Some(VehicleStatus::Active)
        );

        // when the same update arrives again, previous status is no longer Inactive
        let outcome = fixture.pipeline.handle_modified(&vehicle);

        // then
        assert_eq!(outcome, Outcome::Skipped);

        Ok(())
    }

    #[test]
    fn rescan_refires_only_for_disagreeing_tracker() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.register_user("u1", "7", Some("a"))?;
        fixture.add_vehicle(Vehicle::new("tracked", VehicleStatus::Active, "7"))?;
        fixture.add_vehicle(Vehicle::new("stale", VehicleStatus::Active, "7"))?;
        fixture.add_vehicle(Vehicle::new("parked", VehicleStatus::Inactive, "7"))?;
        fixture.record_status("tracked", VehicleStatus::Active)?;
        fixture.record_status("stale", VehicleStatus::Inactive)?;

        // when
        let summary = fixture.pipeline.rescan();

        // then
        assert_eq!(
            summary,
            RescanSummary {
                scanned: 2,
                notified: 1,
            }
        );
        assert_eq!(fixture.push.batches().len(), 1);
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("stale"))?,
            Some(VehicleStatus::Active)
        );

        Ok(())
    }

    #[test]
    fn rescan_treats_missing_record_as_disagreement() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.register_user("u1", "7", Some("a"))?;
        fixture.add_vehicle(Vehicle::new("unseen", VehicleStatus::Active, "7"))?;

        // when
        let summary = fixture.pipeline.rescan();

        // then
        assert_eq!(summary.notified, 1);
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("unseen"))?,
            Some(VehicleStatus::Active)
        );

        Ok(())
    }

    #[test]
    fn initialize_tracking_seeds_record_per_vehicle() -> Result<()> {
        // given
        init_tracing();
        let fixture = Fixture::new(DeliveringPush::new());
        fixture.add_vehicle(Vehicle::new("v1", VehicleStatus::Active, "7"))?;
        fixture.add_vehicle(Vehicle::new("v2", VehicleStatus::Inactive, "8"))?;

        // when
        let summary = fixture.pipeline.initialize_tracking();

        // then
        assert_eq!(summary, InitSummary { seeded: 2 });
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v1"))?,
            Some(VehicleStatus::Active)
        );
        assert_eq!(
            fixture.tracker.previous_status(&VehicleId::new("v2"))?,
            Some(VehicleStatus::Inactive)
        );
        assert!(fixture.push.batches().is_empty());

        Ok(())
    }

    struct Fixture<P> {
        pipeline: NotificationPipeline,
        push: Arc<P>,
        tracker: Tracker,
        user_read: UserRead,
        user_write: UserWrite,
        vehicles: Arc<MemoryVehicleStore>,
    }

    impl<P: PushClient + 'static> Fixture<P> {
        fn new(push: Arc<P>) -> Self {
            let tracker: Tracker = Arc::new(MemoryTracker::new());
            let (user_read, user_write) = MemoryUserStore::create();
            let vehicles = Arc::new(MemoryVehicleStore::new());
            let pipeline = NotificationPipeline::new(
                Config::default(),
                tracker.clone(),
                user_read.clone(),
                user_write.clone(),
                vehicles.clone(),
                push.clone(),
            );
            Self {
                pipeline,
                push,
                tracker,
                user_read,
                user_write,
                vehicles,
            }
        }

        fn register_user(&self, id: &str, ward: &str, token: Option<&str>) -> Result<()> {
            self.user_write
                .register(UserRecord::new(id, ward, token.map(Token::new)))?;
            Ok(())
        }

        fn record_status(&self, vehicle: &str, status: VehicleStatus) -> Result<()> {
            self.tracker.set_status(&VehicleId::new(vehicle), status)?;
            Ok(())
        }

        fn add_vehicle(&self, vehicle: Vehicle) -> Result<()> {
            use crate::use_cases::vehicles::VehicleWriter;
            self.vehicles.upsert(vehicle)?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct DeliveringPush {
        batches: Mutex<Vec<Vec<Token>>>,
    }

    impl DeliveringPush {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn batches(&self) -> Vec<Vec<Token>> {
            self.batches.lock().expect("poisoned mutex").clone()
        }
    }

    impl PushClient for DeliveringPush {
        fn send_batch(
            &self,
            batch: &[Token],
            _notification: &Notification,
        ) -> Result<BatchResponse, PushErr> {
            self.batches
                .lock()
                .expect("poisoned mutex")
                .push(batch.to_vec());
            Ok(BatchResponse {
                statuses: vec![SendStatus::Delivered; batch.len()],
            })
        }
    }

    struct RejectingPush {
        rejected: Token,
    }

    impl PushClient for RejectingPush {
        fn send_batch(
            &self,
            batch: &[Token],
            _notification: &Notification,
        ) -> Result<BatchResponse, PushErr> {
            Ok(BatchResponse {
                statuses: batch
                    .iter()
                    .map(|token| {
                        if *token == self.rejected {
                            SendStatus::Rejected("unregistered".into())
                        } else {
                            SendStatus::Delivered
                        }
                    })
                    .collect(),
            })
        }
    }

    struct BrokenPush;

    impl PushClient for BrokenPush {
        fn send_batch(
            &self,
            _batch: &[Token],
            _notification: &Notification,
        ) -> Result<BatchResponse, PushErr> {
            Err(PushErr::Status(500))
        }
    }
}
