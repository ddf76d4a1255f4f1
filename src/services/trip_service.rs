use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::{simulate, LatencyConfig};
use crate::db::{load_record, save_record, KeyValueStore, TRIPS_KEY};
use crate::error::{GenerationError, ServiceError};
use crate::models::{planner::PlannerOptions, trip::Trip};
use crate::services::fault_injection::{FaultInjector, FaultPoint};
use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::session_service::SessionService;

/// Saved trips, newest first, persisted as one list under [`TRIPS_KEY`].
///
/// Every mutation rewrites the whole list. Writers inside this process are
/// serialized; separate processes sharing a data directory overwrite each
/// other (last write wins).
pub struct TripService {
    store: Arc<dyn KeyValueStore>,
    sessions: Arc<SessionService>,
    generator: Arc<ItineraryGenerator>,
    faults: Arc<dyn FaultInjector>,
    latency: LatencyConfig,
    write_lock: Mutex<()>,
}

impl TripService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        sessions: Arc<SessionService>,
        generator: Arc<ItineraryGenerator>,
        faults: Arc<dyn FaultInjector>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            store,
            sessions,
            generator,
            faults,
            latency,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Trip>, ServiceError> {
        simulate(self.latency.list_trips).await;
        self.read_trips().await
    }

    pub async fn get(&self, trip_id: &str) -> Result<Option<Trip>, ServiceError> {
        let trips = self.read_trips().await?;
        Ok(trips.into_iter().find(|trip| trip.id == trip_id))
    }

    pub async fn create(&self, options: PlannerOptions) -> Result<Trip, ServiceError> {
        options.validate()?;
        log::info!(
            "Generating travel plan: {} days in {} ({}, interests: {})",
            options.duration,
            options.destination,
            options.budget,
            options.interests.join(", ")
        );

        if self.faults.should_fail(FaultPoint::CreateTrip) {
            log::info!("Simulating trip creation failure");
            simulate(self.latency.failed_create).await;
            return Err(GenerationError::ModelBusy.into());
        }

        let plan = self.generator.generate(&options).await?;
        let user = self.sessions.get_me().await?;

        let _guard = self.write_lock.lock().await;
        let mut trips = self.read_trips().await?;
        let trip = Trip::new(options, plan, &user);
        trips.insert(0, trip.clone());
        save_record(self.store.as_ref(), TRIPS_KEY, &trips).await?;

        log::info!("Created trip {} for user {}", trip.id, user.id);
        Ok(trip)
    }

    /// Deleting an unknown id is a no-op. A simulated sync failure leaves the
    /// stored list untouched; restoring any optimistic client state is up to
    /// the caller.
    pub async fn remove(&self, trip_id: &str) -> Result<(), ServiceError> {
        simulate(self.latency.delete_trip).await;

        if self.faults.should_fail(FaultPoint::DeleteTrip) {
            log::info!("Simulating deletion failure for trip {}", trip_id);
            return Err(ServiceError::Sync {
                trip_id: trip_id.to_string(),
            });
        }

        let _guard = self.write_lock.lock().await;
        let mut trips = self.read_trips().await?;
        let before = trips.len();
        trips.retain(|trip| trip.id != trip_id);

        if trips.len() == before {
            log::debug!("Trip {} was already gone", trip_id);
            return Ok(());
        }

        save_record(self.store.as_ref(), TRIPS_KEY, &trips).await?;
        log::info!("Successfully deleted trip {}", trip_id);
        Ok(())
    }

    async fn read_trips(&self) -> Result<Vec<Trip>, ServiceError> {
        Ok(load_record::<Vec<Trip>>(self.store.as_ref(), TRIPS_KEY)
            .await?
            .unwrap_or_default())
    }
}
