use std::sync::Arc;

use crate::config::{AppConfig, LatencyConfig, StorageBackend};
use crate::db::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::services::{
    dashboard_service::DashboardService,
    fault_injection::{FaultInjector, RandomFaults},
    itinerary_generation_service::ItineraryGenerator,
    session_service::SessionService,
    trip_service::TripService,
};

/// Services shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub generator: Arc<ItineraryGenerator>,
    pub sessions: Arc<SessionService>,
    pub trips: Arc<TripService>,
    pub dashboard: Arc<DashboardService>,
    pub environment: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: ItineraryGenerator,
        faults: Arc<dyn FaultInjector>,
        latency: LatencyConfig,
    ) -> Self {
        let generator = Arc::new(generator);
        let sessions = Arc::new(SessionService::new(store.clone(), latency));
        let trips = Arc::new(TripService::new(
            store.clone(),
            sessions.clone(),
            generator.clone(),
            faults,
            latency,
        ));
        let dashboard = Arc::new(DashboardService::new(trips.clone()));

        Self {
            store,
            generator,
            sessions,
            trips,
            dashboard,
            environment: "development".to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match &config.storage {
            StorageBackend::File(dir) => {
                log::info!("Storing trips under {}", dir.display());
                Arc::new(JsonFileStore::new(dir.clone()))
            }
            StorageBackend::Memory => {
                log::info!("Using in-memory storage, trips are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        let faults = Arc::new(RandomFaults::new(
            config.create_failure_rate,
            config.delete_failure_rate,
        ));

        let mut state = Self::new(
            store,
            ItineraryGenerator::from_gemini_config(&config.gemini),
            faults,
            config.latency,
        );
        state.environment = config.environment.clone();
        state
    }
}
