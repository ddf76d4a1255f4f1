#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use trip_planner_api::config::LatencyConfig;
use trip_planner_api::db::{KeyValueStore, MemoryStore};
use trip_planner_api::error::GenerationError;
use trip_planner_api::models::itinerary::ItineraryPlan;
use trip_planner_api::models::planner::{Budget, PlannerOptions};
use trip_planner_api::routes;
use trip_planner_api::services::fault_injection::{FaultInjector, FaultPoint};
use trip_planner_api::services::gemini_service::{GenerationProvider, GenerationRequest};
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use trip_planner_api::state::AppState;

/// Fault injector the test flips between the success and failure paths.
#[derive(Default)]
pub struct FaultSwitch {
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

impl FaultSwitch {
    pub fn fail_creates(&self, on: bool) {
        self.fail_create.store(on, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, on: bool) {
        self.fail_delete.store(on, Ordering::SeqCst);
    }
}

impl FaultInjector for FaultSwitch {
    fn should_fail(&self, point: FaultPoint) -> bool {
        match point {
            FaultPoint::CreateTrip => self.fail_create.load(Ordering::SeqCst),
            FaultPoint::DeleteTrip => self.fail_delete.load(Ordering::SeqCst),
        }
    }
}

/// Provider that answers like a well-behaved model would.
#[derive(Default)]
pub struct ScriptedProvider {
    pub calls: AtomicUsize,
    pub reply_with_garbage: AtomicBool,
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reply_with_garbage.load(Ordering::SeqCst) {
            return Ok("I'm sorry, I can't produce JSON today.".to_string());
        }

        let days = requested_days(&request.prompt);
        Ok(serde_json::to_string(&model_plan(days)).unwrap())
    }
}

fn requested_days(prompt: &str) -> u32 {
    prompt
        .split("for exactly ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

pub fn model_plan(days: u32) -> ItineraryPlan {
    serde_json::from_value(serde_json::json!({
        "destination": "Paris",
        "totalDays": days,
        "flightSuggestion": { "airline": "Air France", "details": "Non-stop from JFK" },
        "itinerary": (1..=days).map(|day| serde_json::json!({
            "day": day,
            "theme": format!("Paris day {}", day),
            "morning": { "activity": "Louvre", "description": "Early entry" },
            "afternoon": { "activity": "Seine walk", "description": "Left bank" },
            "evening": { "activity": "Opera", "description": "Palais Garnier" },
            "hotelSuggestion": {
                "name": "Le Meurice",
                "priceRange": "$$$$",
                "rating": 5,
                "details": "Palace hotel on Rue de Rivoli"
            },
            "restaurantSuggestions": [
                { "name": "Le Cinq", "cuisine": "French", "priceRange": "$$$$", "rating": 5 },
                { "name": "Septime", "cuisine": "Modern French", "priceRange": "$$$", "rating": 4.5 }
            ]
        })).collect::<Vec<_>>()
    }))
    .unwrap()
}

pub fn paris_options() -> PlannerOptions {
    PlannerOptions {
        destination: "Paris".to_string(),
        duration: 3,
        budget: Budget::Luxury,
        interests: vec!["History".to_string()],
    }
}

pub fn options_for(destination: &str, duration: u32) -> PlannerOptions {
    PlannerOptions {
        destination: destination.to_string(),
        duration,
        budget: Budget::MidRange,
        interests: vec!["Foodie".to_string(), "Nature".to_string()],
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub faults: Arc<FaultSwitch>,
    pub provider: Arc<ScriptedProvider>,
}

impl TestApp {
    /// App using the canned offline plan.
    pub fn offline() -> Self {
        Self::build(false)
    }

    /// App whose generator talks to [`ScriptedProvider`].
    pub fn with_provider() -> Self {
        Self::build(true)
    }

    fn build(use_provider: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let faults = Arc::new(FaultSwitch::default());
        let provider = Arc::new(ScriptedProvider::default());

        let generator = if use_provider {
            ItineraryGenerator::new(Some(provider.clone() as Arc<dyn GenerationProvider>))
        } else {
            ItineraryGenerator::offline()
        };

        let state = AppState::new(
            store.clone() as Arc<dyn KeyValueStore>,
            generator,
            faults.clone() as Arc<dyn FaultInjector>,
            LatencyConfig::none(),
        );

        Self {
            state,
            store,
            faults,
            provider,
        }
    }

    pub async fn signed_in(self) -> Self {
        self.state
            .sessions
            .login("test@example.com", "password123")
            .await
            .unwrap();
        self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::configure)
    }
}
