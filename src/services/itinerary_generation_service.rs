use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::GeminiConfig;
use crate::error::GenerationError;
use crate::models::{
    itinerary::{
        Activity, DayPlan, FlightSuggestion, HotelSuggestion, ItineraryPlan, RestaurantSuggestion,
    },
    planner::PlannerOptions,
};
use crate::services::gemini_service::{GeminiService, GenerationProvider, GenerationRequest};

const DEFAULT_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct ItineraryGenerationConfig {
    pub model: String,
    pub temperature: f32,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Turns planner options into an [`ItineraryPlan`], either through the
/// generation provider or, when none is configured, from canned content.
pub struct ItineraryGenerator {
    provider: Option<Arc<dyn GenerationProvider>>,
    config: ItineraryGenerationConfig,
}

impl ItineraryGenerator {
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self::with_config(provider, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        provider: Option<Arc<dyn GenerationProvider>>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self { provider, config }
    }

    /// Generator without a provider. Always answers with the mock plan.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn from_gemini_config(gemini: &GeminiConfig) -> Self {
        let provider = match GeminiService::from_config(gemini) {
            Some(service) => {
                log::info!("Itinerary generation using Gemini model {}", gemini.model);
                Some(Arc::new(service) as Arc<dyn GenerationProvider>)
            }
            None => {
                log::warn!("API key not found. Itineraries will use mock data.");
                None
            }
        };

        Self::with_config(
            provider,
            ItineraryGenerationConfig {
                model: gemini.model.clone(),
                temperature: gemini.temperature,
            },
        )
    }

    pub fn is_mock(&self) -> bool {
        self.provider.is_none()
    }

    /// Options are expected to be validated already.
    pub async fn generate(&self, options: &PlannerOptions) -> Result<ItineraryPlan, GenerationError> {
        let Some(provider) = &self.provider else {
            log::debug!("No generation provider configured, using mock plan");
            return Ok(mock_plan(options));
        };

        let request = self.build_request(options);
        log::info!(
            "Generating {}-day itinerary for {} with {}",
            options.duration,
            options.destination,
            request.model
        );

        let text = provider.generate(&request).await?;
        parse_plan(&text, options)
    }

    pub fn build_request(&self, options: &PlannerOptions) -> GenerationRequest {
        GenerationRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(options),
            response_schema: response_schema(),
            temperature: self.config.temperature,
        }
    }
}

pub fn build_prompt(options: &PlannerOptions) -> String {
    let PlannerOptions {
        destination,
        duration,
        budget,
        interests,
    } = options;

    format!(
        "You are an expert travel planner. Create a detailed, day-by-day travel itinerary for a trip to {destination} for exactly {duration} days.\n\
         The traveler's budget is {budget} and their interests include: {interests}.\n\
         For each day, provide a theme, and suggest activities for the morning, afternoon, and evening with detailed descriptions.\n\
         Also, suggest ONE hotel suitable for the entire trip with details like a star rating (1-5).\n\
         For each day, suggest at least TWO different restaurants that match the {budget} budget with details like cuisine type and a star rating (1-5).\n\
         Finally, suggest a suitable airline for the trip with brief details.\n\
         The hotel suggestion should be consistent across all days in the itinerary array.",
        interests = interests.join(", "),
    )
}

fn activity_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "activity": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["activity", "description"]
    })
}

/// Structured-output schema for [`ItineraryPlan`] in the provider's type
/// vocabulary.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destination": { "type": "STRING" },
            "totalDays": { "type": "INTEGER" },
            "flightSuggestion": {
                "type": "OBJECT",
                "properties": {
                    "airline": { "type": "STRING" },
                    "details": { "type": "STRING" }
                },
                "required": ["airline", "details"]
            },
            "itinerary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "theme": { "type": "STRING" },
                        "morning": activity_schema(),
                        "afternoon": activity_schema(),
                        "evening": activity_schema(),
                        "hotelSuggestion": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "priceRange": { "type": "STRING" },
                                "rating": { "type": "NUMBER" },
                                "details": { "type": "STRING" }
                            },
                            "required": ["name", "priceRange"]
                        },
                        "restaurantSuggestions": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "cuisine": { "type": "STRING" },
                                    "priceRange": { "type": "STRING" },
                                    "rating": { "type": "NUMBER" },
                                    "details": { "type": "STRING" }
                                },
                                "required": ["name", "cuisine", "priceRange"]
                            }
                        }
                    },
                    "required": [
                        "day", "theme", "morning", "afternoon", "evening",
                        "hotelSuggestion", "restaurantSuggestions"
                    ]
                }
            }
        },
        "required": ["destination", "totalDays", "itinerary", "flightSuggestion"]
    })
}

/// Parses provider output and checks it against the requested options.
pub fn parse_plan(text: &str, options: &PlannerOptions) -> Result<ItineraryPlan, GenerationError> {
    let plan: ItineraryPlan = serde_json::from_str(text.trim()).map_err(|e| {
        log::error!("Failed to parse JSON response: {}", text);
        GenerationError::InvalidJson(e)
    })?;

    plan.check(options.duration)
        .map_err(GenerationError::SchemaViolation)?;

    if !plan.has_consistent_hotel() {
        log::warn!(
            "Generated itinerary for {} suggests different hotels on different days",
            plan.destination
        );
    }

    Ok(plan)
}

/// Deterministic placeholder plan used when no provider is configured.
pub fn mock_plan(options: &PlannerOptions) -> ItineraryPlan {
    let focus = options
        .interests
        .first()
        .map(String::as_str)
        .unwrap_or("the city");

    ItineraryPlan {
        destination: options.destination.clone(),
        total_days: options.duration,
        flight_suggestion: FlightSuggestion {
            airline: "MockAir".to_string(),
            details: "Direct flight, 8 hours.".to_string(),
        },
        itinerary: (1..=options.duration)
            .map(|day| DayPlan {
                day,
                theme: format!("Exploring {}", focus),
                morning: Activity {
                    activity: "Visit a local landmark".to_string(),
                    description: "A beautiful and historic site.".to_string(),
                },
                afternoon: Activity {
                    activity: "Lunch at a cafe".to_string(),
                    description: "Enjoy local cuisine.".to_string(),
                },
                evening: Activity {
                    activity: "Evening stroll".to_string(),
                    description: "Relax and enjoy the city lights.".to_string(),
                },
                hotel_suggestion: HotelSuggestion {
                    name: "The Grand Mock Hotel".to_string(),
                    price_range: "$$$-$$$$".to_string(),
                    rating: Some(5.0),
                    details: Some("5-star luxury hotel.".to_string()),
                },
                restaurant_suggestions: vec![
                    RestaurantSuggestion {
                        name: "The Mock Bistro".to_string(),
                        cuisine: Some("International".to_string()),
                        price_range: "$$$".to_string(),
                        rating: Some(4.0),
                        details: None,
                    },
                    RestaurantSuggestion {
                        name: "Local Eats Mock".to_string(),
                        cuisine: Some("Local".to_string()),
                        price_range: "$$".to_string(),
                        rating: Some(5.0),
                        details: None,
                    },
                ],
            })
            .collect(),
    }
}
