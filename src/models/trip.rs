use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::itinerary::ItineraryPlan;
use crate::models::planner::{Budget, PlannerOptions};
use crate::models::user::User;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub duration: u32,
    pub budget: Budget,
    pub interests: Vec<String>,
    pub itinerary_json: ItineraryPlan,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(options: PlannerOptions, plan: ItineraryPlan, owner: &User) -> Self {
        Self {
            id: format!("trip_{}", Uuid::new_v4().simple()),
            destination: options.destination,
            duration: options.duration,
            budget: options.budget,
            interests: options.interests,
            itinerary_json: plan,
            user_id: owner.id.clone(),
            created_at: Utc::now(),
        }
    }

    /// The options this trip was planned from, for replaying a request.
    pub fn planner_options(&self) -> PlannerOptions {
        PlannerOptions {
            destination: self.destination.clone(),
            duration: self.duration,
            budget: self.budget,
            interests: self.interests.clone(),
        }
    }
}
