use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;

/// Interest tags offered by the planner form. Other tags are accepted too.
pub const INTEREST_OPTIONS: [&str; 8] = [
    "History",
    "Art & Culture",
    "Foodie",
    "Adventure",
    "Nature",
    "Shopping",
    "Nightlife",
    "Relaxation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Budget {
    #[serde(rename = "Budget-Friendly")]
    BudgetFriendly,
    #[serde(rename = "Mid-Range")]
    MidRange,
    #[serde(rename = "Luxury")]
    Luxury,
}

impl Budget {
    pub const ALL: [Budget; 3] = [Budget::BudgetFriendly, Budget::MidRange, Budget::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::BudgetFriendly => "Budget-Friendly",
            Budget::MidRange => "Mid-Range",
            Budget::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerOptions {
    pub destination: String,
    pub duration: u32,
    pub budget: Budget,
    pub interests: Vec<String>,
}

impl PlannerOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::EmptyDestination);
        }

        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration) {
            return Err(ValidationError::DurationOutOfRange {
                got: self.duration,
                min: MIN_DURATION_DAYS,
                max: MAX_DURATION_DAYS,
            });
        }

        if self.interests.is_empty() {
            return Err(ValidationError::NoInterests);
        }

        let mut seen = HashSet::new();
        for interest in &self.interests {
            let tag = interest.trim();
            if tag.is_empty() {
                return Err(ValidationError::BlankInterest);
            }
            if !seen.insert(tag.to_lowercase()) {
                return Err(ValidationError::DuplicateInterest(tag.to_string()));
            }
        }

        Ok(())
    }
}

/// What the planner form needs to render its inputs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerCatalog {
    pub budgets: Vec<Budget>,
    pub interests: Vec<&'static str>,
    pub min_duration: u32,
    pub max_duration: u32,
}

impl Default for PlannerCatalog {
    fn default() -> Self {
        Self {
            budgets: Budget::ALL.to_vec(),
            interests: INTEREST_OPTIONS.to_vec(),
            min_duration: MIN_DURATION_DAYS,
            max_duration: MAX_DURATION_DAYS,
        }
    }
}
