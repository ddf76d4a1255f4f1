use serde::{Deserialize, Serialize};

pub const MIN_RESTAURANTS_PER_DAY: usize = 2;
const MIN_RATING: f32 = 1.0;
const MAX_RATING: f32 = 5.0;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub activity: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelSuggestion {
    pub name: String,
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FlightSuggestion {
    pub airline: String,
    pub details: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub theme: String,
    pub morning: Activity,
    pub afternoon: Activity,
    pub evening: Activity,
    pub hotel_suggestion: HotelSuggestion,
    pub restaurant_suggestions: Vec<RestaurantSuggestion>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPlan {
    pub destination: String,
    pub total_days: u32,
    pub flight_suggestion: FlightSuggestion,
    pub itinerary: Vec<DayPlan>,
}

impl ItineraryPlan {
    /// Checks a plan against the number of days that was asked for.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self, expected_days: u32) -> Result<(), String> {
        if self.total_days != expected_days {
            return Err(format!(
                "totalDays is {} but {} days were requested",
                self.total_days, expected_days
            ));
        }
        if self.itinerary.len() != expected_days as usize {
            return Err(format!(
                "itinerary has {} days but {} were requested",
                self.itinerary.len(),
                expected_days
            ));
        }
        if self.flight_suggestion.airline.trim().is_empty() {
            return Err("flight suggestion has no airline".to_string());
        }

        for (index, day) in self.itinerary.iter().enumerate() {
            let expected = index as u32 + 1;
            if day.day != expected {
                return Err(format!("day {} found where day {} was expected", day.day, expected));
            }
            day.check()?;
        }

        Ok(())
    }

    /// Whether every day suggests the same hotel.
    pub fn has_consistent_hotel(&self) -> bool {
        match self.itinerary.first() {
            Some(first) => self
                .itinerary
                .iter()
                .all(|day| day.hotel_suggestion.name == first.hotel_suggestion.name),
            None => true,
        }
    }
}

impl DayPlan {
    fn check(&self) -> Result<(), String> {
        let day = self.day;
        if self.theme.trim().is_empty() {
            return Err(format!("day {} has no theme", day));
        }
        for (slot, activity) in [
            ("morning", &self.morning),
            ("afternoon", &self.afternoon),
            ("evening", &self.evening),
        ] {
            if activity.activity.trim().is_empty() {
                return Err(format!("day {} has an empty {} activity", day, slot));
            }
        }

        if self.hotel_suggestion.name.trim().is_empty() {
            return Err(format!("day {} hotel has no name", day));
        }
        check_rating(self.hotel_suggestion.rating, day, "hotel")?;

        if self.restaurant_suggestions.len() < MIN_RESTAURANTS_PER_DAY {
            return Err(format!(
                "day {} has {} restaurant suggestions, at least {} required",
                day,
                self.restaurant_suggestions.len(),
                MIN_RESTAURANTS_PER_DAY
            ));
        }
        for restaurant in &self.restaurant_suggestions {
            if restaurant.name.trim().is_empty() {
                return Err(format!("day {} has a restaurant without a name", day));
            }
            check_rating(restaurant.rating, day, "restaurant")?;
        }

        Ok(())
    }
}

fn check_rating(rating: Option<f32>, day: u32, what: &str) -> Result<(), String> {
    match rating {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => {
            Err(format!("day {} {} rating {} is outside 1-5", day, what, r))
        }
        _ => Ok(()),
    }
}
