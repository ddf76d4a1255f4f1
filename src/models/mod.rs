pub mod itinerary;
pub mod planner;
pub mod trip;
pub mod user;
