pub mod dashboard_service;
pub mod fault_injection;
pub mod gemini_service;
pub mod itinerary_generation_service;
pub mod session_service;
pub mod trip_board;
pub mod trip_service;
