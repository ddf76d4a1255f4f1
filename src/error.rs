use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Rejected planner input. Raised before anything reaches the generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Destination is required")]
    EmptyDestination,

    #[error("Duration must be between {min} and {max} days, got {got}")]
    DurationOutOfRange { got: u32, min: u32, max: u32 },

    #[error("Select at least one interest")]
    NoInterests,

    #[error("Interests cannot be blank")]
    BlankInterest,

    #[error("Interest listed more than once: {0}")]
    DuplicateInterest(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("The AI model is currently busy. Please try again.")]
    ModelBusy,

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Invalid JSON response from the model: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Itinerary does not match the requested plan: {0}")]
    SchemaViolation(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Stored record has version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Errors surfaced by the session and trip services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    GenerationFailed(#[from] GenerationError),

    #[error("Failed to sync deletion with the server.")]
    Sync { trip_id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by the optimistic mutation controller.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Another trip change is still in progress")]
    MutationPending,

    #[error("Trip not found: {0}")]
    UnknownTrip(String),

    #[error("There is no failed plan to retry")]
    NothingToRetry,

    #[error("Trip change did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn error_body(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredentials | ServiceError::NotAuthenticated => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Sync { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Storage(err) = self {
            log::error!("Storage failure: {}", err);
        }
        error_body(self.status_code(), self.to_string())
    }
}

impl ResponseError for BoardError {
    fn status_code(&self) -> StatusCode {
        match self {
            BoardError::MutationPending => StatusCode::CONFLICT,
            BoardError::UnknownTrip(_) => StatusCode::NOT_FOUND,
            BoardError::NothingToRetry => StatusCode::BAD_REQUEST,
            BoardError::Interrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BoardError::Service(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            BoardError::Service(err) => err.error_response(),
            _ => error_body(self.status_code(), self.to_string()),
        }
    }
}
