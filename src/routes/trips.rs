use actix_web::{web, HttpResponse};

use crate::error::ServiceError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::planner::PlannerOptions;
use crate::state::AppState;

/*
    /api/trips
*/
pub async fn list(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    let trips = state.trips.list().await?;
    Ok(HttpResponse::Ok().json(trips))
}

/*
    /api/trips (POST)
*/
pub async fn create(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    input: web::Json<PlannerOptions>,
) -> Result<HttpResponse, ServiceError> {
    let trip = state.trips.create(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(trip))
}

/*
    /api/trips/{id}
*/
pub async fn get_by_id(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    match state.trips.get(&path.into_inner()).await? {
        Some(trip) => Ok(HttpResponse::Ok().json(trip)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({ "error": "Trip not found" }))),
    }
}

/*
    /api/trips/{id} (DELETE)
*/
pub async fn delete(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServiceError> {
    state.trips.remove(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
