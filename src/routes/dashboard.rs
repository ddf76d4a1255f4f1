use actix_web::{web, HttpResponse};

use crate::error::BoardError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::planner::PlannerOptions;
use crate::state::AppState;

/*
    /api/dashboard
*/
pub async fn view(_user: AuthenticatedUser, state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.view().await)
}

/*
    /api/dashboard/refresh
*/
pub async fn refresh(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BoardError> {
    let view = state.dashboard.refresh().await?;
    Ok(HttpResponse::Ok().json(view))
}

/*
    /api/dashboard/trips (POST)
    Generation failures come back in the view with a retry action.
*/
pub async fn create_trip(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
    input: web::Json<PlannerOptions>,
) -> Result<HttpResponse, BoardError> {
    let view = state.dashboard.create_trip(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/*
    /api/dashboard/retry
*/
pub async fn retry(
    _user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BoardError> {
    let view = state.dashboard.retry().await?;
    Ok(HttpResponse::Ok().json(view))
}

/*
    /api/dashboard/selection/{id}
*/
pub async fn select(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BoardError> {
    let view = state.dashboard.select(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/*
    /api/dashboard/trips/{id} (DELETE)
    A failed sync rolls the list back; the view carries the notice.
*/
pub async fn delete_trip(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BoardError> {
    let view = state.dashboard.delete_trip(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}
