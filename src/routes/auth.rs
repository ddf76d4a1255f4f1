use actix_web::{web, HttpResponse, Responder};

use crate::error::ServiceError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::user::{LoginRequest, UserResponse};
use crate::state::AppState;

/*
    /api/auth/login
*/
pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let LoginRequest { email, password } = input.into_inner();
    let user = state.sessions.login(&email, &password).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/*
    /api/auth/logout
*/
pub async fn logout(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    state.sessions.logout().await?;
    state.dashboard.reset().await;
    Ok(HttpResponse::NoContent().finish())
}

/*
    /api/auth/me
*/
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse { user: user.0 })
}
