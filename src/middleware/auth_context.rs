use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::error::ServiceError;
use crate::models::user::User;
use crate::state::AppState;

/// The signed-in user. Handlers taking this extractor answer 401 when there
/// is no session.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                log::error!("AppState is not registered with the app");
                actix_web::error::ErrorInternalServerError("Server misconfigured")
            })?;

            match state.sessions.get_me().await {
                Ok(user) => Ok(AuthenticatedUser(user)),
                Err(ServiceError::NotAuthenticated) => Err(ServiceError::NotAuthenticated.into()),
                Err(err) => {
                    log::error!("Session lookup failed: {}", err);
                    Err(err.into())
                }
            }
        })
    }
}
