use actix_web::web;

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod planner;
pub mod trips;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout))
                        .route("/me", web::get().to(auth::me)),
                )
                .route("/planner/options", web::get().to(planner::options))
                .service(
                    web::scope("/trips")
                        .route("", web::get().to(trips::list))
                        .route("", web::post().to(trips::create))
                        .route("/{id}", web::get().to(trips::get_by_id))
                        .route("/{id}", web::delete().to(trips::delete)),
                )
                .service(
                    web::scope("/dashboard")
                        .route("", web::get().to(dashboard::view))
                        .route("/refresh", web::post().to(dashboard::refresh))
                        .route("/trips", web::post().to(dashboard::create_trip))
                        .route("/trips/{id}", web::delete().to(dashboard::delete_trip))
                        .route("/retry", web::post().to(dashboard::retry))
                        .route("/selection/{id}", web::put().to(dashboard::select)),
                ),
        );
}
