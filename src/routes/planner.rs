use actix_web::{HttpResponse, Responder};

use crate::models::planner::PlannerCatalog;

/*
    /api/planner/options
*/
pub async fn options() -> impl Responder {
    HttpResponse::Ok().json(PlannerCatalog::default())
}
