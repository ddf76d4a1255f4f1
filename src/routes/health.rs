use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::db::USER_KEY;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: state.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let storage_result = check_storage(&state).await;
    health
        .services
        .insert("storage".to_string(), storage_result.clone());

    let generator_result = check_generator(&state);
    health
        .services
        .insert("generator".to_string(), generator_result);

    if storage_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_storage(state: &AppState) -> ServiceStatus {
    match state.store.get(USER_KEY).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} backend", state.store.backend())),
        },
        Err(e) => {
            log::error!("Storage health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(e.to_string()),
            }
        }
    }
}

fn check_generator(state: &AppState) -> ServiceStatus {
    let mode = if state.generator.is_mock() { "mock" } else { "gemini" };
    ServiceStatus {
        status: "ok".to_string(),
        details: Some(mode.to_string()),
    }
}
