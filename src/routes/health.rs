use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::db::repository::StoreHealth;

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

pub async fn health_check<S: StoreHealth + 'static>(store: web::Data<S>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_store(store.get_ref()).await;
    if store_result.status != "ok" {
        health.status = "degraded".to_string();
    }
    health.services.insert("store".to_string(), store_result);

    HttpResponse::Ok().json(health)
}

async fn check_store<S: StoreHealth>(store: &S) -> ServiceStatus {
    match store.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Store reachable".to_string()),
        },
        Err(e) => {
            log::error!("Store health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach store: {}", e)),
            }
        }
    }
}
