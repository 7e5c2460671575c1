use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::AppConfig;
use crate::db::repository::RentalStore;
use crate::errors::RentalError;
use crate::models::driver_incentive::DriverIncentiveInput;
use crate::routes::with_deadline;
use crate::services::incentive_service::IncentiveService;

pub async fn get_incentives<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, RentalError> {
    let service = IncentiveService::new(store.into_inner());
    let incentives = with_deadline(config.request_timeout, service.list()).await?;
    Ok(HttpResponse::Ok().json(incentives))
}

pub async fn get_incentive_by_id<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = IncentiveService::new(store.into_inner());
    let incentive = with_deadline(config.request_timeout, service.get(&id)).await?;
    Ok(HttpResponse::Ok().json(incentive))
}

pub async fn create_incentive<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    input: web::Json<DriverIncentiveInput>,
) -> Result<HttpResponse, RentalError> {
    let service = IncentiveService::new(store.into_inner());
    let incentive =
        with_deadline(config.request_timeout, service.create(input.into_inner())).await?;
    Ok(HttpResponse::Created().json(incentive))
}

pub async fn update_incentive<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    input: web::Json<DriverIncentiveInput>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = IncentiveService::new(store.into_inner());
    let incentive =
        with_deadline(config.request_timeout, service.update(&id, input.into_inner())).await?;
    Ok(HttpResponse::Ok().json(incentive))
}

pub async fn delete_incentive<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = IncentiveService::new(store.into_inner());
    let incentive = with_deadline(config.request_timeout, service.delete(&id)).await?;
    Ok(HttpResponse::Ok().json(json!({
        "driver_incentive": incentive,
        "message": "Driver incentive has been successfully deleted",
    })))
}

pub async fn get_incentives_by_driver<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let driver_id = path.into_inner();
    let service = IncentiveService::new(store.into_inner());
    let incentives =
        with_deadline(config.request_timeout, service.list_by_driver(&driver_id)).await?;
    Ok(HttpResponse::Ok().json(incentives))
}

pub async fn get_total_by_driver<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let driver_id = path.into_inner();
    let service = IncentiveService::new(store.into_inner());
    let total = with_deadline(config.request_timeout, service.total_by_driver(&driver_id)).await?;
    Ok(HttpResponse::Ok().json(total))
}
