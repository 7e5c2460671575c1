use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::AppConfig;
use crate::db::repository::Repository;
use crate::errors::RentalError;
use crate::models::Resource;
use crate::routes::with_deadline;
use crate::services::master_data_service::MasterDataService;

pub async fn list<S, T>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, RentalError>
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    let service = MasterDataService::<S, T>::new(store.into_inner());
    let records = with_deadline(config.request_timeout, service.list()).await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn get_by_id<S, T>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError>
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    let id = path.into_inner();
    let service = MasterDataService::<S, T>::new(store.into_inner());
    let record = with_deadline(config.request_timeout, service.get(&id)).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn create<S, T>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    input: web::Json<T::Input>,
) -> Result<HttpResponse, RentalError>
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    let service = MasterDataService::<S, T>::new(store.into_inner());
    let record = with_deadline(config.request_timeout, service.create(input.into_inner())).await?;
    Ok(HttpResponse::Created().json(record))
}

pub async fn update<S, T>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    input: web::Json<T::Input>,
) -> Result<HttpResponse, RentalError>
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    let id = path.into_inner();
    let service = MasterDataService::<S, T>::new(store.into_inner());
    let record =
        with_deadline(config.request_timeout, service.update(&id, input.into_inner())).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn delete<S, T>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError>
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    let id = path.into_inner();
    let service = MasterDataService::<S, T>::new(store.into_inner());
    let record = with_deadline(config.request_timeout, service.delete(&id)).await?;
    Ok(HttpResponse::Ok().json(json!({
        "deleted": record,
        "message": "Record has been successfully deleted",
    })))
}
