use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::db::repository::RentalStore;
use crate::errors::RentalError;
use crate::models::customer::MembershipAssignment;
use crate::routes::with_deadline;
use crate::services::customer_service::CustomerService;

pub async fn assign_membership<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    input: web::Json<MembershipAssignment>,
) -> Result<HttpResponse, RentalError> {
    let customer_id = path.into_inner();
    let service = CustomerService::new(store.into_inner());
    let customer = with_deadline(
        config.request_timeout,
        service.assign_membership(&customer_id, &input.membership_id),
    )
    .await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn remove_membership<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let customer_id = path.into_inner();
    let service = CustomerService::new(store.into_inner());
    let customer =
        with_deadline(config.request_timeout, service.remove_membership(&customer_id)).await?;
    Ok(HttpResponse::Ok().json(customer))
}
