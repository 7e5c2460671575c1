use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::db::repository::RentalStore;
use crate::errors::RentalError;
use crate::models::booking::{BookingInput, DeletedBooking};
use crate::routes::with_deadline;
use crate::services::booking_service::BookingService;

pub async fn get_bookings<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, RentalError> {
    let service = BookingService::new(store.into_inner());
    let bookings = with_deadline(config.request_timeout, service.list_bookings()).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn get_booking_by_id<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = BookingService::new(store.into_inner());
    let booking = with_deadline(config.request_timeout, service.get_booking(&id)).await?;
    Ok(HttpResponse::Ok().json(booking))
}

pub async fn create_booking<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    input: web::Json<BookingInput>,
) -> Result<HttpResponse, RentalError> {
    let service = BookingService::new(store.into_inner());
    let booking =
        with_deadline(config.request_timeout, service.create_booking(input.into_inner())).await?;
    Ok(HttpResponse::Created().json(booking))
}

pub async fn edit_booking<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    input: web::Json<BookingInput>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = BookingService::new(store.into_inner());
    let booking = with_deadline(
        config.request_timeout,
        service.edit_booking(&id, input.into_inner()),
    )
    .await?;
    Ok(HttpResponse::Ok().json(booking))
}

pub async fn delete_booking<S: RentalStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, RentalError> {
    let id = path.into_inner();
    let service = BookingService::new(store.into_inner());
    let booking = with_deadline(config.request_timeout, service.delete_booking(&id)).await?;
    Ok(HttpResponse::Ok().json(DeletedBooking {
        booking,
        message: "Your booking has been successfully deleted".to_string(),
    }))
}
