use actix_web::{error::JsonPayloadError, web, HttpRequest, Scope};
use std::future::Future;
use std::time::Duration;

use crate::db::repository::{RentalStore, Repository};
use crate::errors::RentalError;
use crate::models::{
    booking_type::BookingType, car::Car, customer::Customer, driver::Driver,
    membership::Membership, Resource,
};

pub mod bookings;
pub mod customers;
pub mod driver_incentives;
pub mod health;
pub mod master_data;

/// Mounts every route of the API for the given store type.
pub fn configure<S: RentalStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check::<S>))
        .service(resource_scope::<S, Car>("/cars"))
        .service(resource_scope::<S, Driver>("/drivers"))
        .service(resource_scope::<S, Membership>("/memberships"))
        .service(resource_scope::<S, BookingType>("/bookingtypes"))
        .service(
            resource_scope::<S, Customer>("/customers")
                .route(
                    "/{id}/membership",
                    web::put().to(customers::assign_membership::<S>),
                )
                .route(
                    "/{id}/membership",
                    web::delete().to(customers::remove_membership::<S>),
                ),
        )
        .service(
            web::scope("/bookings")
                .route("", web::get().to(bookings::get_bookings::<S>))
                .route("", web::post().to(bookings::create_booking::<S>))
                .route("/{id}", web::get().to(bookings::get_booking_by_id::<S>))
                .route("/{id}", web::put().to(bookings::edit_booking::<S>))
                .route("/{id}", web::delete().to(bookings::delete_booking::<S>)),
        )
        .service(
            web::scope("/driver-incentives")
                .route("", web::get().to(driver_incentives::get_incentives::<S>))
                .route("", web::post().to(driver_incentives::create_incentive::<S>))
                .route(
                    "/driver/{driver_id}",
                    web::get().to(driver_incentives::get_incentives_by_driver::<S>),
                )
                .route(
                    "/driver/{driver_id}/total",
                    web::get().to(driver_incentives::get_total_by_driver::<S>),
                )
                .route(
                    "/{id}",
                    web::get().to(driver_incentives::get_incentive_by_id::<S>),
                )
                .route(
                    "/{id}",
                    web::put().to(driver_incentives::update_incentive::<S>),
                )
                .route(
                    "/{id}",
                    web::delete().to(driver_incentives::delete_incentive::<S>),
                ),
        );
}

fn resource_scope<S, T>(path: &str) -> Scope
where
    S: Repository<T> + Send + Sync + 'static,
    T: Resource,
{
    web::scope(path)
        .route("", web::get().to(master_data::list::<S, T>))
        .route("", web::post().to(master_data::create::<S, T>))
        .route("/{id}", web::get().to(master_data::get_by_id::<S, T>))
        .route("/{id}", web::put().to(master_data::update::<S, T>))
        .route("/{id}", web::delete().to(master_data::delete::<S, T>))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RentalError::InvalidInput(err.to_string()).into()
}

/// Runs a store-backed operation under the request deadline. When the deadline
/// passes the pending lookups are dropped and the request fails as cancelled.
pub async fn with_deadline<T, F>(timeout: Duration, operation: F) -> Result<T, RentalError>
where
    F: Future<Output = Result<T, RentalError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("Request exceeded its {:?} deadline", timeout);
            Err(RentalError::Cancelled)
        }
    }
}
