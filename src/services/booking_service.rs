use chrono::Utc;
use std::sync::Arc;

use crate::db::repository::{RentalStore, Repository};
use crate::errors::RentalError;
use crate::models::{
    booking::{Booking, BookingDetails, BookingInput},
    booking_type::{BookingKind, BookingType},
    car::Car,
    customer::Customer,
    driver::Driver,
    membership::Membership,
};
use crate::services::{
    booking_type_validator::validate_driver_assignment,
    incentive_service::IncentiveService,
    pricing_service::{PricingService, RentalPeriod},
};

/// A booking request that passed validation, with every derived amount computed.
struct PricedBooking {
    period: RentalPeriod,
    customer: Customer,
    car: Car,
    driver: Option<Driver>,
    booking_type: Option<BookingType>,
    total_cost: i64,
    discount: i64,
    total_driver_cost: i64,
}

impl PricedBooking {
    fn into_booking(self, input: &BookingInput) -> (Booking, BookingRelations) {
        let booking = Booking {
            id: None,
            customer_id: input.customer_id.clone(),
            car_id: input.car_id.clone(),
            driver_id: input.driver_id.clone(),
            book_type_id: input.book_type_id.clone(),
            start_rent: self.period.start,
            end_rent: self.period.end,
            total_cost: self.total_cost,
            total_driver_cost: self.total_driver_cost,
            discount: self.discount,
            finished: input.finished,
            created_at: None,
            updated_at: None,
        };
        let relations = BookingRelations {
            customer: Some(self.customer),
            car: Some(self.car),
            driver: self.driver,
            booking_type: self.booking_type,
        };
        (booking, relations)
    }
}

struct BookingRelations {
    customer: Option<Customer>,
    car: Option<Car>,
    driver: Option<Driver>,
    booking_type: Option<BookingType>,
}

impl BookingRelations {
    fn attach(self, booking: Booking) -> BookingDetails {
        BookingDetails {
            booking,
            customer: self.customer,
            car: self.car,
            driver: self.driver,
            booking_type: self.booking_type,
        }
    }
}

/// Turns booking requests into priced, validated booking records.
pub struct BookingService<S> {
    store: Arc<S>,
}

impl<S: RentalStore> BookingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list_bookings(&self) -> Result<Vec<BookingDetails>, RentalError> {
        let bookings = <S as Repository<Booking>>::find_all(&self.store).await?;
        let mut details = Vec::with_capacity(bookings.len());
        for booking in bookings {
            details.push(self.load_relations(booking).await?);
        }
        Ok(details)
    }

    pub async fn get_booking(&self, id: &str) -> Result<BookingDetails, RentalError> {
        let booking = self.find_booking(id).await?;
        self.load_relations(booking).await
    }

    /// Prices and stores a new booking, then records the driver incentive it produces.
    ///
    /// If the incentive cannot be stored the call fails, but the booking stays stored.
    pub async fn create_booking(&self, input: BookingInput) -> Result<BookingDetails, RentalError> {
        let priced = self.price(&input).await?;
        let period = priced.period;
        let daily_rent = priced.car.daily_rent;

        let (mut booking, relations) = priced.into_booking(&input);
        let now = Utc::now();
        booking.created_at = Some(now);
        booking.updated_at = Some(now);

        let created = <S as Repository<Booking>>::insert(&self.store, booking).await?;
        let booking_id = created.id.clone().unwrap_or_default();
        log::info!(
            "Booking {} created: {} day(s), total cost {}, discount {}, driver cost {}",
            booking_id,
            period.days,
            created.total_cost,
            created.discount,
            created.total_driver_cost
        );

        IncentiveService::new(Arc::clone(&self.store))
            .generate_for_booking(&booking_id, period.days, daily_rent)
            .await
            .map_err(|err| {
                log::warn!(
                    "Booking {} was stored but its driver incentive was not: {}",
                    booking_id,
                    err
                );
                err
            })?;

        Ok(relations.attach(created))
    }

    /// Recomputes every derived amount from `input` and overwrites the stored booking.
    ///
    /// The incentive generated at creation is left as it was.
    pub async fn edit_booking(
        &self,
        id: &str,
        input: BookingInput,
    ) -> Result<BookingDetails, RentalError> {
        let existing = self.find_booking(id).await?;
        let priced = self.price(&input).await?;

        let (mut booking, relations) = priced.into_booking(&input);
        booking.created_at = existing.created_at;
        booking.updated_at = Some(Utc::now());

        let updated = <S as Repository<Booking>>::replace(&self.store, id, booking)
            .await?
            .ok_or_else(|| RentalError::BookingNotFound(id.to_string()))?;
        log::info!(
            "Booking {} updated: total cost {}, discount {}, driver cost {}",
            id,
            updated.total_cost,
            updated.discount,
            updated.total_driver_cost
        );

        Ok(relations.attach(updated))
    }

    /// Removes a booking. Its driver incentive is kept.
    pub async fn delete_booking(&self, id: &str) -> Result<Booking, RentalError> {
        let booking = self.find_booking(id).await?;
        if !<S as Repository<Booking>>::delete(&self.store, id).await? {
            return Err(RentalError::BookingNotFound(id.to_string()));
        }
        log::info!("Booking {} deleted", id);
        Ok(booking)
    }

    async fn price(&self, input: &BookingInput) -> Result<PricedBooking, RentalError> {
        // Dates first so malformed requests never touch the store
        let period = PricingService::parse_period(&input.start_rent, &input.end_rent)?;

        let car = self.find_car(&input.car_id).await?;
        let total_cost = PricingService::calculate_total_cost(period.days, car.daily_rent)?;

        let customer = self.find_customer(&input.customer_id).await?;
        let discount_percent = match &customer.membership_id {
            Some(membership_id) => Some(self.find_membership(membership_id).await?.discount),
            None => None,
        };
        let discount = PricingService::calculate_discount(total_cost, discount_percent)?;

        let booking_type = match &input.book_type_id {
            Some(type_id) => Some(self.find_booking_type(type_id).await?),
            None => None,
        };
        let kind = booking_type
            .as_ref()
            .map_or(BookingKind::Unset, |t| t.kind);
        validate_driver_assignment(kind, input.driver_id.as_deref())?;

        let driver = match &input.driver_id {
            Some(driver_id) => Some(self.find_driver(driver_id).await?),
            None => None,
        };
        let total_driver_cost = PricingService::calculate_driver_cost(
            period.days,
            driver.as_ref().map(|d| d.daily_cost),
        )?;

        log::debug!(
            "Priced booking for car {}: {} day(s) x {} = {}, discount {}, driver cost {}",
            input.car_id,
            period.days,
            car.daily_rent,
            total_cost,
            discount,
            total_driver_cost
        );

        Ok(PricedBooking {
            period,
            customer,
            car,
            driver,
            booking_type,
            total_cost,
            discount,
            total_driver_cost,
        })
    }

    async fn load_relations(&self, booking: Booking) -> Result<BookingDetails, RentalError> {
        let customer =
            <S as Repository<Customer>>::find_by_id(&self.store, &booking.customer_id).await?;
        let car = <S as Repository<Car>>::find_by_id(&self.store, &booking.car_id).await?;
        let driver = match &booking.driver_id {
            Some(id) => <S as Repository<Driver>>::find_by_id(&self.store, id).await?,
            None => None,
        };
        let booking_type = match &booking.book_type_id {
            Some(id) => <S as Repository<BookingType>>::find_by_id(&self.store, id).await?,
            None => None,
        };

        Ok(BookingRelations {
            customer,
            car,
            driver,
            booking_type,
        }
        .attach(booking))
    }

    async fn find_booking(&self, id: &str) -> Result<Booking, RentalError> {
        <S as Repository<Booking>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::BookingNotFound(id.to_string()))
    }

    async fn find_car(&self, id: &str) -> Result<Car, RentalError> {
        <S as Repository<Car>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::CarNotFound(id.to_string()))
    }

    async fn find_customer(&self, id: &str) -> Result<Customer, RentalError> {
        <S as Repository<Customer>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::CustomerNotFound(id.to_string()))
    }

    async fn find_membership(&self, id: &str) -> Result<Membership, RentalError> {
        <S as Repository<Membership>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::MembershipNotFound(id.to_string()))
    }

    async fn find_driver(&self, id: &str) -> Result<Driver, RentalError> {
        <S as Repository<Driver>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::DriverNotFound(id.to_string()))
    }

    async fn find_booking_type(&self, id: &str) -> Result<BookingType, RentalError> {
        <S as Repository<BookingType>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::BookingTypeNotFound(id.to_string()))
    }
}
