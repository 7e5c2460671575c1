use chrono::Utc;
use mongodb::bson::Bson;
use std::sync::Arc;

use crate::db::repository::{RentalStore, Repository};
use crate::errors::RentalError;
use crate::models::{
    booking::Booking,
    driver::Driver,
    driver_incentive::{
        DriverIncentive, DriverIncentiveDetails, DriverIncentiveInput, DriverIncentiveTotal,
    },
};
use crate::services::pricing_service::PricingService;

pub struct IncentiveService<S> {
    store: Arc<S>,
}

impl<S: RentalStore> IncentiveService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persists the incentive owed for a freshly created booking.
    pub async fn generate_for_booking(
        &self,
        booking_id: &str,
        days: i64,
        daily_rent: i64,
    ) -> Result<DriverIncentive, RentalError> {
        let now = Utc::now();
        let incentive = DriverIncentive {
            id: None,
            booking_id: booking_id.to_string(),
            incentive: PricingService::calculate_incentive(days, daily_rent)?,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let saved =
            <S as Repository<DriverIncentive>>::insert(&self.store, incentive).await?;
        log::debug!(
            "Incentive {} generated for booking {}",
            saved.incentive,
            booking_id
        );
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<DriverIncentiveDetails>, RentalError> {
        let incentives = <S as Repository<DriverIncentive>>::find_all(&self.store).await?;
        let mut details = Vec::with_capacity(incentives.len());
        for incentive in incentives {
            details.push(self.load_booking(incentive).await?);
        }
        Ok(details)
    }

    pub async fn get(&self, id: &str) -> Result<DriverIncentiveDetails, RentalError> {
        let incentive = self.find_incentive(id).await?;
        self.load_booking(incentive).await
    }

    /// Records an incentive by hand, for corrections outside booking creation.
    pub async fn create(
        &self,
        input: DriverIncentiveInput,
    ) -> Result<DriverIncentiveDetails, RentalError> {
        input.validate().map_err(RentalError::InvalidInput)?;
        let booking = self.require_booking(&input.booking_id).await?;

        let now = Utc::now();
        let incentive = DriverIncentive {
            id: None,
            booking_id: input.booking_id,
            incentive: input.incentive,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let saved =
            <S as Repository<DriverIncentive>>::insert(&self.store, incentive).await?;
        log::info!(
            "Incentive {} recorded for booking {}",
            saved.id.as_deref().unwrap_or_default(),
            saved.booking_id
        );

        Ok(DriverIncentiveDetails {
            incentive: saved,
            booking: Some(booking),
        })
    }

    pub async fn update(
        &self,
        id: &str,
        input: DriverIncentiveInput,
    ) -> Result<DriverIncentiveDetails, RentalError> {
        let mut incentive = self.find_incentive(id).await?;
        input.validate().map_err(RentalError::InvalidInput)?;
        let booking = self.require_booking(&input.booking_id).await?;

        incentive.booking_id = input.booking_id;
        incentive.incentive = input.incentive;
        incentive.updated_at = Some(Utc::now());

        let updated = <S as Repository<DriverIncentive>>::replace(&self.store, id, incentive)
            .await?
            .ok_or_else(|| RentalError::IncentiveNotFound(id.to_string()))?;
        log::info!("Incentive {} updated to {}", id, updated.incentive);

        Ok(DriverIncentiveDetails {
            incentive: updated,
            booking: Some(booking),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<DriverIncentive, RentalError> {
        let incentive = self.find_incentive(id).await?;
        if !<S as Repository<DriverIncentive>>::delete(&self.store, id).await? {
            return Err(RentalError::IncentiveNotFound(id.to_string()));
        }
        log::info!("Incentive {} deleted", id);
        Ok(incentive)
    }

    /// Incentives generated by bookings that have this driver attached.
    pub async fn list_by_driver(
        &self,
        driver_id: &str,
    ) -> Result<Vec<DriverIncentiveDetails>, RentalError> {
        if <S as Repository<Driver>>::find_by_id(&self.store, driver_id)
            .await?
            .is_none()
        {
            return Err(RentalError::DriverNotFound(driver_id.to_string()));
        }

        let bookings = <S as Repository<Booking>>::find_by_field(
            &self.store,
            "driver_id",
            Bson::String(driver_id.to_string()),
        )
        .await?;

        let mut details = Vec::new();
        for booking in bookings {
            let Some(booking_id) = booking.id.clone() else {
                continue;
            };
            let found = <S as Repository<DriverIncentive>>::find_by_field(
                &self.store,
                "booking_id",
                Bson::String(booking_id),
            )
            .await?;
            details.extend(found.into_iter().map(|incentive| DriverIncentiveDetails {
                incentive,
                booking: Some(booking.clone()),
            }));
        }

        Ok(details)
    }

    pub async fn total_by_driver(
        &self,
        driver_id: &str,
    ) -> Result<DriverIncentiveTotal, RentalError> {
        let incentives = self.list_by_driver(driver_id).await?;
        let total_incentive = incentives
            .iter()
            .try_fold(0i64, |total, d| total.checked_add(d.incentive.incentive))
            .ok_or(RentalError::AmountOverflow)?;

        Ok(DriverIncentiveTotal {
            driver_id: driver_id.to_string(),
            total_incentive,
        })
    }

    async fn find_incentive(&self, id: &str) -> Result<DriverIncentive, RentalError> {
        <S as Repository<DriverIncentive>>::find_by_id(&self.store, id)
            .await?
            .ok_or_else(|| RentalError::IncentiveNotFound(id.to_string()))
    }

    // Unknown booking in a request body is a 400.
    async fn require_booking(&self, booking_id: &str) -> Result<Booking, RentalError> {
        <S as Repository<Booking>>::find_by_id(&self.store, booking_id)
            .await?
            .ok_or_else(|| RentalError::InvalidInput(format!("booking {} not found", booking_id)))
    }

    async fn load_booking(
        &self,
        incentive: DriverIncentive,
    ) -> Result<DriverIncentiveDetails, RentalError> {
        let booking =
            <S as Repository<Booking>>::find_by_id(&self.store, &incentive.booking_id).await?;
        Ok(DriverIncentiveDetails { incentive, booking })
    }
}
