use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::de::DeserializeOwned;

use crate::db::repository::Document;
use crate::errors::RentalError;

pub mod booking;
pub mod booking_type;
pub mod car;
pub mod customer;
pub mod driver;
pub mod driver_incentive;
pub mod membership;

/// Master data managed through plain create/read/update/delete endpoints.
pub trait Resource: Document {
    type Input: DeserializeOwned + 'static;

    /// Checks the binding rules for a create or update body.
    fn validate(input: &Self::Input) -> Result<(), String>;
    fn from_input(input: Self::Input, now: DateTime<Utc>) -> Self;
    /// Overwrites the user-supplied fields, leaving id and `created_at` alone.
    fn apply_input(&mut self, input: Self::Input, now: DateTime<Utc>);
    fn not_found(id: &str) -> RentalError;

    /// Field that must be unique across the collection, with this record's value.
    fn unique_key(&self) -> Option<(&'static str, Bson)> {
        None
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: i64) -> Result<(), String> {
    if value <= 0 {
        return Err(format!("{} must be greater than 0", field));
    }
    Ok(())
}
