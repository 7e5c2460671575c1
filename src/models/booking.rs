use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{booking_type::BookingType, car::Car, customer::Customer, driver::Driver};
use crate::db::repository::Document;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub customer_id: String,
    pub car_id: String,
    pub driver_id: Option<String>,
    pub book_type_id: Option<String>,
    pub start_rent: NaiveDate,
    pub end_rent: NaiveDate,
    pub total_cost: i64,
    pub total_driver_cost: i64,
    pub discount: i64,
    pub finished: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or editing a booking. Dates are `dd/mm/yyyy`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingInput {
    pub customer_id: String,
    pub car_id: String,
    pub start_rent: String,
    pub end_rent: String,
    pub driver_id: Option<String>,
    pub book_type_id: Option<String>,
    #[serde(default)]
    pub finished: bool,
}

/// A booking with its related records loaded for the response.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    pub driver: Option<Driver>,
    pub booking_type: Option<BookingType>,
}

#[derive(Debug, Serialize)]
pub struct DeletedBooking {
    pub booking: Booking,
    pub message: String,
}

impl Document for Booking {
    const COLLECTION: &'static str = "bookings";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
