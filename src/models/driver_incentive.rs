use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{booking::Booking, require_positive, require_text};
use crate::db::repository::Document;

/// Payment owed to the driver side of a booking, generated when the booking is created.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverIncentive {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub booking_id: String,
    pub incentive: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for recording or correcting an incentive by hand.
#[derive(Debug, Deserialize)]
pub struct DriverIncentiveInput {
    pub booking_id: String,
    pub incentive: i64,
}

impl DriverIncentiveInput {
    pub fn validate(&self) -> Result<(), String> {
        require_text("booking_id", &self.booking_id)?;
        require_positive("incentive", self.incentive)
    }
}

/// An incentive with the booking it was paid for.
#[derive(Debug, Clone, Serialize)]
pub struct DriverIncentiveDetails {
    #[serde(flatten)]
    pub incentive: DriverIncentive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Serialize)]
pub struct DriverIncentiveTotal {
    pub driver_id: String,
    pub total_incentive: i64,
}

impl Document for DriverIncentive {
    const COLLECTION: &'static str = "driver_incentives";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
