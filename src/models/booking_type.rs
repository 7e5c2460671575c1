use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Resource};
use crate::db::repository::Document;
use crate::errors::RentalError;

/// What a booking type means for driver assignment.
///
/// Resolved once from the label when the type record is written, so booking
/// validation never has to interpret labels or ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// The customer drives; a driver must not be attached.
    SelfDrive,
    /// A driver must be attached.
    WithDriver,
    /// No constraint on driver presence.
    #[default]
    Unset,
}

impl BookingKind {
    /// Maps labels such as "Self Drive", "self-drive" or "WITH_DRIVER" onto a kind.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "selfdrive" => BookingKind::SelfDrive,
            "withdriver" => BookingKind::WithDriver,
            _ => BookingKind::Unset,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingType {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub booking_type: String,
    pub description: String,
    #[serde(default)]
    pub kind: BookingKind,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct BookingTypeInput {
    pub booking_type: String,
    pub description: String,
}

impl Document for BookingType {
    const COLLECTION: &'static str = "booking_types";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Resource for BookingType {
    type Input = BookingTypeInput;

    fn validate(input: &BookingTypeInput) -> Result<(), String> {
        require_text("booking_type", &input.booking_type)?;
        require_text("description", &input.description)
    }

    fn from_input(input: BookingTypeInput, now: DateTime<Utc>) -> Self {
        BookingType {
            id: None,
            kind: BookingKind::from_label(&input.booking_type),
            booking_type: input.booking_type,
            description: input.description,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_input(&mut self, input: BookingTypeInput, now: DateTime<Utc>) {
        self.kind = BookingKind::from_label(&input.booking_type);
        self.booking_type = input.booking_type;
        self.description = input.description;
        self.updated_at = Some(now);
    }

    fn not_found(id: &str) -> RentalError {
        RentalError::BookingTypeNotFound(id.to_string())
    }
}
