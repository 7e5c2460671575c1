use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use super::{require_text, Resource};
use crate::db::repository::Document;
use crate::errors::RentalError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub nik: String,
    pub phone: String,
    pub membership_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub nik: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct MembershipAssignment {
    pub membership_id: String,
}

impl Document for Customer {
    const COLLECTION: &'static str = "customers";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Resource for Customer {
    type Input = CustomerInput;

    fn validate(input: &CustomerInput) -> Result<(), String> {
        require_text("name", &input.name)?;
        require_text("nik", &input.nik)?;
        require_text("phone", &input.phone)
    }

    fn from_input(input: CustomerInput, now: DateTime<Utc>) -> Self {
        Customer {
            id: None,
            name: input.name,
            nik: input.nik,
            phone: input.phone,
            membership_id: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    // Membership is managed through its own endpoints and survives updates.
    fn apply_input(&mut self, input: CustomerInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.nik = input.nik;
        self.phone = input.phone;
        self.updated_at = Some(now);
    }

    fn not_found(id: &str) -> RentalError {
        RentalError::CustomerNotFound(id.to_string())
    }

    fn unique_key(&self) -> Option<(&'static str, Bson)> {
        Some(("nik", Bson::String(self.nik.clone())))
    }
}
