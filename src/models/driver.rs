use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_positive, require_text, Resource};
use crate::db::repository::Document;
use crate::errors::RentalError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Driver {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub nik: String,
    pub phone: String,
    pub daily_cost: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct DriverInput {
    pub name: String,
    pub nik: String,
    pub phone: String,
    pub daily_cost: i64,
}

impl Document for Driver {
    const COLLECTION: &'static str = "drivers";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Resource for Driver {
    type Input = DriverInput;

    fn validate(input: &DriverInput) -> Result<(), String> {
        require_text("name", &input.name)?;
        require_text("nik", &input.nik)?;
        require_text("phone", &input.phone)?;
        require_positive("daily_cost", input.daily_cost)
    }

    fn from_input(input: DriverInput, now: DateTime<Utc>) -> Self {
        Driver {
            id: None,
            name: input.name,
            nik: input.nik,
            phone: input.phone,
            daily_cost: input.daily_cost,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_input(&mut self, input: DriverInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.nik = input.nik;
        self.phone = input.phone;
        self.daily_cost = input.daily_cost;
        self.updated_at = Some(now);
    }

    fn not_found(id: &str) -> RentalError {
        RentalError::DriverNotFound(id.to_string())
    }
}
