use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_positive, require_text, Resource};
use crate::db::repository::Document;
use crate::errors::RentalError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Car {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub stock: i64,
    pub daily_rent: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CarInput {
    pub name: String,
    pub stock: i64,
    pub daily_rent: i64,
}

impl Document for Car {
    const COLLECTION: &'static str = "cars";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Resource for Car {
    type Input = CarInput;

    fn validate(input: &CarInput) -> Result<(), String> {
        require_text("name", &input.name)?;
        require_positive("stock", input.stock)?;
        require_positive("daily_rent", input.daily_rent)
    }

    fn from_input(input: CarInput, now: DateTime<Utc>) -> Self {
        Car {
            id: None,
            name: input.name,
            stock: input.stock,
            daily_rent: input.daily_rent,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_input(&mut self, input: CarInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.stock = input.stock;
        self.daily_rent = input.daily_rent;
        self.updated_at = Some(now);
    }

    fn not_found(id: &str) -> RentalError {
        RentalError::CarNotFound(id.to_string())
    }
}
