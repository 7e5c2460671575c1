use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Resource};
use crate::db::repository::Document;
use crate::errors::RentalError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Membership {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub membership_name: String,
    /// Percent taken off a booking's total cost.
    pub discount: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipInput {
    pub membership_name: String,
    pub discount: i64,
}

impl Document for Membership {
    const COLLECTION: &'static str = "memberships";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Resource for Membership {
    type Input = MembershipInput;

    fn validate(input: &MembershipInput) -> Result<(), String> {
        require_text("membership_name", &input.membership_name)?;
        if !(1..=100).contains(&input.discount) {
            return Err("discount must be between 1 and 100".to_string());
        }
        Ok(())
    }

    fn from_input(input: MembershipInput, now: DateTime<Utc>) -> Self {
        Membership {
            id: None,
            membership_name: input.membership_name,
            discount: input.discount,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn apply_input(&mut self, input: MembershipInput, now: DateTime<Utc>) {
        self.membership_name = input.membership_name;
        self.discount = input.discount;
        self.updated_at = Some(now);
    }

    fn not_found(id: &str) -> RentalError {
        RentalError::MembershipNotFound(id.to_string())
    }
}
