use mongodb::bson::Bson;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{
    booking::Booking, booking_type::BookingType, car::Car, customer::Customer, driver::Driver,
    driver_incentive::DriverIncentive, membership::Membership,
};

/// A record stored in its own collection, keyed by an opaque string id under `_id`.
pub trait Document: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

#[derive(Debug)]
pub enum StoreError {
    Database(String),
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {}", err),
            StoreError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for StoreError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Lookup and persistence operations for one document type.
///
/// `insert` assigns a fresh id when the document has none. `replace` and
/// `delete` report whether a document with the given id existed.
pub trait Repository<T: Document> {
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;
    async fn find_by_field(&self, field: &str, value: Bson) -> Result<Vec<T>, StoreError>;
    async fn insert(&self, doc: T) -> Result<T, StoreError>;
    async fn replace(&self, id: &str, doc: T) -> Result<Option<T>, StoreError>;
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

pub trait StoreHealth {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Everything the HTTP layer and the booking engine need from storage.
pub trait RentalStore:
    Repository<Car>
    + Repository<Customer>
    + Repository<Membership>
    + Repository<Driver>
    + Repository<BookingType>
    + Repository<Booking>
    + Repository<DriverIncentive>
    + StoreHealth
    + Send
    + Sync
    + 'static
{
}

impl<S> RentalStore for S where
    S: Repository<Car>
        + Repository<Customer>
        + Repository<Membership>
        + Repository<Driver>
        + Repository<BookingType>
        + Repository<Booking>
        + Repository<DriverIncentive>
        + StoreHealth
        + Send
        + Sync
        + 'static
{
}

pub fn new_id() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}
