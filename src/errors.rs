use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::db::repository::StoreError;

/// Broad classification of a [`RentalError`], used to pick the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Persistence,
    Cancelled,
}

#[derive(Debug)]
pub enum RentalError {
    InvalidDateFormat { field: &'static str, value: String },
    InvalidDateRange,
    AmountOverflow,
    DriverRequired,
    DriverNotAllowed,
    InvalidInput(String),
    CarNotFound(String),
    CustomerNotFound(String),
    MembershipNotFound(String),
    DriverNotFound(String),
    BookingTypeNotFound(String),
    BookingNotFound(String),
    IncentiveNotFound(String),
    Conflict(String),
    Persistence(StoreError),
    Cancelled,
}

impl RentalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RentalError::InvalidDateFormat { .. }
            | RentalError::InvalidDateRange
            | RentalError::AmountOverflow
            | RentalError::DriverRequired
            | RentalError::DriverNotAllowed
            | RentalError::InvalidInput(_) => ErrorKind::Validation,
            RentalError::CarNotFound(_)
            | RentalError::CustomerNotFound(_)
            | RentalError::MembershipNotFound(_)
            | RentalError::DriverNotFound(_)
            | RentalError::BookingTypeNotFound(_)
            | RentalError::BookingNotFound(_)
            | RentalError::IncentiveNotFound(_) => ErrorKind::NotFound,
            RentalError::Conflict(_) => ErrorKind::Conflict,
            RentalError::Persistence(_) => ErrorKind::Persistence,
            RentalError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl std::fmt::Display for RentalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalError::InvalidDateFormat { field, value } => write!(
                f,
                "{} must be in format dd/mm/yyyy, got '{}'",
                field, value
            ),
            RentalError::InvalidDateRange => write!(f, "end_rent must not be before start_rent"),
            RentalError::AmountOverflow => write!(f, "booking amount is too large"),
            RentalError::DriverRequired => {
                write!(f, "driver_id must be provided for a with-driver booking")
            }
            RentalError::DriverNotAllowed => {
                write!(f, "driver_id must not be provided for a self-drive booking")
            }
            RentalError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            RentalError::CarNotFound(id) => write!(f, "car {} not found", id),
            RentalError::CustomerNotFound(id) => write!(f, "customer {} not found", id),
            RentalError::MembershipNotFound(id) => write!(f, "membership {} not found", id),
            RentalError::DriverNotFound(id) => write!(f, "driver {} not found", id),
            RentalError::BookingTypeNotFound(id) => write!(f, "booking type {} not found", id),
            RentalError::BookingNotFound(id) => write!(f, "booking {} not found", id),
            RentalError::IncentiveNotFound(id) => write!(f, "driver incentive {} not found", id),
            RentalError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            RentalError::Persistence(err) => write!(f, "Storage error: {}", err),
            RentalError::Cancelled => write!(f, "Request cancelled before completion"),
        }
    }
}

impl std::error::Error for RentalError {}

impl From<StoreError> for RentalError {
    fn from(err: StoreError) -> Self {
        RentalError::Persistence(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl ResponseError for RentalError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Cancelled => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind() == ErrorKind::Persistence {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
        })
    }
}
