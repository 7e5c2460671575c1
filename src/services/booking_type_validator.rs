use crate::errors::RentalError;
use crate::models::booking_type::BookingKind;

/// Checks that driver presence matches the booking kind.
///
/// Only presence is checked here; whether the driver id resolves is up to the caller.
pub fn validate_driver_assignment(
    kind: BookingKind,
    driver_id: Option<&str>,
) -> Result<(), RentalError> {
    match (kind, driver_id) {
        (BookingKind::WithDriver, None) => Err(RentalError::DriverRequired),
        (BookingKind::SelfDrive, Some(_)) => Err(RentalError::DriverNotAllowed),
        _ => Ok(()),
    }
}
