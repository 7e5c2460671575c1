pub mod booking_service;
pub mod booking_type_validator;
pub mod customer_service;
pub mod incentive_service;
pub mod master_data_service;
pub mod pricing_service;
