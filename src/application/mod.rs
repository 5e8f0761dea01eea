pub mod app_error;
pub mod clock;
pub mod ports;
pub mod use_cases;
pub mod validators;
