//! Input validation and error types

pub mod data;
pub mod error;

pub use data::{DataValidator, ValidationConfig, ValidationReport};
pub use error::{Axis, InputError, LocatorError, LocatorResult};
