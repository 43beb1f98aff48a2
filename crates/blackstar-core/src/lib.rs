pub mod catalog;
pub mod domain;
pub mod errors;
pub mod normalize;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use errors::CoreError;
pub use validation::ValidationError;
