mod cross_validation;

pub use cross_validation::{CrossValidation, CrossValidationReport};
