use crate::core::instances::Instance;
use crate::error::ModelError;

/// Batch classifier over categorical instances.
pub trait Classifier {
    /// Index of the predicted class value, per the model's schema.
    fn classify(&self, instance: &dyn Instance) -> Result<usize, ModelError>;

    /// Normalized posterior per declared class value.
    fn class_posteriors(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError>;
}
