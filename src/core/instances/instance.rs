use crate::core::attributes::{Attribute, NominalAttribute};
use crate::core::instance_header::InstanceHeader;

/// One record of a dataset.
///
/// Values are stored as `f64`, one per header attribute: the raw value for a
/// numeric attribute, the index into the declared label set for a nominal
/// one. Instances are immutable once built and shared between owners.
pub trait Instance: std::fmt::Debug {
    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute>;

    fn number_of_attributes(&self) -> usize;

    fn class_index(&self) -> usize;

    fn class_value(&self) -> Option<f64>;

    fn number_of_classes(&self) -> usize;

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;

    /// Resolves the value at `index` back to its declared nominal label.
    ///
    /// `None` for numeric attributes, for indices outside the header and for
    /// values that do not map onto a declared label.
    fn label_at_index(&self, index: usize) -> Option<&str> {
        let value = self.value_at_index(index)?;
        if value < 0.0 || value.fract() != 0.0 {
            return None;
        }
        let nominal = self
            .attribute_at_index(index)?
            .as_any()
            .downcast_ref::<NominalAttribute>()?;
        nominal.value_at(value as usize)
    }
}
