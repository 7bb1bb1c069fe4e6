use crate::core::attributes::NominalAttribute;
use crate::error::ModelError;
use std::collections::HashMap;

/// Dense lookup over every declared (attribute value, class value) pair.
///
/// Rows are the attribute's labels, columns the class labels, both in
/// declaration order:
///
/// ```text
///       | c1 | c2 | ..
///    a1 |    |    |
///    a2 |    |    |
///    a3 |    |    |
/// ```
///
/// Cells start at 0.0 and are written exactly twice during training: once by
/// the counting pass, once by the normalization pass. Lookups for labels
/// outside either declaration fail with [`ModelError::UnknownValue`].
#[derive(Debug)]
pub struct ProbabilityTable {
    attribute_name: String,
    class_name: String,
    attribute_values: Vec<String>,
    class_values: Vec<String>,
    attribute_value_index: HashMap<String, usize>,
    class_value_index: HashMap<String, usize>,
    cells: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    pub fn new(attribute: &NominalAttribute, class_attribute: &NominalAttribute) -> ProbabilityTable {
        ProbabilityTable {
            attribute_name: attribute.name.clone(),
            class_name: class_attribute.name.clone(),
            attribute_values: attribute.values.clone(),
            class_values: class_attribute.values.clone(),
            attribute_value_index: attribute.label_to_index.clone(),
            class_value_index: class_attribute.label_to_index.clone(),
            cells: vec![vec![0.0; class_attribute.values.len()]; attribute.values.len()],
        }
    }

    pub fn get(&self, attribute_value: &str, class_value: &str) -> Result<f64, ModelError> {
        let row = self.row_of(attribute_value)?;
        let column = self.column_of(class_value)?;
        Ok(self.cells[row][column])
    }

    pub fn put(
        &mut self,
        value: f64,
        attribute_value: &str,
        class_value: &str,
    ) -> Result<(), ModelError> {
        let row = self.row_of(attribute_value)?;
        let column = self.column_of(class_value)?;
        self.cells[row][column] = value;
        Ok(())
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn attribute_values(&self) -> &[String] {
        &self.attribute_values
    }

    pub fn class_values(&self) -> &[String] {
        &self.class_values
    }

    fn row_of(&self, attribute_value: &str) -> Result<usize, ModelError> {
        self.attribute_value_index
            .get(attribute_value)
            .copied()
            .ok_or_else(|| ModelError::UnknownValue {
                attribute: self.attribute_name.clone(),
                value: attribute_value.to_string(),
            })
    }

    fn column_of(&self, class_value: &str) -> Result<usize, ModelError> {
        self.class_value_index
            .get(class_value)
            .copied()
            .ok_or_else(|| ModelError::UnknownValue {
                attribute: self.class_name.clone(),
                value: class_value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ProbabilityTable {
        let attribute = NominalAttribute::with_values(
            "outlook".into(),
            vec!["sunny".into(), "rainy".into()],
        );
        let class_attribute =
            NominalAttribute::with_values("play".into(), vec!["yes".into(), "no".into()]);
        ProbabilityTable::new(&attribute, &class_attribute)
    }

    #[test]
    fn starts_fully_materialized_at_zero() {
        let t = table();
        for attribute_value in ["sunny", "rainy"] {
            for class_value in ["yes", "no"] {
                assert_eq!(t.get(attribute_value, class_value).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut t = table();
        t.put(0.25, "rainy", "no").unwrap();
        assert_eq!(t.get("rainy", "no").unwrap(), 0.25);
        assert_eq!(t.get("rainy", "yes").unwrap(), 0.0);
    }

    #[test]
    fn undeclared_labels_are_unknown_values() {
        let t = table();
        let error = t.get("snowy", "yes").unwrap_err();
        assert!(matches!(
            error,
            ModelError::UnknownValue { ref attribute, ref value }
                if attribute == "outlook" && value == "snowy"
        ));
        let error = t.get("sunny", "maybe").unwrap_err();
        assert!(matches!(
            error,
            ModelError::UnknownValue { ref attribute, .. } if attribute == "play"
        ));
    }
}
