use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

#[derive(Debug)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>) -> DenseInstance {
        DenseInstance { header, values }
    }
}

impl Instance for DenseInstance {
    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header.attribute_at_index(index)
    }

    fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.value_at_index(self.header.class_index())
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};

    fn header() -> Arc<InstanceHeader> {
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("x".into())) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "class".into(),
                vec!["A".into(), "B".into()],
            )) as AttributeRef,
        ];
        Arc::new(InstanceHeader::new("toy".into(), attributes, 1))
    }

    #[test]
    fn value_and_class_accessors() {
        let instance = DenseInstance::new(header(), vec![4.5, 1.0]);
        assert_eq!(instance.value_at_index(0), Some(4.5));
        assert_eq!(instance.value_at_index(2), None);
        assert_eq!(instance.class_index(), 1);
        assert_eq!(instance.class_value(), Some(1.0));
        assert_eq!(instance.number_of_classes(), 2);
        assert_eq!(instance.to_vec(), vec![4.5, 1.0]);
    }

    #[test]
    fn label_resolution_only_for_declared_nominal_values() {
        let instance = DenseInstance::new(header(), vec![4.5, 1.0]);
        assert_eq!(instance.label_at_index(1), Some("B"));
        // numeric attribute has no labels
        assert_eq!(instance.label_at_index(0), None);

        let out_of_range = DenseInstance::new(header(), vec![4.5, 2.0]);
        assert_eq!(out_of_range.label_at_index(1), None);

        let fractional = DenseInstance::new(header(), vec![4.5, 0.5]);
        assert_eq!(fractional.label_at_index(1), None);
    }
}
