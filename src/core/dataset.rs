use crate::core::attributes::{Attribute, NominalAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

/// Ordered collection of shared instances conforming to one header.
///
/// Record order is significant: every algorithm in this crate is a
/// deterministic function of it. Instances are reference-counted so a record
/// can belong to several owners (a dataset and the clusters of a running
/// discretization) without being copied.
#[derive(Clone, Debug)]
pub struct Dataset {
    header: Arc<InstanceHeader>,
    instances: Vec<Arc<dyn Instance>>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>, instances: Vec<Arc<dyn Instance>>) -> Dataset {
        Dataset { header, instances }
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn instances(&self) -> &[Arc<dyn Instance>] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&Arc<dyn Instance>> {
        self.instances.get(index)
    }

    pub fn number_of_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn class_index(&self) -> usize {
        self.header.class_index()
    }

    pub fn class_attribute(&self) -> Option<&dyn Attribute> {
        self.header.class_attribute()
    }

    pub fn class_attribute_as_nominal(&self) -> Option<&NominalAttribute> {
        self.header.nominal_attribute_at(self.header.class_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::datasets::numeric_dataset;

    #[test]
    fn exposes_header_and_instances() {
        let dataset = numeric_dataset(&[(1.0, 0), (2.0, 1), (3.0, 0)]);
        assert_eq!(dataset.number_of_instances(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.class_index(), 1);
        assert_eq!(
            dataset.class_attribute().map(|a| a.name()),
            Some("class".to_string())
        );
        assert_eq!(
            dataset.class_attribute_as_nominal().map(|a| a.number_of_values()),
            Some(2)
        );
        assert_eq!(dataset.instance(1).and_then(|i| i.value_at_index(0)), Some(2.0));
        assert!(dataset.instance(3).is_none());
    }
}
