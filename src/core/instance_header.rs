use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

#[derive(Debug)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|attribute| attribute.as_ref())
    }

    pub fn nominal_attribute_at(&self, index: usize) -> Option<&NominalAttribute> {
        self.attribute_at_index(index)?
            .as_any()
            .downcast_ref::<NominalAttribute>()
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&dyn Attribute> {
        self.attribute_at_index(self.class_index)
    }

    pub fn number_of_classes(&self) -> usize {
        self.nominal_attribute_at(self.class_index)
            .map(NominalAttribute::number_of_values)
            .unwrap_or(0)
    }

    /// New header identical to this one except for the attribute at `index`.
    pub fn with_attribute_replaced(&self, index: usize, attribute: AttributeRef) -> InstanceHeader {
        let attributes = self
            .attributes
            .iter()
            .enumerate()
            .map(|(position, original)| {
                if position == index {
                    AttributeRef::clone(&attribute)
                } else {
                    AttributeRef::clone(original)
                }
            })
            .collect();
        InstanceHeader::new(self.relation_name.clone(), attributes, self.class_index)
    }
}
