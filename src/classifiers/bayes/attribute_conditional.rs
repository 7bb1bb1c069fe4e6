use crate::classifiers::bayes::probability_table::ProbabilityTable;
use crate::core::dataset::Dataset;
use crate::error::ModelError;

/// Conditional probability of one nominal attribute given the class.
///
/// Two passes over the dataset: the first counts (attribute value, class
/// value) co-occurrences and per-class totals, the second divides every cell
/// by its class total. No smoothing is applied, so a pair never observed
/// together keeps probability 0.0 and will zero out that class's posterior
/// during inference regardless of the other evidence. A class value with no
/// training records at all keeps an all-zero column.
#[derive(Debug)]
pub struct AttributeConditionalProbability {
    attribute_index: usize,
    table: ProbabilityTable,
}

impl AttributeConditionalProbability {
    pub fn estimate(
        attribute_index: usize,
        dataset: &Dataset,
    ) -> Result<AttributeConditionalProbability, ModelError> {
        let header = dataset.header();
        let Some(attribute) = header.nominal_attribute_at(attribute_index) else {
            let name = header
                .attribute_at_index(attribute_index)
                .map(|a| a.name())
                .unwrap_or_else(|| format!("#{attribute_index}"));
            return Err(ModelError::InvalidAttribute {
                name,
                expected: "nominal",
            });
        };
        let Some(class_attribute) = dataset.class_attribute_as_nominal() else {
            let name = dataset
                .class_attribute()
                .map(|a| a.name())
                .unwrap_or_else(|| format!("#{}", dataset.class_index()));
            return Err(ModelError::InvalidAttribute {
                name,
                expected: "nominal",
            });
        };
        let class_index = dataset.class_index();

        let mut table = ProbabilityTable::new(attribute, class_attribute);
        let mut class_occurrences = vec![0.0; class_attribute.number_of_values()];

        for instance in dataset.instances() {
            let Some(attribute_value) = instance.label_at_index(attribute_index) else {
                return Err(ModelError::UnknownValue {
                    attribute: attribute.name.clone(),
                    value: value_text(instance.value_at_index(attribute_index)),
                });
            };
            let Some(class_value) = instance.label_at_index(class_index) else {
                return Err(ModelError::UnknownValue {
                    attribute: class_attribute.name.clone(),
                    value: value_text(instance.value_at_index(class_index)),
                });
            };
            if let Some(column) = class_attribute.index_of_value(class_value) {
                class_occurrences[column] += 1.0;
            }
            let count = table.get(attribute_value, class_value)?;
            table.put(count + 1.0, attribute_value, class_value)?;
        }

        for (column, class_value) in class_attribute.enumerate_values() {
            let total = class_occurrences[column];
            if total == 0.0 {
                // never-observed class: the column stays all zero
                continue;
            }
            for attribute_value in &attribute.values {
                let count = table.get(attribute_value, class_value)?;
                table.put(count / total, attribute_value, class_value)?;
            }
        }

        Ok(AttributeConditionalProbability {
            attribute_index,
            table,
        })
    }

    pub fn attribute_index(&self) -> usize {
        self.attribute_index
    }

    pub fn attribute_name(&self) -> &str {
        self.table.attribute_name()
    }

    pub fn conditional_probability(
        &self,
        attribute_value: &str,
        class_value: &str,
    ) -> Result<f64, ModelError> {
        self.table.get(attribute_value, class_value)
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }
}

fn value_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "missing".to_string())
}
