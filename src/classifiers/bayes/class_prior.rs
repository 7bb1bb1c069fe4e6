use crate::core::dataset::Dataset;
use crate::error::ModelError;

/// Frequency-estimated prior probability of each declared class value.
///
/// probability(c) = count(records with class c) / N, in declaration order.
/// No smoothing: a class value with no training occurrences keeps prior 0.0.
#[derive(Debug)]
pub struct ClassPrior {
    class_name: String,
    class_values: Vec<String>,
    probabilities: Vec<f64>,
}

impl ClassPrior {
    pub fn estimate(dataset: &Dataset) -> Result<ClassPrior, ModelError> {
        let Some(class_attribute) = dataset.class_attribute_as_nominal() else {
            return Err(ModelError::InvalidAttribute {
                name: class_attribute_name(dataset),
                expected: "nominal",
            });
        };
        let class_index = dataset.class_index();

        let mut counts = vec![0.0; class_attribute.number_of_values()];
        for instance in dataset.instances() {
            let Some(label) = instance.label_at_index(class_index) else {
                return Err(ModelError::UnknownValue {
                    attribute: class_attribute.name.clone(),
                    value: class_value_text(instance.value_at_index(class_index)),
                });
            };
            if let Some(index) = class_attribute.index_of_value(label) {
                counts[index] += 1.0;
            }
        }

        let number_of_instances = dataset.number_of_instances() as f64;
        let probabilities = counts
            .into_iter()
            .map(|count| count / number_of_instances)
            .collect();

        Ok(ClassPrior {
            class_name: class_attribute.name.clone(),
            class_values: class_attribute.values.clone(),
            probabilities,
        })
    }

    pub fn probability(&self, class_value: &str) -> Result<f64, ModelError> {
        self.class_values
            .iter()
            .position(|value| value == class_value)
            .map(|index| self.probabilities[index])
            .ok_or_else(|| ModelError::UnknownValue {
                attribute: self.class_name.clone(),
                value: class_value.to_string(),
            })
    }

    pub fn probability_at(&self, index: usize) -> Option<f64> {
        self.probabilities.get(index).copied()
    }

    pub fn class_values(&self) -> &[String] {
        &self.class_values
    }
}

fn class_attribute_name(dataset: &Dataset) -> String {
    dataset
        .class_attribute()
        .map(|attribute| attribute.name())
        .unwrap_or_else(|| format!("#{}", dataset.class_index()))
}

fn class_value_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "missing".to_string())
}
