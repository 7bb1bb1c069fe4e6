use crate::classifiers::Classifier;
use crate::classifiers::bayes::NaiveBayes;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::error::ModelError;
use crate::evaluation::{
    BasicClassificationEvaluator, BasicEstimator, Measurement, PerformanceEvaluator,
};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::sync::Arc;

/// Seeded k-fold cross-validation for the Naive Bayes classifier.
///
/// Records are shuffled once with a seeded RNG and partitioned into `folds`
/// nearly equal parts. Each fold serves as the held-out test set for a model
/// trained on the remaining records. Instances the model cannot classify
/// (unknown value, degenerate evidence) are recorded as unclassified and
/// count against accuracy instead of aborting the fold.
pub struct CrossValidation {
    folds: usize,
    seed: u64,
}

impl CrossValidation {
    pub fn new(folds: usize, seed: u64) -> Result<CrossValidation, Error> {
        if folds < 2 {
            return Err(Error::new(ErrorKind::InvalidInput, "folds must be >= 2"));
        }
        Ok(CrossValidation { folds, seed })
    }

    pub fn evaluate(&self, dataset: &Dataset) -> Result<CrossValidationReport, ModelError> {
        let number_of_instances = dataset.number_of_instances();
        let mut indices: Vec<usize> = (0..number_of_instances).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let number_of_classes = dataset.header().number_of_classes();
        let mut evaluator: BasicClassificationEvaluator<BasicEstimator> =
            BasicClassificationEvaluator::new(number_of_classes);
        let mut fold_accuracies = Vec::with_capacity(self.folds);

        for fold in 0..self.folds {
            let start = fold * number_of_instances / self.folds;
            let end = (fold + 1) * number_of_instances / self.folds;
            let test = &indices[start..end];
            if test.is_empty() {
                fold_accuracies.push(f64::NAN);
                continue;
            }

            let train: Vec<Arc<dyn Instance>> = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .map(|&index| Arc::clone(&dataset.instances()[index]))
                .collect();
            let train_dataset = Dataset::new(Arc::clone(dataset.header()), train);
            let model = NaiveBayes::fit(&train_dataset)?;

            let mut fold_evaluator: BasicClassificationEvaluator<BasicEstimator> =
                BasicClassificationEvaluator::new(number_of_classes);
            for &index in test {
                let instance = &dataset.instances()[index];
                let predicted = match model.classify(instance.as_ref()) {
                    Ok(class) => Some(class),
                    Err(ModelError::UnknownValue { .. }) | Err(ModelError::DegenerateEvidence) => {
                        None
                    }
                    Err(error) => return Err(error),
                };
                evaluator.add_result(instance.as_ref(), predicted);
                fold_evaluator.add_result(instance.as_ref(), predicted);
            }
            fold_accuracies.push(accuracy_of(&fold_evaluator.performance()));
        }

        Ok(CrossValidationReport {
            relation_name: dataset.header().relation_name().to_string(),
            folds: self.folds,
            instances: number_of_instances,
            finished_at: Utc::now().to_rfc3339(),
            fold_accuracies,
            measurements: evaluator.performance(),
        })
    }
}

fn accuracy_of(measurements: &[Measurement]) -> f64 {
    measurements
        .iter()
        .find(|m| m.name == "accuracy")
        .map(|m| m.value)
        .unwrap_or(f64::NAN)
}

/// Pooled cross-validation results, printable and JSON-exportable.
#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationReport {
    pub relation_name: String,
    pub folds: usize,
    pub instances: usize,
    pub finished_at: String,
    pub fold_accuracies: Vec<f64>,
    pub measurements: Vec<Measurement>,
}

impl CrossValidationReport {
    pub fn accuracy(&self) -> f64 {
        accuracy_of(&self.measurements)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let writer = File::create(path)?;
        serde_json::to_writer_pretty(writer, self).map_err(Error::from)
    }
}

impl Display for CrossValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "relation={}, instances={}, folds={}",
            self.relation_name, self.instances, self.folds
        )?;
        for (fold, accuracy) in self.fold_accuracies.iter().enumerate() {
            writeln!(f, "fold {:>2}: accuracy={:.6}", fold + 1, accuracy)?;
        }
        for measurement in &self.measurements {
            writeln!(f, "{}={:.6}", measurement.name, measurement.value)?;
        }
        Ok(())
    }
}
