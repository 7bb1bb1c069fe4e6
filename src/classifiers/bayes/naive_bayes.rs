use crate::classifiers::bayes::attribute_conditional::AttributeConditionalProbability;
use crate::classifiers::bayes::class_prior::ClassPrior;
use crate::classifiers::classifier::Classifier;
use crate::core::attributes::NominalAttribute;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::ModelError;
use std::cmp::Ordering;
use std::sync::Arc;

/// Naive Bayes over categorical attributes.
///
/// `fit` is a one-shot training pass: it estimates the class prior and one
/// conditional table per nominal non-class attribute, in schema order.
/// Numeric attributes are silently skipped; they are expected to have been
/// discretized upstream. The model is immutable afterwards.
///
/// Classification multiplies the prior with every conditional probability
/// of the record's attribute values, normalizes over the class values and
/// picks the maximum. Because no smoothing is applied anywhere, a single
/// never-observed (value, class) pair drives that class's score to exactly
/// 0.0; if every class ends at zero the posterior is undefined and
/// classification fails with [`ModelError::DegenerateEvidence`].
#[derive(Debug)]
pub struct NaiveBayes {
    header: Arc<InstanceHeader>,
    class_prior: ClassPrior,
    conditional_probabilities: Vec<AttributeConditionalProbability>,
}

impl NaiveBayes {
    pub fn fit(dataset: &Dataset) -> Result<NaiveBayes, ModelError> {
        let class_prior = ClassPrior::estimate(dataset)?;
        let header = Arc::clone(dataset.header());

        let mut conditional_probabilities = Vec::new();
        for (index, attribute) in header.attributes.iter().enumerate() {
            if index == header.class_index {
                continue;
            }
            if attribute.as_any().is::<NominalAttribute>() {
                conditional_probabilities
                    .push(AttributeConditionalProbability::estimate(index, dataset)?);
            }
        }

        Ok(NaiveBayes {
            header,
            class_prior,
            conditional_probabilities,
        })
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn class_prior(&self) -> &ClassPrior {
        &self.class_prior
    }

    pub fn conditional_probabilities(&self) -> &[AttributeConditionalProbability] {
        &self.conditional_probabilities
    }

    /// Unnormalized score per class value, in declaration order.
    fn class_scores(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let Some(class_attribute) = self.header.nominal_attribute_at(self.header.class_index)
        else {
            return Err(ModelError::InvalidAttribute {
                name: format!("#{}", self.header.class_index),
                expected: "nominal",
            });
        };

        let mut scores = Vec::with_capacity(class_attribute.number_of_values());
        for (_, class_value) in class_attribute.enumerate_values() {
            let mut score = self.class_prior.probability(class_value)?;
            for conditional in &self.conditional_probabilities {
                let index = conditional.attribute_index();
                let Some(attribute_value) = instance.label_at_index(index) else {
                    return Err(ModelError::UnknownValue {
                        attribute: conditional.attribute_name().to_string(),
                        value: instance
                            .value_at_index(index)
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "missing".to_string()),
                    });
                };
                score *= conditional.conditional_probability(attribute_value, class_value)?;
            }
            scores.push(score);
        }
        Ok(scores)
    }
}

impl Classifier for NaiveBayes {
    fn class_posteriors(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let mut scores = self.class_scores(instance)?;
        let normalizer: f64 = scores.iter().sum();
        if normalizer == 0.0 {
            return Err(ModelError::DegenerateEvidence);
        }
        for score in &mut scores {
            *score /= normalizer;
        }
        Ok(scores)
    }

    fn classify(&self, instance: &dyn Instance) -> Result<usize, ModelError> {
        let posteriors = self.class_posteriors(instance)?;
        let mut ranked: Vec<(usize, f64)> = posteriors.into_iter().enumerate().collect();
        // stable descending sort over the declaration-order list: ties
        // resolve to the earliest declared class value
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
            .first()
            .map(|(index, _)| *index)
            .ok_or(ModelError::DegenerateEvidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NumericAttribute};
    use crate::core::instances::DenseInstance;
    use crate::discretize::KMeansDiscretizer;
    use crate::testing::dummies::datasets::{
        numeric_class_dataset, numeric_dataset, weather_dataset, weather_instance,
    };

    const EPS: f64 = 1e-12;

    #[test]
    fn fit_builds_one_table_per_nominal_non_class_attribute() {
        let model = NaiveBayes::fit(&weather_dataset()).unwrap();
        assert_eq!(model.conditional_probabilities().len(), 2);
        assert_eq!(model.conditional_probabilities()[0].attribute_name(), "outlook");
        assert_eq!(model.conditional_probabilities()[1].attribute_name(), "windy");
    }

    #[test]
    fn posterior_matches_hand_computation() {
        let model = NaiveBayes::fit(&weather_dataset()).unwrap();

        // (overcast, true): yes = 0.7 * 2/7 * 2/7, no = 0.3 * 0 * 1 = 0
        let instance = weather_instance("overcast", "true", "yes");
        let posteriors = model.class_posteriors(&instance).unwrap();
        assert!((posteriors[0] - 1.0).abs() < EPS);
        assert_eq!(posteriors[1], 0.0);
        assert_eq!(model.classify(&instance).unwrap(), 0);

        // (rainy, true): yes = 0.7 * 2/7 * 2/7 = 4/70, no = 0.3 * 2/3 * 1 = 0.2
        let instance = weather_instance("rainy", "true", "no");
        let posteriors = model.class_posteriors(&instance).unwrap();
        let yes = 0.7 * (2.0 / 7.0) * (2.0 / 7.0);
        let no = 0.3 * (2.0 / 3.0) * 1.0;
        assert!((posteriors[0] - yes / (yes + no)).abs() < EPS);
        assert!((posteriors[1] - no / (yes + no)).abs() < EPS);
        assert_eq!(model.classify(&instance).unwrap(), 1);
    }

    #[test]
    fn posteriors_sum_to_one() {
        let model = NaiveBayes::fit(&weather_dataset()).unwrap();
        let instance = weather_instance("rainy", "true", "no");
        let sum: f64 = model.class_posteriors(&instance).unwrap().iter().sum();
        assert!((sum - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_probability_pair_zeroes_the_class_score() {
        let model = NaiveBayes::fit(&weather_dataset()).unwrap();
        // overcast never co-occurred with "no", windy=false never with "no":
        // the no-score collapses to exactly 0.0
        let instance = weather_instance("overcast", "false", "yes");
        let posteriors = model.class_posteriors(&instance).unwrap();
        assert_eq!(posteriors[1], 0.0);
        assert!((posteriors[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn ties_resolve_to_the_first_declared_class() {
        use crate::core::attributes::NominalAttribute;
        use std::sync::Arc;

        // one attribute whose value is equally likely under both classes,
        // balanced priors: both posteriors are exactly 0.5
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::with_values(
                "bit".into(),
                vec!["off".into(), "on".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "class".into(),
                vec!["first".into(), "second".into()],
            )) as AttributeRef,
        ];
        let header = Arc::new(InstanceHeader::new("tie".into(), attributes, 1));
        let rows = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let instances: Vec<Arc<dyn Instance>> = rows
            .iter()
            .map(|values| {
                Arc::new(DenseInstance::new(Arc::clone(&header), values.to_vec()))
                    as Arc<dyn Instance>
            })
            .collect();
        let dataset = Dataset::new(Arc::clone(&header), instances);

        let model = NaiveBayes::fit(&dataset).unwrap();
        let probe = DenseInstance::new(header, vec![0.0, 0.0]);
        let posteriors = model.class_posteriors(&probe).unwrap();
        assert!((posteriors[0] - 0.5).abs() < EPS);
        assert!((posteriors[1] - 0.5).abs() < EPS);
        assert_eq!(model.classify(&probe).unwrap(), 0);
    }

    #[test]
    fn all_zero_scores_are_degenerate_evidence() {
        use crate::core::attributes::NominalAttribute;
        use std::sync::Arc;

        // training: (p, r) -> A and (q, s) -> B; probing (p, s) zeroes both
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::with_values(
                "a1".into(),
                vec!["p".into(), "q".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "a2".into(),
                vec!["r".into(), "s".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "class".into(),
                vec!["A".into(), "B".into()],
            )) as AttributeRef,
        ];
        let header = Arc::new(InstanceHeader::new("xor".into(), attributes, 2));
        let rows = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let instances: Vec<Arc<dyn Instance>> = rows
            .iter()
            .map(|values| {
                Arc::new(DenseInstance::new(Arc::clone(&header), values.to_vec()))
                    as Arc<dyn Instance>
            })
            .collect();
        let dataset = Dataset::new(Arc::clone(&header), instances);

        let model = NaiveBayes::fit(&dataset).unwrap();
        let probe = DenseInstance::new(header, vec![0.0, 1.0, 0.0]);
        assert!(matches!(
            model.classify(&probe).unwrap_err(),
            ModelError::DegenerateEvidence
        ));
    }

    #[test]
    fn unseen_label_is_an_unknown_value() {
        use crate::core::attributes::NominalAttribute;
        use std::sync::Arc;

        let model = NaiveBayes::fit(&weather_dataset()).unwrap();

        // probe built against a wider schema than the model was trained on
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::with_values(
                "outlook".into(),
                vec!["sunny".into(), "overcast".into(), "rainy".into(), "snowy".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "windy".into(),
                vec!["false".into(), "true".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "play".into(),
                vec!["yes".into(), "no".into()],
            )) as AttributeRef,
        ];
        let header = Arc::new(InstanceHeader::new("weather".into(), attributes, 2));
        let probe = DenseInstance::new(header, vec![3.0, 0.0, 0.0]);
        assert!(matches!(
            model.classify(&probe).unwrap_err(),
            ModelError::UnknownValue { ref attribute, ref value }
                if attribute == "outlook" && value == "snowy"
        ));
    }

    #[test]
    fn numeric_attributes_are_skipped_during_training() {
        use crate::core::attributes::NominalAttribute;
        use std::sync::Arc;

        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("raw".into())) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "bit".into(),
                vec!["off".into(), "on".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "class".into(),
                vec!["A".into(), "B".into()],
            )) as AttributeRef,
        ];
        let header = Arc::new(InstanceHeader::new("mixed".into(), attributes, 2));
        let rows = [[0.5, 0.0, 0.0], [1.5, 1.0, 1.0]];
        let instances: Vec<Arc<dyn Instance>> = rows
            .iter()
            .map(|values| {
                Arc::new(DenseInstance::new(Arc::clone(&header), values.to_vec()))
                    as Arc<dyn Instance>
            })
            .collect();
        let dataset = Dataset::new(header, instances);

        let model = NaiveBayes::fit(&dataset).unwrap();
        assert_eq!(model.conditional_probabilities().len(), 1);
        assert_eq!(model.conditional_probabilities()[0].attribute_name(), "bit");
    }

    #[test]
    fn numeric_class_attribute_fails_loudly() {
        let error = NaiveBayes::fit(&numeric_class_dataset()).unwrap_err();
        assert!(matches!(error, ModelError::InvalidAttribute { .. }));
    }

    #[test]
    fn discretize_then_classify_end_to_end() {
        let dataset = numeric_dataset(&[(1.0, 0), (1.1, 0), (9.0, 1), (9.2, 1)]);
        let discretized = KMeansDiscretizer::new()
            .with_number_of_centers(2)
            .discretize(0, &dataset)
            .unwrap();
        let model = NaiveBayes::fit(&discretized).unwrap();

        for instance in discretized.instances() {
            let predicted = model.classify(instance.as_ref()).unwrap();
            assert_eq!(predicted as f64, instance.class_value().unwrap());
        }
    }
}
