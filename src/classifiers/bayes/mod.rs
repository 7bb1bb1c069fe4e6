mod attribute_conditional;
mod class_prior;
mod naive_bayes;
mod probability_table;

pub use attribute_conditional::AttributeConditionalProbability;
pub use class_prior::ClassPrior;
pub use naive_bayes::NaiveBayes;
pub use probability_table::ProbabilityTable;
