use thiserror::Error;

/// Precondition violations raised by the discretizer and the classifier.
///
/// All variants are detected synchronously at the offending call. Nothing is
/// retried: the algorithms are deterministic, so a retry could not change the
/// outcome. Callers either validate inputs up front or catch and report.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("attribute '{name}' is not {expected}")]
    InvalidAttribute { name: String, expected: &'static str },

    #[error("value '{value}' of attribute '{attribute}' is not declared in the schema")]
    UnknownValue { attribute: String, value: String },

    #[error("all class scores are zero, the posterior is undefined")]
    DegenerateEvidence,

    #[error("requested {requested} centers for {instances} instances")]
    DegenerateConfiguration { requested: usize, instances: usize },
}
