use thiserror::Error;

/// Caller contract violations rejected by [`crate::engine::evaluate`].
///
/// Short or empty series are never errors; they degrade inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("invalid input: candle {index} has non-finite {field} ({value})")]
    NonFiniteCandle {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("invalid input: {name} must be finite, got {value}")]
    NonFiniteScalar { name: &'static str, value: f64 },
}
