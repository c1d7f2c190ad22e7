use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanAmortError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanAmortError {
    fn from(e: serde_json::Error) -> Self {
        LoanAmortError::SerializationError(e.to_string())
    }
}
