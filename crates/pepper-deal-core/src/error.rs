use thiserror::Error;

#[derive(Debug, Error)]
pub enum PepperDealError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),
}

impl PepperDealError {
    pub(crate) fn overflow(context: &str) -> Self {
        PepperDealError::ArithmeticOverflow {
            context: context.to_string(),
        }
    }
}
