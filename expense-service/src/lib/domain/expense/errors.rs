use thiserror::Error;

/// Error for Amount validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount too large: maximum {max}")]
    TooLarge { max: String },
}

/// Error for required text fields (purpose, account name)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextFieldError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Error for expense date parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpenseDateError {
    #[error("Invalid date '{0}': expected RFC 3339 timestamp or YYYY-MM-DD")]
    InvalidFormat(String),
}

/// Top-level error for all expense-related operations
#[derive(Debug, Clone, Error)]
pub enum ExpenseError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid field: {0}")]
    InvalidField(#[from] TextFieldError),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] ExpenseDateError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
