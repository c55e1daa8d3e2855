use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid numeric value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Value for {field} must be non-negative")]
    NegativeValue { field: &'static str },
}

impl FilterError {
    /// Name of the query parameter the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            FilterError::InvalidNumber { field, .. } => field,
            FilterError::NegativeValue { field } => field,
        }
    }
}
