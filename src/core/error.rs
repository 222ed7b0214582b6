use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaxError {
    #[error("Unknown filing status '{0}', expected 'single' or 'married'")]
    UnknownFilingStatus(String),

    #[error("Invalid amount for {field}: {value} (must be finite and non-negative)")]
    InvalidAmount { field: &'static str, value: f64 },
}
