mod brackets;
mod deductions;
mod engine;
mod error;
mod types;

pub use brackets::{TAX_YEAR, brackets_for, standard_deduction_for};
pub use deductions::{DeductionChoice, deductible_ira, itemized_sum, resolve};
pub use engine::{compute, compute_breakdown, effective_tax_rate, progressive_tax};
pub use error::TaxError;
pub use types::{Bracket, FilingStatus, TaxBreakdown, TaxInput, TaxResult};
