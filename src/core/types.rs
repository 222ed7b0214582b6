use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TaxError;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    Single,
    /// Married filing jointly.
    #[default]
    Married,
}

impl FilingStatus {
    /// Unrecognized values fall through to the married schedule.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(FilingStatus::Married)
    }

    pub fn resolve(raw: &str, strict: bool) -> Result<Self, TaxError> {
        if strict {
            raw.parse()
        } else {
            Ok(Self::parse_lenient(raw))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::Married => "married",
        }
    }
}

impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "single" => Ok(FilingStatus::Single),
            "married" | "married-filing-jointly" | "married_filing_jointly"
            | "marriedfilingjointly" | "mfj" => Ok(FilingStatus::Married),
            _ => Err(TaxError::UnknownFilingStatus(s.to_string())),
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Household income and deduction figures for one tax year, in dollars.
///
/// NaN is the blank sentinel and counts as zero once normalized.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TaxInput {
    pub total_compensation: f64,
    pub extra_income: f64,
    pub pre_tax_deductions: f64,
    pub roth_conversions: f64,
    pub mortgage_interest: f64,
    pub student_loan_interest: f64,
    pub hsa_contributions: f64,
    pub property_taxes: f64,
    pub state_local_taxes: f64,
    pub charitable_contributions: f64,
    /// Combined traditional + Roth IRA contributions for the year.
    pub traditional_roth_ira_contributions: f64,
    pub filing_status: FilingStatus,
}

impl TaxInput {
    pub fn normalized(&self) -> Self {
        let blank_to_zero = |v: f64| if v.is_nan() { 0.0 } else { v };
        Self {
            total_compensation: blank_to_zero(self.total_compensation),
            extra_income: blank_to_zero(self.extra_income),
            pre_tax_deductions: blank_to_zero(self.pre_tax_deductions),
            roth_conversions: blank_to_zero(self.roth_conversions),
            mortgage_interest: blank_to_zero(self.mortgage_interest),
            student_loan_interest: blank_to_zero(self.student_loan_interest),
            hsa_contributions: blank_to_zero(self.hsa_contributions),
            property_taxes: blank_to_zero(self.property_taxes),
            state_local_taxes: blank_to_zero(self.state_local_taxes),
            charitable_contributions: blank_to_zero(self.charitable_contributions),
            traditional_roth_ira_contributions: blank_to_zero(
                self.traditional_roth_ira_contributions,
            ),
            filing_status: self.filing_status,
        }
    }

    pub fn gross_income(&self) -> f64 {
        self.total_compensation + self.extra_income
    }

    pub fn amounts(&self) -> [(&'static str, f64); 11] {
        [
            ("totalCompensation", self.total_compensation),
            ("extraIncome", self.extra_income),
            ("preTaxDeductions", self.pre_tax_deductions),
            ("rothConversions", self.roth_conversions),
            ("mortgageInterest", self.mortgage_interest),
            ("studentLoanInterest", self.student_loan_interest),
            ("hsaContributions", self.hsa_contributions),
            ("propertyTaxes", self.property_taxes),
            ("stateLocalTaxes", self.state_local_taxes),
            ("charitableContributions", self.charitable_contributions),
            (
                "traditionalRothIraContributions",
                self.traditional_roth_ira_contributions,
            ),
        ]
    }

    /// Blank (NaN) amounts pass; infinities and negatives do not.
    pub fn validate(&self) -> Result<(), TaxError> {
        for (field, value) in self.amounts() {
            if value.is_nan() {
                continue;
            }
            if !value.is_finite() || value < 0.0 {
                return Err(TaxError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    /// Inclusive; `None` for the top bracket.
    pub upper: Option<f64>,
    pub rate: f64,
}

impl Bracket {
    pub const fn new(lower: f64, upper: f64, rate: f64) -> Self {
        Self {
            lower,
            upper: Some(upper),
            rate,
        }
    }

    pub const fn open(lower: f64, rate: f64) -> Self {
        Self {
            lower,
            upper: None,
            rate,
        }
    }

    /// Dollars the bracket consumes, counting both inclusive bounds.
    pub fn width(&self) -> f64 {
        match self.upper {
            Some(upper) => upper - self.lower + 1.0,
            None => f64::INFINITY,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub tax: f64,
    /// Percent of gross income; `None` when gross income is zero.
    pub effective_tax_rate: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub filing_status: FilingStatus,
    pub gross_income: f64,
    pub income_base: f64,
    pub deductible_ira: f64,
    pub standard_deduction: f64,
    pub itemized_deductions: f64,
    pub taxable_before_choice: f64,
    pub final_taxable: f64,
    pub used_itemized_branch: bool,
    #[serde(flatten)]
    pub result: TaxResult,
}
