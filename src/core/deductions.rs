use super::types::{FilingStatus, TaxInput};

const IRA_DEDUCTION_CAP: f64 = 6_000.0;
const IRA_PHASE_OUT_SLOPE: f64 = 0.2;

#[derive(Copy, Clone, Debug, PartialEq)]
struct IraPhaseOut {
    full_until: f64,
    ceiling: f64,
}

fn ira_phase_out(status: FilingStatus) -> IraPhaseOut {
    match status {
        FilingStatus::Single => IraPhaseOut {
            full_until: 73_000.0,
            ceiling: 84_000.0,
        },
        FilingStatus::Married => IraPhaseOut {
            full_until: 122_000.0,
            ceiling: 140_000.0,
        },
    }
}

/// Deductible portion of the IRA contribution for `income_base`
/// (compensation + extra income - pre-tax deductions).
pub fn deductible_ira(status: FilingStatus, income_base: f64, contribution: f64) -> f64 {
    let band = ira_phase_out(status);
    let allowance = if income_base > 0.0 && income_base <= band.full_until {
        contribution.min(IRA_DEDUCTION_CAP)
    } else if income_base > band.full_until && income_base <= band.ceiling {
        let reduced = IRA_DEDUCTION_CAP - IRA_PHASE_OUT_SLOPE * (income_base - band.full_until);
        contribution.min(reduced)
    } else {
        0.0
    };
    allowance.max(0.0)
}

pub fn itemized_sum(input: &TaxInput) -> f64 {
    input.mortgage_interest
        + input.student_loan_interest
        + input.hsa_contributions
        + input.property_taxes
        + input.state_local_taxes
        + input.charitable_contributions
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeductionChoice {
    /// Taxable income net of the standard deduction only.
    pub standard_branch: f64,
    /// `standard_branch - itemized_sum + deductible_ira`.
    pub itemized_branch: f64,
    pub deductible_ira: f64,
    pub itemized_sum: f64,
}

impl DeductionChoice {
    /// The larger taxable income wins. This is the established behavior and
    /// is not the taxpayer-favorable choice when itemized > IRA allowance.
    pub fn selected(&self) -> f64 {
        self.standard_branch.max(self.itemized_branch)
    }

    pub fn itemized_selected(&self) -> bool {
        self.itemized_branch > self.standard_branch
    }
}

pub fn resolve(
    status: FilingStatus,
    taxable_after_standard: f64,
    input: &TaxInput,
    income_base: f64,
) -> DeductionChoice {
    let deductible_ira = deductible_ira(
        status,
        income_base,
        input.traditional_roth_ira_contributions,
    );
    let itemized_sum = itemized_sum(input);
    DeductionChoice {
        standard_branch: taxable_after_standard,
        itemized_branch: taxable_after_standard - itemized_sum + deductible_ira,
        deductible_ira,
        itemized_sum,
    }
}
