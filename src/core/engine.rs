use super::brackets::{brackets_for, standard_deduction_for};
use super::deductions;
use super::types::{Bracket, TaxBreakdown, TaxInput, TaxResult};

pub fn compute(input: &TaxInput) -> TaxResult {
    compute_breakdown(input).result
}

pub fn compute_breakdown(input: &TaxInput) -> TaxBreakdown {
    let input = input.normalized();
    let status = input.filing_status;
    let brackets = brackets_for(status);
    let standard_deduction = standard_deduction_for(status);

    let gross_income = input.gross_income();
    let income_base = gross_income - input.pre_tax_deductions;
    let taxable_before_choice = income_base + input.roth_conversions - standard_deduction;

    let choice = deductions::resolve(status, taxable_before_choice, &input, income_base);
    let final_taxable = choice.selected();

    let tax = progressive_tax(final_taxable, brackets);

    TaxBreakdown {
        filing_status: status,
        gross_income,
        income_base,
        deductible_ira: choice.deductible_ira,
        standard_deduction,
        itemized_deductions: choice.itemized_sum,
        taxable_before_choice,
        final_taxable,
        used_itemized_branch: choice.itemized_selected(),
        result: TaxResult {
            tax,
            effective_tax_rate: effective_tax_rate(tax, gross_income),
        },
    }
}

/// Walks the schedule from the bottom, consuming each bracket's width
/// (`upper - lower + 1`) from the remaining taxable dollars.
pub fn progressive_tax(taxable: f64, brackets: &[Bracket]) -> f64 {
    let mut remaining = taxable;
    let mut tax = 0.0;
    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let width = bracket.width();
        if remaining > width {
            tax += width * bracket.rate;
            remaining -= width;
        } else {
            tax += remaining * bracket.rate;
            break;
        }
    }
    tax
}

pub fn effective_tax_rate(tax: f64, gross_income: f64) -> Option<f64> {
    if gross_income == 0.0 {
        None
    } else {
        Some(100.0 * tax / gross_income)
    }
}
