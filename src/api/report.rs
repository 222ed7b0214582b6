use crate::core::{TAX_YEAR, TaxBreakdown, TaxInput};

const RULE: &str = "-------------------------------";

pub fn render_report(input: &TaxInput, breakdown: &TaxBreakdown) -> String {
    let mut lines = vec![
        format!(
            "Tax Calculation Results ({TAX_YEAR}, {}):",
            breakdown.filing_status
        ),
        RULE.to_string(),
        format!(
            "Total compensation: {}",
            format_money(input.total_compensation)
        ),
    ];
    if input.extra_income != 0.0 {
        lines.push(format!("Extra income: {}", format_money(input.extra_income)));
    }
    lines.push(format!(
        "Pre-tax deductions: {}",
        format_money(input.pre_tax_deductions)
    ));
    if input.roth_conversions != 0.0 {
        lines.push(format!(
            "Roth conversions: {}",
            format_money(input.roth_conversions)
        ));
    }
    lines.push(format!(
        "Taxable income: {}",
        format_money(breakdown.income_base)
    ));
    lines.push(format!(
        "Total itemized deductions: {}",
        format_money(breakdown.itemized_deductions)
    ));
    lines.push(format!(
        "Deductible IRA contributions: {}",
        format_money(breakdown.deductible_ira)
    ));
    lines.push(format!(
        "Taxable after deductions: {}",
        format_money(breakdown.final_taxable)
    ));
    lines.push(RULE.to_string());
    lines.push(format!(
        "You will owe {} in federal income tax",
        format_money(breakdown.result.tax)
    ));
    lines.push(match breakdown.result.effective_tax_rate {
        Some(rate) => format!("Your effective tax rate is {rate:.2}%"),
        None => "Your effective tax rate is n/a (no gross income)".to_string(),
    });
    lines.join("\n")
}

/// `$1,234.56`, rounded to cents. Saturates above roughly 3.4e36 dollars.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
