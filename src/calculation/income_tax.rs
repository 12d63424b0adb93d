//! National income tax (IRPEF) calculation functionality.
//!
//! Income at or below the no-tax area owes nothing. Income inside the first
//! bracket is taxed in full at the first bracket's rate. Income above the first
//! bracket is taxed marginally, and the first bracket's slice then starts at the
//! no-tax area rather than at zero. The schedule therefore steps down just above
//! the first bracket bound.

use rust_decimal::Decimal;

use crate::config::IncomeTaxConfig;
use crate::error::{EngineResult, ensure_non_negative};
use crate::models::AuditStep;

use super::marginal::{BracketSlice, apply_marginal_schedule, describe_slices};

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Gross income tax before exemption and credits.
    pub tax: Decimal,
    /// Rate of the bracket the income falls into (zero inside the no-tax area).
    pub marginal_rate: Decimal,
    /// The taxed slices.
    pub slices: Vec<BracketSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross income tax on annual taxable income.
///
/// | Taxable income | Tax |
/// |---|---|
/// | up to 8,145 | 0 |
/// | up to 28,000 | income x 23% |
/// | up to 50,000 | (28,000 - 8,145) x 23% + (income - 28,000) x 35% |
/// | above | the same, plus (income - 50,000) x 43% over 22,000 x 35% |
///
/// # Errors
///
/// Returns `InvalidInput` if `taxable_income` is negative.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_income_tax;
/// use salary_engine::config::IncomeTaxConfig;
/// use salary_engine::models::{BracketSchedule, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let config = IncomeTaxConfig {
///     legal_ref: "TUIR art. 11".to_string(),
///     no_tax_area: dec("8145"),
///     schedule: BracketSchedule::new(
///         "irpef",
///         vec![
///             TaxBracket { up_to: Some(dec("28000")), rate: dec("0.23") },
///             TaxBracket { up_to: Some(dec("50000")), rate: dec("0.35") },
///             TaxBracket { up_to: None, rate: dec("0.43") },
///         ],
///     )
///     .unwrap(),
/// };
///
/// assert_eq!(calculate_income_tax(dec("27072.90"), &config, 1).unwrap().tax, dec("6226.767"));
/// assert_eq!(calculate_income_tax(dec("30000"), &config, 1).unwrap().tax, dec("5266.65"));
/// ```
pub fn calculate_income_tax(
    taxable_income: Decimal,
    config: &IncomeTaxConfig,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let (tax, marginal_rate, slices) = if taxable_income <= config.no_tax_area {
        (Decimal::ZERO, Decimal::ZERO, Vec::new())
    } else {
        taxed_income(taxable_income, config)
    };

    let reasoning = if taxable_income <= config.no_tax_area {
        format!(
            "Taxable income {} is within the no-tax area {} - no IRPEF due",
            taxable_income.normalize(),
            config.no_tax_area.normalize()
        )
    } else {
        format!("{} = {}", describe_slices(&slices), tax.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "IRPEF".to_string(),
        legal_ref: config.legal_ref.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "no_tax_area": config.no_tax_area.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "marginal_rate": marginal_rate.normalize().to_string(),
            "slices": slices
        }),
        reasoning,
    };

    Ok(IncomeTaxResult {
        tax,
        marginal_rate,
        slices,
        audit_step,
    })
}

/// Tax on income above the no-tax area.
fn taxed_income(
    taxable_income: Decimal,
    config: &IncomeTaxConfig,
) -> (Decimal, Decimal, Vec<BracketSlice>) {
    let first = &config.schedule.brackets()[0];

    match first.up_to {
        Some(up_to) if taxable_income > up_to => {
            let mut marginal = apply_marginal_schedule(taxable_income, &config.schedule);
            let carved_out = config.no_tax_area * first.rate;
            if let Some(slice) = marginal.slices.first_mut().filter(|s| s.lower.is_zero()) {
                slice.lower = config.no_tax_area;
                slice.taxed_amount -= config.no_tax_area;
                slice.tax -= carved_out;
            }
            let rate = config.schedule.bracket_for(taxable_income).rate;
            (marginal.tax - carved_out, rate, marginal.slices)
        }
        _ => {
            let tax = taxable_income * first.rate;
            let slice = BracketSlice {
                lower: Decimal::ZERO,
                upper: first.up_to,
                rate: first.rate,
                taxed_amount: taxable_income,
                tax,
            };
            (tax, first.rate, vec![slice])
        }
    }
}
