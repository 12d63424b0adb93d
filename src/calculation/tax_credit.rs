//! Employment tax credit (detrazioni) calculation functionality.
//!
//! This module computes the credit granted to dependent employees and the
//! proration applied to it under the payment convention of the employer.
//! Unlike the bracket schedules, each tier yields an absolute credit amount.

use rust_decimal::Decimal;

use crate::config::TaxCreditConfig;
use crate::error::{EngineError, EngineResult, ensure_non_negative};
use crate::models::AuditStep;

use super::MONTHS_PER_YEAR;

/// The result of a tax credit calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct TaxCreditResult {
    /// Annual credit before proration.
    pub credit: Decimal,
    /// One-based index of the tier the income fell into, `None` above the last tier.
    pub tier: Option<usize>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the annual employment tax credit for a taxable income.
///
/// Within a tier ending at `up_to` and starting at the previous tier's bound,
/// the credit is `base + variable x (up_to - income) / (up_to - start)`.
/// With the shipped tiers this gives:
///
/// | Taxable income | Credit |
/// |---|---|
/// | up to 15,000 | 1,955 |
/// | up to 28,000 | 1,910 + 1,190 x (28,000 - income) / 13,000 |
/// | up to 50,000 | 1,910 x (50,000 - income) / 22,000 |
/// | above | 0 |
///
/// # Errors
///
/// Returns `InvalidInput` if `taxable_income` is negative.
pub fn calculate_tax_credit(
    taxable_income: Decimal,
    config: &TaxCreditConfig,
    step_number: u32,
) -> EngineResult<TaxCreditResult> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let mut lower = Decimal::ZERO;
    let mut matched = None;

    for (index, tier) in config.tiers.iter().enumerate() {
        if taxable_income <= tier.up_to {
            let span = tier.up_to - lower;
            let decaying = (tier.variable * (tier.up_to - taxable_income))
                .checked_div(span)
                .unwrap_or(Decimal::ZERO);
            matched = Some((index + 1, tier.base + decaying, span));
            break;
        }
        lower = tier.up_to;
    }

    let (credit, tier, reasoning) = match matched {
        Some((tier_number, credit, span)) => {
            let tier_config = &config.tiers[tier_number - 1];
            let reasoning = if tier_config.variable.is_zero() {
                format!(
                    "Taxable income {} is in tier {} - fixed credit {}",
                    taxable_income.normalize(),
                    tier_number,
                    credit.normalize()
                )
            } else {
                format!(
                    "{} + {} x ({} - {}) / {} = {}",
                    tier_config.base.normalize(),
                    tier_config.variable.normalize(),
                    tier_config.up_to.normalize(),
                    taxable_income.normalize(),
                    span.normalize(),
                    credit.normalize()
                )
            };
            (credit, Some(tier_number), reasoning)
        }
        None => (
            Decimal::ZERO,
            None,
            format!(
                "Taxable income {} exceeds the last credit tier - no credit",
                taxable_income.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_credit".to_string(),
        rule_name: "Employment Tax Credit".to_string(),
        legal_ref: config.legal_ref.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "credit": credit.normalize().to_string(),
            "tier": tier
        }),
        reasoning,
    };

    Ok(TaxCreditResult {
        credit,
        tier,
        audit_step,
    })
}

/// Prorates an annual credit to the payment convention: `credit x 12 / payments_per_year`.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative credit and `InvalidPaymentCount` for zero payments.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::prorate_tax_credit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(prorate_tax_credit(Decimal::from(1_400), 14).unwrap(), Decimal::from(1_200));
/// assert_eq!(prorate_tax_credit(Decimal::from(1_400), 12).unwrap(), Decimal::from(1_400));
/// ```
pub fn prorate_tax_credit(annual_credit: Decimal, payments_per_year: u32) -> EngineResult<Decimal> {
    ensure_non_negative("annual_credit", annual_credit)?;
    if payments_per_year == 0 {
        return Err(EngineError::InvalidPaymentCount {
            count: payments_per_year,
        });
    }
    Ok(annual_credit * Decimal::from(MONTHS_PER_YEAR) / Decimal::from(payments_per_year))
}
