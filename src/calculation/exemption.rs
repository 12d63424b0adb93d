//! Temporary exemption (esonero) calculation functionality.
//!
//! Lower salaries receive a percentage of their rounded monthly gross back,
//! annualized over twelve months and deducted from income tax.

use rust_decimal::Decimal;

use crate::config::ExemptionConfig;
use crate::error::{EngineError, EngineResult, ensure_non_negative};
use crate::models::AuditStep;

use super::MONTHS_PER_YEAR;

/// The result of an exemption calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ExemptionResult {
    /// Whether the gross salary is at or below the exemption ceiling.
    pub applicable: bool,
    /// Gross salary per payment, rounded up to the next whole euro.
    pub monthly_gross_rounded: Decimal,
    /// The selected exemption percentage as a fraction.
    pub rate: Decimal,
    /// Monthly exemption amount.
    pub monthly_amount: Decimal,
    /// Annual exemption amount (monthly x 12).
    pub annual_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the exemption for a gross annual salary.
///
/// The rounded monthly gross is `ceil(gross_salary / payments_per_year)`. When the
/// gross salary is at or below the ceiling, the first band whose bound is not
/// exceeded by the rounded monthly gross sets the percentage; above every band it
/// is 0%.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary and `InvalidPaymentCount` for zero payments.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_exemption;
/// use salary_engine::config::{ExemptionBand, ExemptionConfig};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let config = ExemptionConfig {
///     legal_ref: "L. 197/2022, art. 1, c. 281".to_string(),
///     gross_salary_ceiling: dec("35000"),
///     bands: vec![
///         ExemptionBand { monthly_up_to: dec("1923"), rate: dec("0.07") },
///         ExemptionBand { monthly_up_to: dec("2692"), rate: dec("0.06") },
///     ],
/// };
///
/// let result = calculate_exemption(dec("30000"), 14, &config, 1).unwrap();
/// assert_eq!(result.monthly_gross_rounded, dec("2143"));
/// assert_eq!(result.rate, dec("0.06"));
/// assert_eq!(result.annual_amount, dec("1542.96"));
/// ```
pub fn calculate_exemption(
    gross_salary: Decimal,
    payments_per_year: u32,
    config: &ExemptionConfig,
    step_number: u32,
) -> EngineResult<ExemptionResult> {
    ensure_non_negative("gross_salary", gross_salary)?;
    if payments_per_year == 0 {
        return Err(EngineError::InvalidPaymentCount {
            count: payments_per_year,
        });
    }

    let monthly_gross_rounded = (gross_salary / Decimal::from(payments_per_year)).ceil();
    let applicable = gross_salary <= config.gross_salary_ceiling;

    let rate = if applicable {
        config
            .bands
            .iter()
            .find(|band| monthly_gross_rounded <= band.monthly_up_to)
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let monthly_amount = monthly_gross_rounded * rate;
    let annual_amount = monthly_amount * Decimal::from(MONTHS_PER_YEAR);

    let reasoning = if applicable {
        format!(
            "ceil({} / {}) = {}; {} x {} x {} = {}",
            gross_salary.normalize(),
            payments_per_year,
            monthly_gross_rounded.normalize(),
            monthly_gross_rounded.normalize(),
            rate.normalize(),
            MONTHS_PER_YEAR,
            annual_amount.normalize()
        )
    } else {
        format!(
            "Gross salary {} exceeds the exemption ceiling {} - no exemption",
            gross_salary.normalize(),
            config.gross_salary_ceiling.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "exemption".to_string(),
        rule_name: "IRPEF Exemption".to_string(),
        legal_ref: config.legal_ref.clone(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "payments_per_year": payments_per_year,
            "gross_salary_ceiling": config.gross_salary_ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "applicable": applicable,
            "monthly_gross_rounded": monthly_gross_rounded.normalize().to_string(),
            "rate": rate.normalize().to_string(),
            "monthly_amount": monthly_amount.normalize().to_string(),
            "annual_amount": annual_amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(ExemptionResult {
        applicable,
        monthly_gross_rounded,
        rate,
        monthly_amount,
        annual_amount,
        audit_step,
    })
}

/// Deducts an annual exemption from income tax, flooring the result at zero.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::apply_exemption;
/// use rust_decimal::Decimal;
///
/// assert_eq!(apply_exemption(Decimal::from(500), Decimal::from(200)), Decimal::from(300));
/// assert_eq!(apply_exemption(Decimal::from(100), Decimal::from(200)), Decimal::ZERO);
/// ```
pub fn apply_exemption(income_tax: Decimal, annual_exemption: Decimal) -> Decimal {
    (income_tax - annual_exemption).max(Decimal::ZERO)
}
