//! Municipal surtax (addizionale comunale) calculation functionality.

use rust_decimal::Decimal;

use crate::config::MunicipalityConfig;
use crate::error::{EngineResult, ensure_non_negative};
use crate::models::AuditStep;

/// The result of a municipal surtax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct MunicipalSurtaxResult {
    /// Annual municipal surtax.
    pub surtax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the municipal surtax as a flat share of annual taxable income.
///
/// # Errors
///
/// Returns `InvalidInput` if `taxable_income` is negative.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_municipal_surtax;
/// use salary_engine::config::MunicipalityConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bologna = MunicipalityConfig {
///     name: "Bologna".to_string(),
///     legal_ref: "D.Lgs. 360/1998, art. 1".to_string(),
///     rate: Decimal::from_str("0.008").unwrap(),
/// };
///
/// let result = calculate_municipal_surtax(Decimal::from(10_000), &bologna, 1).unwrap();
/// assert_eq!(result.surtax, Decimal::from(80));
/// ```
pub fn calculate_municipal_surtax(
    taxable_income: Decimal,
    municipality: &MunicipalityConfig,
    step_number: u32,
) -> EngineResult<MunicipalSurtaxResult> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let surtax = taxable_income * municipality.rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "municipal_surtax".to_string(),
        rule_name: format!("Municipal Surtax {}", municipality.name),
        legal_ref: municipality.legal_ref.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "municipality": municipality.name,
            "rate": municipality.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "surtax": surtax.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            taxable_income.normalize(),
            municipality.rate.normalize(),
            surtax.normalize()
        ),
    };

    Ok(MunicipalSurtaxResult { surtax, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{bologna, dec};
    use crate::error::EngineError;

    /// MS-001: flat rate on 27,072.90
    #[test]
    fn test_flat_rate() {
        let result = calculate_municipal_surtax(dec("27072.90"), &bologna(), 1).unwrap();
        assert_eq!(result.surtax, dec("216.5832"));
    }

    /// MS-002: zero income
    #[test]
    fn test_zero_income() {
        let result = calculate_municipal_surtax(Decimal::ZERO, &bologna(), 1).unwrap();
        assert_eq!(result.surtax, Decimal::ZERO);
    }

    /// MS-003: negative input
    #[test]
    fn test_negative_income_returns_invalid_input() {
        let result = calculate_municipal_surtax(dec("-0.01"), &bologna(), 1);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_audit_step_records_rate() {
        let result = calculate_municipal_surtax(dec("27072.90"), &bologna(), 5).unwrap();

        assert_eq!(result.audit_step.step_number, 5);
        assert_eq!(result.audit_step.input["rate"].as_str().unwrap(), "0.008");
        assert_eq!(result.audit_step.reasoning, "27072.9 x 0.008 = 216.5832");
    }
}
