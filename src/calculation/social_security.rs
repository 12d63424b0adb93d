//! Social-security contribution calculation functionality.
//!
//! This module computes the employee share of INPS contributions withheld from
//! the gross salary. The contribution is a flat proportion of gross pay.

use rust_decimal::Decimal;

use crate::config::SocialSecurityConfig;
use crate::error::{EngineResult, ensure_non_negative};
use crate::models::AuditStep;

/// The result of a social-security calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// Total contribution withheld.
    pub contribution: Decimal,
    /// Pension fund (FPLD IVS) component.
    pub pension_fund: Decimal,
    /// Wage guarantee fund (CIG) component.
    pub wage_guarantee: Decimal,
    /// Residual fund component.
    pub residual_fund: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the social-security contribution on a gross annual salary.
///
/// The contribution is `gross_salary x (pension + wage guarantee + residual)`,
/// 9.757% with the shipped rates.
///
/// # Errors
///
/// Returns `InvalidInput` if `gross_salary` is negative.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_social_security;
/// use salary_engine::config::SocialSecurityConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = SocialSecurityConfig {
///     legal_ref: "L. 335/1995".to_string(),
///     pension_fund_rate: Decimal::from_str("0.0919").unwrap(),
///     wage_guarantee_rate: Decimal::from_str("0.003").unwrap(),
///     residual_fund_rate: Decimal::from_str("0.00267").unwrap(),
/// };
///
/// let result = calculate_social_security(Decimal::from(30_000), &config, 1).unwrap();
/// assert_eq!(result.contribution, Decimal::from_str("2927.10").unwrap());
/// ```
pub fn calculate_social_security(
    gross_salary: Decimal,
    config: &SocialSecurityConfig,
    step_number: u32,
) -> EngineResult<SocialSecurityResult> {
    ensure_non_negative("gross_salary", gross_salary)?;

    let total_rate = config.total_rate();
    let contribution = gross_salary * total_rate;
    let pension_fund = gross_salary * config.pension_fund_rate;
    let wage_guarantee = gross_salary * config.wage_guarantee_rate;
    let residual_fund = gross_salary * config.residual_fund_rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security".to_string(),
        rule_name: "INPS Contribution".to_string(),
        legal_ref: config.legal_ref.clone(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "pension_fund_rate": config.pension_fund_rate.normalize().to_string(),
            "wage_guarantee_rate": config.wage_guarantee_rate.normalize().to_string(),
            "residual_fund_rate": config.residual_fund_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "contribution": contribution.normalize().to_string(),
            "pension_fund": pension_fund.normalize().to_string(),
            "wage_guarantee": wage_guarantee.normalize().to_string(),
            "residual_fund": residual_fund.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            gross_salary.normalize(),
            total_rate.normalize(),
            contribution.normalize()
        ),
    };

    Ok(SocialSecurityResult {
        contribution,
        pension_fund,
        wage_guarantee,
        residual_fund,
        audit_step,
    })
}
