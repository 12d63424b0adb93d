//! Regional surtax (addizionale regionale) calculation functionality.
//!
//! Regional schedules have no no-tax area: the first bracket is taxed from zero.

use rust_decimal::Decimal;

use crate::config::RegionConfig;
use crate::error::{EngineResult, ensure_non_negative};
use crate::models::AuditStep;

use super::marginal::{BracketSlice, apply_marginal_schedule, describe_slices};

/// The result of a regional surtax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct RegionalSurtaxResult {
    /// Annual regional surtax.
    pub surtax: Decimal,
    /// The taxed slices.
    pub slices: Vec<BracketSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the regional surtax on annual taxable income.
///
/// # Errors
///
/// Returns `InvalidInput` if `taxable_income` is negative.
pub fn calculate_regional_surtax(
    taxable_income: Decimal,
    region: &RegionConfig,
    step_number: u32,
) -> EngineResult<RegionalSurtaxResult> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let marginal = apply_marginal_schedule(taxable_income, &region.schedule);

    let audit_step = AuditStep {
        step_number,
        rule_id: "regional_surtax".to_string(),
        rule_name: format!("Regional Surtax {}", region.name),
        legal_ref: region.legal_ref.clone(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "region": region.name
        }),
        output: serde_json::json!({
            "surtax": marginal.tax.normalize().to_string(),
            "slices": marginal.slices
        }),
        reasoning: format!(
            "{} = {}",
            describe_slices(&marginal.slices),
            marginal.tax.normalize()
        ),
    };

    Ok(RegionalSurtaxResult {
        surtax: marginal.tax,
        slices: marginal.slices,
        audit_step,
    })
}
