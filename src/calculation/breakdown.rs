//! Salary breakdown orchestration.
//!
//! Runs the calculators in order on a [`SalaryInput`] and aggregates their
//! figures into a [`TaxReport`]. The sequence is:
//!
//! 1. social-security contribution on gross salary
//! 2. income tax on taxable income (gross minus contribution)
//! 3. exemption deducted from income tax, floored at zero
//! 4. regional and municipal surtax on taxable income
//! 5. employment tax credit, prorated to the payment convention
//! 6. total tax, total withholding and net salary

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::TaxConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BreakdownResult, ExemptionFigures, PeriodAmount,
    SalaryInput, TaxReport,
};

use super::{
    MONTHS_PER_YEAR, apply_exemption, calculate_exemption, calculate_income_tax,
    calculate_municipal_surtax, calculate_regional_surtax, calculate_social_security,
    calculate_tax_credit, prorate_tax_credit,
};

/// Legal reference recorded on the totals step.
const WITHHOLDING_LEGAL_REF: &str = "D.P.R. 600/1973, art. 23";

struct Computation {
    report: TaxReport,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

/// Computes the tax report for a salary input.
///
/// The report is a pure function of the input and configuration: calling this
/// twice with the same arguments yields equal reports.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative gross salary, `InvalidPaymentCount` for
/// zero payments, and `RegionNotFound` / `MunicipalityNotFound` for unknown codes.
pub fn generate_report(input: &SalaryInput, config: &TaxConfig) -> EngineResult<TaxReport> {
    compute(input, config).map(|computation| computation.report)
}

/// Computes the tax report together with identifying metadata and the audit trace.
///
/// # Errors
///
/// Fails under the same conditions as [`generate_report`].
pub fn generate_breakdown(
    input: &SalaryInput,
    config: &TaxConfig,
) -> EngineResult<BreakdownResult> {
    let start_time = Instant::now();
    let computation = compute(input, config)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        gross_salary = %input.gross_salary,
        payments_per_year = input.payments_per_year,
        region = %input.region,
        municipality = %input.municipality,
        net_salary = %computation.report.net_salary.annual,
        duration_us,
        "Breakdown computed"
    );

    Ok(BreakdownResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: config.tax_year().year,
        input: input.clone(),
        report: computation.report,
        audit_trace: AuditTrace {
            steps: computation.steps,
            warnings: computation.warnings,
            duration_us,
        },
    })
}

fn compute(input: &SalaryInput, config: &TaxConfig) -> EngineResult<Computation> {
    input.validate()?;
    let region = config.region(&input.region)?;
    let municipality = config.municipality(&input.municipality)?;

    let gross = input.gross_salary;
    let payments = input.payments();
    let months = Decimal::from(MONTHS_PER_YEAR);

    let mut steps: Vec<AuditStep> = Vec::with_capacity(7);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let social_security = calculate_social_security(gross, config.social_security(), 1)?;
    let contribution = social_security.contribution;
    steps.push(social_security.audit_step);

    let taxable_income = gross - contribution;

    let income_tax = calculate_income_tax(taxable_income, config.income_tax(), 2)?;
    let gross_income_tax = income_tax.tax;
    steps.push(income_tax.audit_step);

    let exemption = calculate_exemption(gross, input.payments_per_year, config.exemption(), 3)?;
    let net_income_tax = apply_exemption(gross_income_tax, exemption.annual_amount);
    if exemption.annual_amount > gross_income_tax {
        warnings.push(AuditWarning {
            code: "INCOME_TAX_FLOORED".to_string(),
            message: format!(
                "Exemption {} exceeds income tax {}; income tax set to zero",
                exemption.annual_amount.normalize(),
                gross_income_tax.normalize()
            ),
            severity: "low".to_string(),
        });
    }
    let exemption_figures = ExemptionFigures {
        applicable: exemption.applicable,
        rate: exemption.rate,
        amount: PeriodAmount {
            annual: exemption.annual_amount,
            monthly: exemption.monthly_amount,
        },
    };
    let monthly_gross_rounded = exemption.monthly_gross_rounded;
    steps.push(exemption.audit_step);

    let regional = calculate_regional_surtax(taxable_income, region, 4)?;
    steps.push(regional.audit_step);

    let municipal = calculate_municipal_surtax(taxable_income, municipality, 5)?;
    steps.push(municipal.audit_step);

    let tax_credit = calculate_tax_credit(taxable_income, config.tax_credit(), 6)?;
    let prorated_credit = prorate_tax_credit(tax_credit.credit, input.payments_per_year)?;
    steps.push(tax_credit.audit_step);

    let tax_before_credit = net_income_tax + regional.surtax + municipal.surtax;
    let total_tax = (tax_before_credit - prorated_credit).max(Decimal::ZERO);
    if prorated_credit > tax_before_credit {
        warnings.push(AuditWarning {
            code: "TOTAL_TAX_FLOORED".to_string(),
            message: format!(
                "Tax credit {} exceeds tax due {}; total tax set to zero",
                prorated_credit.normalize(),
                tax_before_credit.normalize()
            ),
            severity: "low".to_string(),
        });
    }

    let total_withholding = total_tax + contribution;
    let net_salary = gross - total_withholding;
    let effective_tax_rate = if gross.is_zero() {
        Decimal::ZERO
    } else {
        total_tax / gross * Decimal::ONE_HUNDRED
    };

    steps.push(AuditStep {
        step_number: 7,
        rule_id: "net_salary".to_string(),
        rule_name: "Total Withholding and Net Salary".to_string(),
        legal_ref: WITHHOLDING_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "income_tax": net_income_tax.normalize().to_string(),
            "regional_surtax": regional.surtax.normalize().to_string(),
            "municipal_surtax": municipal.surtax.normalize().to_string(),
            "tax_credit": prorated_credit.normalize().to_string(),
            "contribution": contribution.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_tax": total_tax.normalize().to_string(),
            "total_withholding": total_withholding.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "max(0, {} + {} + {} - {}) = {}; {} - ({} + {}) = {}",
            net_income_tax.normalize(),
            regional.surtax.normalize(),
            municipal.surtax.normalize(),
            prorated_credit.normalize(),
            total_tax.normalize(),
            gross.normalize(),
            total_tax.normalize(),
            contribution.normalize(),
            net_salary.normalize()
        ),
    });

    let report = TaxReport {
        payments_per_year: input.payments_per_year,
        region_name: region.name.clone(),
        municipality_name: municipality.name.clone(),
        gross_salary: PeriodAmount::spread(gross, payments),
        monthly_gross_rounded,
        social_security: PeriodAmount::spread(contribution, payments),
        taxable_income,
        gross_income_tax,
        exemption: exemption_figures,
        income_tax: PeriodAmount::spread(net_income_tax, months),
        tax_credit: PeriodAmount::spread(prorated_credit, payments),
        regional_surtax: PeriodAmount::spread(regional.surtax, months),
        municipal_surtax: PeriodAmount::spread(municipal.surtax, months),
        total_tax: PeriodAmount::spread(total_tax, payments),
        effective_tax_rate,
        total_withholding: PeriodAmount::spread(total_withholding, payments),
        net_salary: PeriodAmount::spread(net_salary, payments),
    };

    Ok(Computation {
        report,
        steps,
        warnings,
    })
}
