//! Tax report model.
//!
//! This module contains the [`TaxReport`] type aggregating every figure of a
//! salary breakdown, and the rendering of that report as labelled text lines.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency marker appended to every rendered amount.
pub const CURRENCY_SUFFIX: &str = "€";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Example
///
/// ```
/// use salary_engine::models::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("2142.857").unwrap()).to_string(), "2142.86");
/// assert_eq!(round_half_up(Decimal::from_str("0.005").unwrap()).to_string(), "0.01");
/// assert_eq!(round_half_up(Decimal::from(30_000)).to_string(), "30000.00");
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount with two fractional digits and the currency suffix.
pub fn format_currency(value: Decimal) -> String {
    format!("{} {}", round_half_up(value), CURRENCY_SUFFIX)
}

/// Formats a percentage (already scaled to 0-100) with two fractional digits.
pub fn format_percent(value: Decimal) -> String {
    format!("{} %", round_half_up(value))
}

/// An amount expressed both per year and per payment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmount {
    /// The annual amount.
    pub annual: Decimal,
    /// The amount per period.
    pub monthly: Decimal,
}

impl PeriodAmount {
    /// Creates a pair from an annual amount and the number of periods it is spread over.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::PeriodAmount;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = PeriodAmount::spread(Decimal::from(1_200), Decimal::from(12));
    /// assert_eq!(amount.monthly, Decimal::from(100));
    /// ```
    pub fn spread(annual: Decimal, periods: Decimal) -> Self {
        Self {
            annual,
            monthly: annual / periods,
        }
    }
}

/// The exemption figures of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionFigures {
    /// Whether the gross salary falls under the exemption ceiling.
    pub applicable: bool,
    /// The exemption percentage as a fraction (e.g. 0.06).
    pub rate: Decimal,
    /// The exemption amount per year and per month.
    pub amount: PeriodAmount,
}

/// The complete breakdown of a gross salary into withholdings and net pay.
///
/// Amounts are kept at full precision; rounding to two decimals happens only
/// when the report is rendered through its [`Display`](fmt::Display) impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReport {
    /// Number of payments the annual salary is spread over.
    pub payments_per_year: u32,
    /// Display name of the region applying the regional surtax.
    pub region_name: String,
    /// Display name of the municipality applying the municipal surtax.
    pub municipality_name: String,
    /// Gross salary per year and per payment.
    pub gross_salary: PeriodAmount,
    /// Gross salary per payment, rounded up to the next whole euro.
    pub monthly_gross_rounded: Decimal,
    /// Social-security contribution per year and per payment.
    pub social_security: PeriodAmount,
    /// Taxable income (gross salary minus social-security contribution).
    pub taxable_income: Decimal,
    /// Income tax before the exemption.
    pub gross_income_tax: Decimal,
    /// Exemption figures.
    pub exemption: ExemptionFigures,
    /// Income tax after the exemption, per year and per month.
    pub income_tax: PeriodAmount,
    /// Prorated employment tax credit, per year and per payment.
    pub tax_credit: PeriodAmount,
    /// Regional surtax per year and per month.
    pub regional_surtax: PeriodAmount,
    /// Municipal surtax per year and per month.
    pub municipal_surtax: PeriodAmount,
    /// Total tax (income tax plus surtaxes minus credit, floored at zero).
    pub total_tax: PeriodAmount,
    /// Total tax as a percentage of the gross salary.
    pub effective_tax_rate: Decimal,
    /// Total withholding (total tax plus social-security contribution).
    pub total_withholding: PeriodAmount,
    /// Net salary per year and per payment.
    pub net_salary: PeriodAmount,
}

fn write_line(f: &mut fmt::Formatter<'_>, label: &str, value: String) -> fmt::Result {
    writeln!(f, " {:<38}: {}", label, value)
}

impl fmt::Display for TaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(f, "Gross salary (RAL)", format_currency(self.gross_salary.annual))?;
        write_line(f, "Gross salary per payment", format_currency(self.gross_salary.monthly))?;
        write_line(
            f,
            "Gross salary per payment, rounded",
            format_currency(self.monthly_gross_rounded),
        )?;
        write_line(f, "INPS annual", format_currency(self.social_security.annual))?;
        write_line(f, "INPS per payment", format_currency(self.social_security.monthly))?;
        write_line(f, "Taxable income", format_currency(self.taxable_income))?;

        if self.exemption.applicable {
            write_line(
                f,
                "IRPEF exemption",
                format_percent(self.exemption.rate * Decimal::ONE_HUNDRED),
            )?;
            write_line(
                f,
                "IRPEF exemption annual",
                format_currency(self.exemption.amount.annual),
            )?;
            write_line(
                f,
                "IRPEF exemption monthly",
                format_currency(self.exemption.amount.monthly),
            )?;
        }

        write_line(f, "IRPEF annual", format_currency(self.income_tax.annual))?;
        write_line(f, "IRPEF monthly", format_currency(self.income_tax.monthly))?;
        write_line(f, "Tax credit annual", format_currency(self.tax_credit.annual))?;
        write_line(f, "Tax credit per payment", format_currency(self.tax_credit.monthly))?;
        write_line(
            f,
            &format!("Regional surtax {} annual", self.region_name),
            format_currency(self.regional_surtax.annual),
        )?;
        write_line(
            f,
            &format!("Regional surtax {} monthly", self.region_name),
            format_currency(self.regional_surtax.monthly),
        )?;
        write_line(
            f,
            &format!("Municipal surtax {} annual", self.municipality_name),
            format_currency(self.municipal_surtax.annual),
        )?;
        write_line(
            f,
            &format!("Municipal surtax {} monthly", self.municipality_name),
            format_currency(self.municipal_surtax.monthly),
        )?;
        write_line(f, "Total tax annual", format_currency(self.total_tax.annual))?;
        write_line(f, "Total tax per payment", format_currency(self.total_tax.monthly))?;
        write_line(f, "Total tax rate", format_percent(self.effective_tax_rate))?;
        write_line(
            f,
            "Total withholding annual",
            format_currency(self.total_withholding.annual),
        )?;
        write_line(
            f,
            "Total withholding per payment",
            format_currency(self.total_withholding.monthly),
        )?;
        write_line(f, "Net salary annual", format_currency(self.net_salary.annual))?;
        write_line(f, "Net salary per payment", format_currency(self.net_salary.monthly))
    }
}
