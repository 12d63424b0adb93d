//! Calculation logic for the Net Salary Engine.
//!
//! This module contains the calculators that turn a gross annual salary into
//! its withholdings: social-security contribution, national income tax, the
//! temporary exemption, regional and municipal surtax, and the employment tax
//! credit. [`generate_breakdown`] runs them in order and assembles the report.

mod breakdown;
mod exemption;
mod income_tax;
mod marginal;
mod municipal_surtax;
mod regional_surtax;
mod social_security;
mod tax_credit;

/// Months in a fiscal year; divisor for the figures spread evenly over the year.
pub const MONTHS_PER_YEAR: u32 = 12;

pub use breakdown::{generate_breakdown, generate_report};
pub use exemption::{ExemptionResult, apply_exemption, calculate_exemption};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use marginal::{BracketSlice, MarginalTaxResult, apply_marginal_schedule};
pub use municipal_surtax::{MunicipalSurtaxResult, calculate_municipal_surtax};
pub use regional_surtax::{RegionalSurtaxResult, calculate_regional_surtax};
pub use social_security::{SocialSecurityResult, calculate_social_security};
pub use tax_credit::{TaxCreditResult, calculate_tax_credit, prorate_tax_credit};
