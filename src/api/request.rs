//! Request types for the Net Salary Engine API.
//!
//! This module defines the JSON request structure shared by the `/breakdown`
//! endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_MUNICIPALITY, DEFAULT_PAYMENTS_PER_YEAR, DEFAULT_REGION, SalaryInput};

fn default_payments_per_year() -> u32 {
    DEFAULT_PAYMENTS_PER_YEAR
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_municipality() -> String {
    DEFAULT_MUNICIPALITY.to_string()
}

/// Request body for the `/breakdown` endpoints.
///
/// Only `gross_salary` is required; the payment convention defaults to 14
/// payments in Bologna, Emilia-Romagna.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// Gross annual salary (RAL).
    pub gross_salary: Decimal,
    /// Number of salary payments per year.
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
    /// Region code applying the regional surtax.
    #[serde(default = "default_region")]
    pub region: String,
    /// Municipality code applying the municipal surtax.
    #[serde(default = "default_municipality")]
    pub municipality: String,
}

impl From<BreakdownRequest> for SalaryInput {
    fn from(req: BreakdownRequest) -> Self {
        SalaryInput::new(req.gross_salary)
            .with_payments_per_year(req.payments_per_year)
            .with_region(req.region)
            .with_municipality(req.municipality)
    }
}
