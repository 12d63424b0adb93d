//! Salary input model.
//!
//! This module contains the [`SalaryInput`] type describing a single breakdown
//! request: the gross annual salary and the context it is paid in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, ensure_non_negative};

/// Default number of salary payments per year (12 monthly + 2 additional).
pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 14;

/// Default region code.
pub const DEFAULT_REGION: &str = "emilia_romagna";

/// Default municipality code.
pub const DEFAULT_MUNICIPALITY: &str = "bologna";

/// The inputs of a salary breakdown.
///
/// # Example
///
/// ```
/// use salary_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(30_000));
/// assert_eq!(input.payments_per_year, 14);
/// assert_eq!(input.region, "emilia_romagna");
/// assert_eq!(input.municipality, "bologna");
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Gross annual salary (RAL).
    pub gross_salary: Decimal,
    /// Number of salary payments per year (e.g. 12 or 14).
    pub payments_per_year: u32,
    /// Region code used to select the regional surtax schedule.
    pub region: String,
    /// Municipality code used to select the municipal surtax rate.
    pub municipality: String,
}

impl SalaryInput {
    /// Creates an input with the default payment convention, region and municipality.
    pub fn new(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            payments_per_year: DEFAULT_PAYMENTS_PER_YEAR,
            region: DEFAULT_REGION.to_string(),
            municipality: DEFAULT_MUNICIPALITY.to_string(),
        }
    }

    /// Sets the number of payments per year.
    pub fn with_payments_per_year(mut self, payments_per_year: u32) -> Self {
        self.payments_per_year = payments_per_year;
        self
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the municipality code.
    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = municipality.into();
        self
    }

    /// Checks that the salary is not negative and at least one payment is made per year.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative("gross_salary", self.gross_salary)?;
        if self.payments_per_year == 0 {
            return Err(EngineError::InvalidPaymentCount {
                count: self.payments_per_year,
            });
        }
        Ok(())
    }

    /// Returns the payment count as a decimal divisor.
    pub fn payments(&self) -> Decimal {
        Decimal::from(self.payments_per_year)
    }
}
