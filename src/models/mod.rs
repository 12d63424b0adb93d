//! Core data models for the Net Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bracket;
mod breakdown_result;
mod salary_input;
mod tax_report;

pub use bracket::{BracketSchedule, TaxBracket};
pub use breakdown_result::{AuditStep, AuditTrace, AuditWarning, BreakdownResult};
pub use salary_input::{
    DEFAULT_MUNICIPALITY, DEFAULT_PAYMENTS_PER_YEAR, DEFAULT_REGION, SalaryInput,
};
pub use tax_report::{
    CURRENCY_SUFFIX, ExemptionFigures, PeriodAmount, TaxReport, format_currency, format_percent,
    round_half_up,
};
