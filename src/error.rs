//! Error types for the Net Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a salary breakdown.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Net Salary Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let error = EngineError::InvalidInput {
///     field: "gross_salary".to_string(),
///     value: Decimal::from(-1),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'gross_salary': -1 must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A monetary input to a calculator was negative.
    #[error("Invalid input '{field}': {value} must not be negative")]
    InvalidInput {
        /// The name of the rejected input.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// The number of salary payments per year was zero.
    #[error("Invalid payment count {count}: at least one payment per year is required")]
    InvalidPaymentCount {
        /// The rejected payment count.
        count: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket schedule was malformed.
    #[error("Invalid bracket schedule '{name}': {message}")]
    InvalidSchedule {
        /// The name of the schedule.
        name: String,
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// Region code was not found in the configuration.
    #[error("Region not found: {code}")]
    RegionNotFound {
        /// The region code that was not found.
        code: String,
    },

    /// Municipality code was not found in the configuration.
    #[error("Municipality not found: {code}")]
    MunicipalityNotFound {
        /// The municipality code that was not found.
        code: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Rejects negative monetary inputs with [`EngineError::InvalidInput`].
pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
