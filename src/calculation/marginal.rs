//! Marginal bracket accumulation.
//!
//! This module provides the single routine that applies a [`BracketSchedule`]
//! to an income: every bracket taxes only the slice of income that falls inside
//! it, and the slice taxes are summed.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::BracketSchedule;

/// The part of an income taxed inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    /// Lower bound of the bracket (exclusive).
    pub lower: Decimal,
    /// Upper bound of the bracket (inclusive), `None` for the top bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Portion of the income inside the bracket.
    pub taxed_amount: Decimal,
    /// Tax on that portion.
    pub tax: Decimal,
}

/// The result of applying a marginal schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginalTaxResult {
    /// Total tax over all slices.
    pub tax: Decimal,
    /// The slices that received a non-empty portion of the income.
    pub slices: Vec<BracketSlice>,
}

/// Applies a marginal schedule to a non-negative income.
///
/// Boundary values belong to the lower bracket, so an income of exactly
/// `up_to` is taxed entirely at the rates up to and including that bracket.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::apply_marginal_schedule;
/// use salary_engine::models::{BracketSchedule, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = BracketSchedule::new(
///     "example",
///     vec![
///         TaxBracket { up_to: Some(Decimal::from(10_000)), rate: Decimal::ZERO },
///         TaxBracket { up_to: None, rate: Decimal::from_str("0.2").unwrap() },
///     ],
/// )
/// .unwrap();
///
/// let result = apply_marginal_schedule(Decimal::from(15_000), &schedule);
/// assert_eq!(result.tax, Decimal::from(1_000));
/// assert_eq!(result.slices.len(), 1);
/// ```
pub fn apply_marginal_schedule(income: Decimal, schedule: &BracketSchedule) -> MarginalTaxResult {
    let mut tax = Decimal::ZERO;
    let mut slices = Vec::new();
    let mut lower = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if income <= lower {
            break;
        }

        let slice_top = match bracket.up_to {
            Some(upper) if upper < income => upper,
            _ => income,
        };
        let taxed_amount = slice_top - lower;
        let slice_tax = taxed_amount * bracket.rate;

        tax += slice_tax;
        if !slice_tax.is_zero() {
            slices.push(BracketSlice {
                lower,
                upper: bracket.up_to,
                rate: bracket.rate,
                taxed_amount,
                tax: slice_tax,
            });
        }

        match bracket.up_to {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    MarginalTaxResult { tax, slices }
}

/// Describes the slices as `amount x rate` terms for audit reasoning.
pub(crate) fn describe_slices(slices: &[BracketSlice]) -> String {
    if slices.is_empty() {
        return "0".to_string();
    }
    slices
        .iter()
        .map(|slice| {
            format!(
                "{} x {}",
                slice.taxed_amount.normalize(),
                slice.rate.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join(" + ")
}
