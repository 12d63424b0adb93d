//! Progressive bracket schedule models.
//!
//! This module contains the [`TaxBracket`] and [`BracketSchedule`] types shared by
//! every progressive levy in the engine (national income tax, regional surtax).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single bracket of a progressive schedule.
///
/// The bracket covers income from the previous bracket's upper bound (exclusive)
/// up to `up_to` (inclusive). The last bracket of a schedule has no upper bound.
///
/// # Example
///
/// ```
/// use salary_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     up_to: Some(Decimal::from(28_000)),
///     rate: Decimal::from_str("0.23").unwrap(),
/// };
/// assert!(bracket.contains(Decimal::from(28_000)));
/// assert!(!bracket.contains(Decimal::from(28_001)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, `None` for the top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate applied to the slice of income inside this bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` does not exceed this bracket's upper bound.
    pub fn contains(&self, income: Decimal) -> bool {
        self.up_to.is_none_or(|upper| income <= upper)
    }
}

/// An ordered, validated sequence of marginal brackets.
///
/// Invariants enforced by [`BracketSchedule::new`]:
/// - at least one bracket
/// - upper bounds are positive and strictly increasing
/// - only the final bracket is unbounded, and it must be
/// - rates are not negative
///
/// # Example
///
/// ```
/// use salary_engine::models::{BracketSchedule, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = BracketSchedule::new(
///     "municipal",
///     vec![
///         TaxBracket { up_to: Some(Decimal::from(15_000)), rate: Decimal::from_str("0.01").unwrap() },
///         TaxBracket { up_to: None, rate: Decimal::from_str("0.02").unwrap() },
///     ],
/// )
/// .unwrap();
/// assert_eq!(schedule.brackets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Creates a schedule after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if the brackets are empty, out of
    /// order, carry a negative rate, or the unbounded bracket is not last.
    pub fn new(name: impl Into<String>, brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let name = name.into();
        let invalid = |message: String| EngineError::InvalidSchedule {
            name: name.clone(),
            message,
        };

        if brackets.is_empty() {
            return Err(invalid("schedule is empty".to_string()));
        }

        let last_index = brackets.len() - 1;
        let mut previous_bound = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate.is_sign_negative() && !bracket.rate.is_zero() {
                return Err(invalid(format!(
                    "bracket {} has negative rate {}",
                    index + 1,
                    bracket.rate
                )));
            }

            match (bracket.up_to, index == last_index) {
                (Some(_), true) => {
                    return Err(invalid("final bracket must be unbounded".to_string()));
                }
                (None, false) => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the final bracket",
                        index + 1
                    )));
                }
                (Some(upper), false) => {
                    if upper <= previous_bound {
                        return Err(invalid(format!(
                            "bracket {} upper bound {} does not exceed {}",
                            index + 1,
                            upper,
                            previous_bound
                        )));
                    }
                    previous_bound = upper;
                }
                (None, true) => {}
            }
        }

        Ok(Self { name, brackets })
    }

    /// Returns the schedule's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the bracket that `income` falls into (boundaries belong to the lower bracket).
    pub fn bracket_for(&self, income: Decimal) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|bracket| bracket.contains(income))
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }
}
