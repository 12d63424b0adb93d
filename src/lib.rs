//! Net Salary Engine for Italian dependent employees
//!
//! This crate computes the breakdown from gross annual salary (RAL) to net pay,
//! applying INPS contributions, IRPEF, regional and municipal surtaxes, employment
//! tax credits and the temporary exemption scheme.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
