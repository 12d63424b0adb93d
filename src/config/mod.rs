//! Configuration loading and management for the Net Salary Engine.
//!
//! This module provides functionality to load tax year configurations from YAML
//! files, including social-security rates, the income tax schedule, tax credit
//! tiers, exemption bands and the region / municipality surtax registry.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/it2024").unwrap();
//! println!("Loaded tax year: {}", config.tax_year().name);
//! ```

#[cfg(test)]
pub(crate) mod fixtures;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CreditTier, ExemptionBand, ExemptionConfig, IncomeTaxConfig, IncomeTaxSection,
    MunicipalitiesFile, MunicipalityConfig, RegionConfig, RegionSection, RegionsFile,
    SocialSecurityConfig, TaxConfig, TaxCreditConfig, TaxYearFile, TaxYearMetadata,
};
