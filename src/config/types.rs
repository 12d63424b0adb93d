//! Configuration types for salary breakdowns.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketSchedule, TaxBracket};

/// Metadata about the tax year.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearMetadata {
    /// The fiscal year the parameters apply to (e.g., 2024).
    pub year: i32,
    /// The human-readable name of the parameter set.
    pub name: String,
    /// URL to the official documentation of the parameters.
    pub source_url: String,
}

/// Social-security contribution rates charged to the employee.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecurityConfig {
    /// Reference to the statute defining the contribution.
    pub legal_ref: String,
    /// Pension fund (FPLD IVS) rate.
    pub pension_fund_rate: Decimal,
    /// Wage guarantee fund (CIG) rate.
    pub wage_guarantee_rate: Decimal,
    /// Residual integration fund rate.
    pub residual_fund_rate: Decimal,
}

impl SocialSecurityConfig {
    /// Returns the sum of the three contribution rates.
    pub fn total_rate(&self) -> Decimal {
        self.pension_fund_rate + self.wage_guarantee_rate + self.residual_fund_rate
    }
}

/// The income tax section of `tax_year.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxSection {
    /// Reference to the statute defining the schedule.
    pub legal_ref: String,
    /// Income at or below this amount owes no income tax.
    pub no_tax_area: Decimal,
    /// The taxed brackets in ascending order, starting from zero.
    pub brackets: Vec<TaxBracket>,
}

/// National income tax (IRPEF) configuration.
///
/// Income at or below `no_tax_area` owes nothing. Income inside the first
/// bracket is taxed in full at that bracket's rate. Above the first bracket the
/// schedule applies marginally, with the no-tax area carved out of the first
/// bracket's slice.
#[derive(Debug, Clone)]
pub struct IncomeTaxConfig {
    /// Reference to the statute defining the schedule.
    pub legal_ref: String,
    /// Income at or below this amount owes no income tax.
    pub no_tax_area: Decimal,
    /// The validated schedule of taxed brackets.
    pub schedule: BracketSchedule,
}

impl IncomeTaxConfig {
    /// Checks that the no-tax area is non-negative and lies inside the first bracket.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidSchedule {
            name: self.schedule.name().to_string(),
            message,
        };

        if self.no_tax_area.is_sign_negative() && !self.no_tax_area.is_zero() {
            return Err(invalid(format!(
                "no-tax area {} must not be negative",
                self.no_tax_area
            )));
        }

        let first_bound = self
            .schedule
            .brackets()
            .first()
            .and_then(|bracket| bracket.up_to);
        if let Some(bound) = first_bound {
            if self.no_tax_area >= bound {
                return Err(invalid(format!(
                    "no-tax area {} must be below the first bracket bound {}",
                    self.no_tax_area, bound
                )));
            }
        }
        Ok(())
    }
}

/// A tier of the employment tax credit.
///
/// Within the tier the credit is `base + variable * (up_to - income) / span`,
/// where `span` is the width of the tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreditTier {
    /// Inclusive upper bound of the tier.
    pub up_to: Decimal,
    /// Fixed part of the credit.
    pub base: Decimal,
    /// Part of the credit that decays linearly across the tier.
    #[serde(default)]
    pub variable: Decimal,
}

/// Employment tax credit (detrazioni) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxCreditConfig {
    /// Reference to the statute defining the credit.
    pub legal_ref: String,
    /// Tiers in ascending order; incomes above the last tier get no credit.
    pub tiers: Vec<CreditTier>,
}

impl TaxCreditConfig {
    /// Checks that tiers exist and their upper bounds are strictly increasing.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tiers.is_empty() {
            return Err(EngineError::InvalidSchedule {
                name: "tax_credit".to_string(),
                message: "no credit tiers defined".to_string(),
            });
        }

        let mut previous = Decimal::ZERO;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.up_to <= previous {
                return Err(EngineError::InvalidSchedule {
                    name: "tax_credit".to_string(),
                    message: format!(
                        "tier {} upper bound {} does not exceed {}",
                        index + 1,
                        tier.up_to,
                        previous
                    ),
                });
            }
            previous = tier.up_to;
        }
        Ok(())
    }
}

/// An exemption band keyed by rounded monthly gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExemptionBand {
    /// Inclusive upper bound on the rounded monthly gross salary.
    pub monthly_up_to: Decimal,
    /// The exemption percentage as a fraction.
    pub rate: Decimal,
}

/// Temporary exemption (esonero) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExemptionConfig {
    /// Reference to the statute defining the exemption.
    pub legal_ref: String,
    /// Gross annual salaries above this ceiling get no exemption.
    pub gross_salary_ceiling: Decimal,
    /// Bands in ascending order; salaries above the last band get 0%.
    pub bands: Vec<ExemptionBand>,
}

impl ExemptionConfig {
    /// Checks that band bounds are strictly increasing.
    pub fn validate(&self) -> EngineResult<()> {
        let ordered = self
            .bands
            .windows(2)
            .all(|pair| pair[0].monthly_up_to < pair[1].monthly_up_to);
        if !ordered {
            return Err(EngineError::InvalidSchedule {
                name: "exemption".to_string(),
                message: "band bounds must be strictly increasing".to_string(),
            });
        }
        Ok(())
    }
}

/// Tax year configuration file structure (`tax_year.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearFile {
    /// Tax year metadata.
    pub tax_year: TaxYearMetadata,
    /// Social-security rates.
    pub social_security: SocialSecurityConfig,
    /// Income tax schedule.
    pub income_tax: IncomeTaxSection,
    /// Employment tax credit tiers.
    pub tax_credit: TaxCreditConfig,
    /// Exemption bands.
    pub exemption: ExemptionConfig,
}

/// A region entry as written in `regions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionSection {
    /// The human-readable region name.
    pub name: String,
    /// Reference to the regional law defining the surtax.
    pub legal_ref: String,
    /// The surtax brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// Regions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsFile {
    /// Map of region code to region details.
    pub regions: HashMap<String, RegionSection>,
}

/// A region's surtax configuration.
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// The human-readable region name.
    pub name: String,
    /// Reference to the regional law defining the surtax.
    pub legal_ref: String,
    /// The validated surtax schedule.
    pub schedule: BracketSchedule,
}

/// A municipality's surtax configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MunicipalityConfig {
    /// The human-readable municipality name.
    pub name: String,
    /// Reference to the municipal resolution defining the surtax.
    pub legal_ref: String,
    /// The flat surtax rate.
    pub rate: Decimal,
}

/// Municipalities configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MunicipalitiesFile {
    /// Map of municipality code to municipality details.
    pub municipalities: HashMap<String, MunicipalityConfig>,
}

/// The complete tax configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a tax year configuration directory.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    metadata: TaxYearMetadata,
    social_security: SocialSecurityConfig,
    income_tax: IncomeTaxConfig,
    tax_credit: TaxCreditConfig,
    exemption: ExemptionConfig,
    regions: HashMap<String, RegionConfig>,
    municipalities: HashMap<String, MunicipalityConfig>,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts.
    pub fn new(
        metadata: TaxYearMetadata,
        social_security: SocialSecurityConfig,
        income_tax: IncomeTaxConfig,
        tax_credit: TaxCreditConfig,
        exemption: ExemptionConfig,
        regions: HashMap<String, RegionConfig>,
        municipalities: HashMap<String, MunicipalityConfig>,
    ) -> Self {
        Self {
            metadata,
            social_security,
            income_tax,
            tax_credit,
            exemption,
            regions,
            municipalities,
        }
    }

    /// Returns the tax year metadata.
    pub fn tax_year(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the social-security rates.
    pub fn social_security(&self) -> &SocialSecurityConfig {
        &self.social_security
    }

    /// Returns the income tax configuration.
    pub fn income_tax(&self) -> &IncomeTaxConfig {
        &self.income_tax
    }

    /// Returns the employment tax credit configuration.
    pub fn tax_credit(&self) -> &TaxCreditConfig {
        &self.tax_credit
    }

    /// Returns the exemption configuration.
    pub fn exemption(&self) -> &ExemptionConfig {
        &self.exemption
    }

    /// Returns all configured regions.
    pub fn regions(&self) -> &HashMap<String, RegionConfig> {
        &self.regions
    }

    /// Returns all configured municipalities.
    pub fn municipalities(&self) -> &HashMap<String, MunicipalityConfig> {
        &self.municipalities
    }

    /// Gets a region by its code, or `RegionNotFound`.
    pub fn region(&self, code: &str) -> EngineResult<&RegionConfig> {
        self.regions
            .get(code)
            .ok_or_else(|| EngineError::RegionNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a municipality by its code, or `MunicipalityNotFound`.
    pub fn municipality(&self, code: &str) -> EngineResult<&MunicipalityConfig> {
        self.municipalities
            .get(code)
            .ok_or_else(|| EngineError::MunicipalityNotFound {
                code: code.to_string(),
            })
    }
}
