//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax year
//! configurations from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::BracketSchedule;

use super::types::{
    IncomeTaxConfig, MunicipalitiesFile, MunicipalityConfig, RegionConfig, RegionsFile,
    TaxConfig, TaxYearFile, TaxYearMetadata,
};

/// Loads and provides access to tax configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query regions and municipalities.
///
/// # Directory Structure
///
/// ```text
/// config/it2024/
/// ├── tax_year.yaml        # INPS rates, IRPEF brackets, credits, exemption
/// ├── regions.yaml         # Regional surtax schedules
/// └── municipalities.yaml  # Municipal surtax rates
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/it2024").unwrap();
/// let region = loader.get_region("emilia_romagna").unwrap();
/// println!("Region: {}", region.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - Any schedule, credit tier list or exemption band list is malformed (`InvalidSchedule`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/it2024")?;
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax_year = Self::load_yaml::<TaxYearFile>(&path.join("tax_year.yaml"))?;
        let regions_file = Self::load_yaml::<RegionsFile>(&path.join("regions.yaml"))?;
        let municipalities_file =
            Self::load_yaml::<MunicipalitiesFile>(&path.join("municipalities.yaml"))?;

        let config = Self::build(tax_year, regions_file, municipalities_file)?;
        debug!(
            tax_year = config.tax_year().year,
            regions = config.regions().len(),
            municipalities = config.municipalities().len(),
            "Loaded tax configuration"
        );

        Ok(Self { config })
    }

    /// Parses the three configuration documents from strings.
    ///
    /// Useful when the configuration is embedded rather than read from disk.
    pub fn from_yaml_str(
        tax_year: &str,
        regions: &str,
        municipalities: &str,
    ) -> EngineResult<Self> {
        let tax_year = Self::parse_yaml::<TaxYearFile>("tax_year.yaml", tax_year)?;
        let regions_file = Self::parse_yaml::<RegionsFile>("regions.yaml", regions)?;
        let municipalities_file =
            Self::parse_yaml::<MunicipalitiesFile>("municipalities.yaml", municipalities)?;

        let config = Self::build(tax_year, regions_file, municipalities_file)?;
        Ok(Self { config })
    }

    /// Validates the raw documents and assembles the [`TaxConfig`].
    fn build(
        tax_year: TaxYearFile,
        regions_file: RegionsFile,
        municipalities_file: MunicipalitiesFile,
    ) -> EngineResult<TaxConfig> {
        let income_tax = IncomeTaxConfig {
            legal_ref: tax_year.income_tax.legal_ref,
            no_tax_area: tax_year.income_tax.no_tax_area,
            schedule: BracketSchedule::new("irpef", tax_year.income_tax.brackets)?,
        };
        income_tax.validate()?;

        tax_year.tax_credit.validate()?;
        tax_year.exemption.validate()?;

        let mut regions = HashMap::with_capacity(regions_file.regions.len());
        for (code, section) in regions_file.regions {
            let schedule = BracketSchedule::new(code.clone(), section.brackets)?;
            regions.insert(
                code,
                RegionConfig {
                    name: section.name,
                    legal_ref: section.legal_ref,
                    schedule,
                },
            );
        }

        Ok(TaxConfig::new(
            tax_year.tax_year,
            tax_year.social_security,
            income_tax,
            tax_year.tax_credit,
            tax_year.exemption,
            regions,
            municipalities_file.municipalities,
        ))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the tax year metadata.
    pub fn tax_year(&self) -> &TaxYearMetadata {
        self.config.tax_year()
    }

    /// Gets a region by its code.
    ///
    /// Returns the region if found, or `RegionNotFound` error.
    pub fn get_region(&self, code: &str) -> EngineResult<&RegionConfig> {
        self.config.region(code)
    }

    /// Gets a municipality by its code.
    ///
    /// Returns the municipality if found, or `MunicipalityNotFound` error.
    pub fn get_municipality(&self, code: &str) -> EngineResult<&MunicipalityConfig> {
        self.config.municipality(code)
    }
}
