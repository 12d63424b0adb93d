//! In-memory configuration shared by unit tests.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{BracketSchedule, TaxBracket};

use super::types::{
    CreditTier, ExemptionBand, ExemptionConfig, IncomeTaxConfig, MunicipalityConfig,
    RegionConfig, SocialSecurityConfig, TaxConfig, TaxCreditConfig, TaxYearMetadata,
};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn bracket(up_to: Option<&str>, rate: &str) -> TaxBracket {
    TaxBracket {
        up_to: up_to.map(dec),
        rate: dec(rate),
    }
}

pub(crate) fn social_security() -> SocialSecurityConfig {
    SocialSecurityConfig {
        legal_ref: "L. 335/1995".to_string(),
        pension_fund_rate: dec("0.0919"),
        wage_guarantee_rate: dec("0.003"),
        residual_fund_rate: dec("0.00267"),
    }
}

pub(crate) fn income_tax() -> IncomeTaxConfig {
    IncomeTaxConfig {
        legal_ref: "TUIR art. 11".to_string(),
        no_tax_area: dec("8145"),
        schedule: BracketSchedule::new(
            "irpef",
            vec![
                bracket(Some("28000"), "0.23"),
                bracket(Some("50000"), "0.35"),
                bracket(None, "0.43"),
            ],
        )
        .unwrap(),
    }
}

pub(crate) fn emilia_romagna() -> RegionConfig {
    RegionConfig {
        name: "Emilia-Romagna".to_string(),
        legal_ref: "D.Lgs. 446/1997, art. 50".to_string(),
        schedule: BracketSchedule::new(
            "emilia_romagna",
            vec![
                bracket(Some("15000"), "0.0133"),
                bracket(Some("28000"), "0.0193"),
                bracket(Some("50000"), "0.0203"),
                bracket(None, "0.0227"),
            ],
        )
        .unwrap(),
    }
}

pub(crate) fn bologna() -> MunicipalityConfig {
    MunicipalityConfig {
        name: "Bologna".to_string(),
        legal_ref: "D.Lgs. 360/1998, art. 1".to_string(),
        rate: dec("0.008"),
    }
}

pub(crate) fn tax_credit() -> TaxCreditConfig {
    TaxCreditConfig {
        legal_ref: "TUIR art. 13".to_string(),
        tiers: vec![
            CreditTier {
                up_to: dec("15000"),
                base: dec("1955"),
                variable: Decimal::ZERO,
            },
            CreditTier {
                up_to: dec("28000"),
                base: dec("1910"),
                variable: dec("1190"),
            },
            CreditTier {
                up_to: dec("50000"),
                base: Decimal::ZERO,
                variable: dec("1910"),
            },
        ],
    }
}

pub(crate) fn exemption() -> ExemptionConfig {
    ExemptionConfig {
        legal_ref: "L. 197/2022, art. 1, c. 281".to_string(),
        gross_salary_ceiling: dec("35000"),
        bands: vec![
            ExemptionBand {
                monthly_up_to: dec("1923"),
                rate: dec("0.07"),
            },
            ExemptionBand {
                monthly_up_to: dec("2692"),
                rate: dec("0.06"),
            },
        ],
    }
}

pub(crate) fn test_config() -> TaxConfig {
    let metadata = TaxYearMetadata {
        year: 2024,
        name: "IRPEF 2024".to_string(),
        source_url: "https://example.com".to_string(),
    };

    let mut regions = HashMap::new();
    regions.insert("emilia_romagna".to_string(), emilia_romagna());

    let mut municipalities = HashMap::new();
    municipalities.insert("bologna".to_string(), bologna());

    TaxConfig::new(
        metadata,
        social_security(),
        income_tax(),
        tax_credit(),
        exemption(),
        regions,
        municipalities,
    )
}
