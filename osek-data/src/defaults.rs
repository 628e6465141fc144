//! Built-in configuration for the supported tax years.
//!
//! The tables are embedded as the same CSV the loader accepts from disk, so
//! the built-ins exercise the exact load-and-validate path external files
//! take.

use osek_core::TaxYearConfig;

use crate::loader::{ConfigLoader, ConfigLoaderError};

/// 2025 bracket schedules. The National-Insurance brackets are annualized
/// from the published monthly thresholds (7,522 and 50,695 shekels), with
/// the self-employed NI and health rates combined per bracket.
const BRACKETS_2025: &str = "\
tax_year,schedule,min_income,max_income,rate
2025,tax,0,84120,0.10
2025,tax,84120,120720,0.14
2025,tax,120720,193800,0.20
2025,tax,193800,269280,0.31
2025,tax,269280,560280,0.35
2025,tax,560280,,0.47
2025,ni,0,90264,0.0427
2025,ni,90264,,0.1216
";

/// 2025 scalar constants: contribution limits, credit points, the 3% surtax
/// above 721,560, and the NI accrual ceiling (12 × 50,695).
const PARAMS_2025: &str = "\
tax_year,pension_rate,pension_cap,study_rate,study_cap,credit_points,credit_point_value,surtax_threshold,surtax_rate,ni_income_floor,ni_income_ceiling
2025,0.165,34848,0.045,20520,2.25,2800,721560,0.03,,608340
";

/// The 2025 configuration for an Israeli self-employed profile.
pub fn israel_2025() -> Result<TaxYearConfig, ConfigLoaderError> {
    let brackets = ConfigLoader::parse_brackets(BRACKETS_2025.as_bytes())?;
    let params = ConfigLoader::parse_params(PARAMS_2025.as_bytes())?;
    ConfigLoader::build(2025, &brackets, &params)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn israel_2025_parses_and_validates() {
        let config = israel_2025().expect("built-in tables must load");

        assert_eq!(config.tax_year, 2025);
        assert_eq!(config.income_tax.brackets().len(), 6);
        assert_eq!(config.national_insurance.brackets().len(), 2);
    }

    #[test]
    fn israel_2025_reproduces_published_boundaries() {
        let config = israel_2025().unwrap();

        // Cumulative liability at the published bracket edges.
        assert_eq!(config.income_tax.tax_at(dec!(84120)), dec!(8412.0000));
        assert_eq!(config.income_tax.tax_at(dec!(120720)), dec!(13536.0000));
        assert_eq!(config.income_tax.tax_at(dec!(193800)), dec!(28152.0000));
    }

    #[test]
    fn israel_2025_top_marginal_rate_reaches_fifty_percent() {
        let config = israel_2025().unwrap();
        let surtax = config.surtax.as_ref().expect("surtax configured");

        let top_rate = config.income_tax.marginal_rate_at(dec!(1000000)) + surtax.rate;

        assert_eq!(top_rate, dec!(0.50));
    }
}
