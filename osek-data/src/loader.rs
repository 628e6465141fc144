//! CSV loading for year configuration.
//!
//! Two files describe a tax year: a bracket-schedules CSV holding both the
//! income-tax and National-Insurance schedules, and a one-row-per-year
//! parameters CSV with the scalar constants (contribution limits, credit
//! points, surtax, NI floor and ceiling). The loader parses both and
//! assembles a validated [`TaxYearConfig`], so malformed tables surface a
//! [`ConfigurationError`] at load time rather than a wrong liability later.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use osek_core::{
    BracketSchedule, ConfigurationError, ContributionLimits, Surtax, TaxBracket, TaxYearConfig,
};

/// Errors that can occur when loading year configuration data.
#[derive(Debug, Error)]
pub enum ConfigLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown schedule kind '{0}' (expected 'tax' or 'ni')")]
    UnknownSchedule(String),

    #[error("No {kind} schedule found for tax year {tax_year}")]
    MissingSchedule { kind: &'static str, tax_year: i32 },

    #[error("No parameter row found for tax year {0}")]
    MissingParams(i32),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}

impl From<csv::Error> for ConfigLoaderError {
    fn from(err: csv::Error) -> Self {
        ConfigLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket schedules CSV.
///
/// - `tax_year`: the tax year (e.g., 2025)
/// - `schedule`: `tax` for income tax, `ni` for National Insurance
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound (empty for the unbounded top bracket)
/// - `rate`: marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from the year parameters CSV; one row per tax year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct YearParamsRecord {
    pub tax_year: i32,
    pub pension_rate: Decimal,
    pub pension_cap: Decimal,
    pub study_rate: Decimal,
    pub study_cap: Decimal,
    pub credit_points: Decimal,
    pub credit_point_value: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub surtax_threshold: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub surtax_rate: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub ni_income_floor: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub ni_income_ceiling: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader assembling a validated [`TaxYearConfig`] from CSV inputs.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses bracket records from a CSV reader.
    ///
    /// The reader can be any `Read`, such as a file or a string slice.
    /// Rejects records whose schedule kind is neither `tax` nor `ni`.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ConfigLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            if record.schedule != "tax" && record.schedule != "ni" {
                return Err(ConfigLoaderError::UnknownSchedule(record.schedule));
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Parses year parameter records from a CSV reader.
    pub fn parse_params<R: Read>(reader: R) -> Result<Vec<YearParamsRecord>, ConfigLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: YearParamsRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assembles the configuration for `tax_year` from parsed rows.
    ///
    /// Both schedules and every scalar constant are validated before the
    /// configuration is returned, keeping load time the single place where
    /// malformed data can fail.
    pub fn build(
        tax_year: i32,
        brackets: &[BracketRecord],
        params: &[YearParamsRecord],
    ) -> Result<TaxYearConfig, ConfigLoaderError> {
        let income_tax = Self::schedule_for(tax_year, brackets, "tax")?;
        let national_insurance = Self::schedule_for(tax_year, brackets, "ni")?;

        let row = params
            .iter()
            .find(|p| p.tax_year == tax_year)
            .ok_or(ConfigLoaderError::MissingParams(tax_year))?;

        let surtax = match (row.surtax_threshold, row.surtax_rate) {
            (Some(threshold), Some(rate)) => Some(Surtax { threshold, rate }),
            _ => None,
        };

        let config = TaxYearConfig {
            tax_year,
            income_tax,
            national_insurance,
            ni_income_floor: row.ni_income_floor,
            ni_income_ceiling: row.ni_income_ceiling,
            surtax,
            credit_points: row.credit_points,
            credit_point_value: row.credit_point_value,
            limits: ContributionLimits {
                pension_rate: row.pension_rate,
                pension_cap: row.pension_cap,
                study_rate: row.study_rate,
                study_cap: row.study_cap,
            },
        };
        config.validate()?;

        Ok(config)
    }

    fn schedule_for(
        tax_year: i32,
        records: &[BracketRecord],
        kind: &'static str,
    ) -> Result<BracketSchedule, ConfigLoaderError> {
        let mut brackets: Vec<TaxBracket> = records
            .iter()
            .filter(|r| r.tax_year == tax_year && r.schedule == kind)
            .map(|r| TaxBracket {
                min_income: r.min_income,
                max_income: r.max_income,
                rate: r.rate,
            })
            .collect();

        if brackets.is_empty() {
            return Err(ConfigLoaderError::MissingSchedule { kind, tax_year });
        }

        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        Ok(BracketSchedule::new(brackets)?)
    }
}
