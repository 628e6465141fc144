use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use osek_core::TaxCalculator;
use osek_data::{ConfigLoader, defaults};
use rust_decimal::Decimal;
use tracing::info;

/// Validate year-configuration CSV files and price an income under them.
///
/// With no files given, the built-in tables are checked. Expected formats:
/// - brackets: tax_year,schedule,min_income,max_income,rate
///   (schedule is 'tax' or 'ni'; empty max_income means unbounded)
/// - params: one row per tax year with the scalar constants
#[derive(Parser, Debug)]
#[command(name = "osek-config-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the bracket schedules CSV
    #[arg(short, long, requires = "params")]
    brackets: Option<PathBuf>,

    /// Path to the year parameters CSV
    #[arg(short, long, requires = "brackets")]
    params: Option<PathBuf>,

    /// Tax year to assemble
    #[arg(short, long, default_value_t = 2025)]
    year: i32,

    /// Annual income to price under the loaded configuration
    #[arg(short, long)]
    income: Option<Decimal>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match (&args.brackets, &args.params) {
        (Some(brackets_path), Some(params_path)) => {
            let brackets_file = File::open(brackets_path)
                .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;
            let brackets = ConfigLoader::parse_brackets(brackets_file)
                .with_context(|| format!("Failed to parse CSV: {}", brackets_path.display()))?;

            let params_file = File::open(params_path)
                .with_context(|| format!("Failed to open: {}", params_path.display()))?;
            let params = ConfigLoader::parse_params(params_file)
                .with_context(|| format!("Failed to parse CSV: {}", params_path.display()))?;

            info!(brackets = brackets.len(), params = params.len(), "parsed records");

            ConfigLoader::build(args.year, &brackets, &params)
                .with_context(|| format!("Invalid configuration for tax year {}", args.year))?
        }
        _ => defaults::israel_2025().context("Built-in configuration failed validation")?,
    };

    println!("Configuration for tax year {} is valid.", config.tax_year);
    println!(
        "  income-tax brackets: {}",
        config.income_tax.brackets().len()
    );
    println!(
        "  national-insurance brackets: {}",
        config.national_insurance.brackets().len()
    );

    if let Some(income) = args.income {
        let liability = TaxCalculator::new(&config).liability(income);
        println!("Liability for annual income {income}:");
        println!("  income tax:         {}", liability.income_tax);
        println!("  national insurance: {}", liability.national_insurance);
        println!("  net:                {}", liability.net);
        println!("  marginal rate:      {}", liability.marginal_rate);
        println!("  effective rate:     {}", liability.effective_rate());
    }

    Ok(())
}
