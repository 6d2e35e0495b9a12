//! On-disk inputs: scenario files and income CSVs.
//!
//! ## Scenario files
//!
//! A serialized `ScenarioInputs`, as JSON (`.json`) or TOML (`.toml`).
//! Only `origin_currency`, `destination` and `destination_currency` are
//! required; every other section defaults to empty.
//!
//! ## Income CSV
//!
//! | Column                | Required | Notes                                        |
//! |-----------------------|----------|----------------------------------------------|
//! | `id`                  | yes      | unique per file                              |
//! | `kind`                | yes      | `salary`, `passive`, `one_off`               |
//! | `source_jurisdiction` | yes      | e.g. `PT`                                    |
//! | `sub_type`            | no       | `rental`, `dividend`, `interest`, `pension`, `other` |
//! | `amount`              | yes      | decimal, no thousands separator              |
//! | `currency`            | yes      | e.g. `EUR`                                   |
//! | `frequency`           | no       | `weekly`, `biweekly`, `monthly` (default), `quarterly`, `annually` |
//!
//! ```csv
//! id,kind,source_jurisdiction,sub_type,amount,currency,frequency
//! job,salary,PT,,5000,EUR,monthly
//! pension,passive,US,pension,1000,USD,monthly
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use relocation_core::calculations::rate::{RateInputError, SimulationPercent};
use relocation_core::{
    CurrencyCode, Frequency, IncomeDeclaration, IncomeKind, Jurisdiction, MAX_HOUSEHOLD_MEMBERS,
    PassiveSubType, ScenarioInputs,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Scenario files
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported scenario file '{0}'; expected .json or .toml")]
    UnsupportedFormat(PathBuf),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Rate(#[from] RateInputError),

    #[error("household of {members} members exceeds the supported maximum of {max}")]
    HouseholdTooLarge { members: u64, max: u32 },
}

/// Supported scenario encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parses scenario inputs and checks the simulation shift and household size.
pub fn parse_scenario(
    input: &str,
    format: ScenarioFormat,
) -> Result<ScenarioInputs, ScenarioLoadError> {
    let inputs: ScenarioInputs = match format {
        ScenarioFormat::Json => serde_json::from_str(input)?,
        ScenarioFormat::Toml => toml::from_str(input)?,
    };
    SimulationPercent::new(inputs.rate.simulation_percent)?;
    if let Some(household) = inputs.household.filter(|h| h.is_oversized()) {
        return Err(ScenarioLoadError::HouseholdTooLarge {
            members: household.member_count(),
            max: MAX_HOUSEHOLD_MEMBERS,
        });
    }
    Ok(inputs)
}

/// Reads a scenario file, picking the format from its extension.
pub fn load_scenario(path: &Path) -> Result<ScenarioInputs, ScenarioLoadError> {
    let format = ScenarioFormat::from_path(path)
        .ok_or_else(|| ScenarioLoadError::UnsupportedFormat(path.to_path_buf()))?;
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let inputs = parse_scenario(&contents, format)?;
    debug!(path = %path.display(), incomes = inputs.incomes.len(), "loaded scenario");
    Ok(inputs)
}

// ---------------------------------------------------------------------------
// Income CSV
// ---------------------------------------------------------------------------

/// Mirrors the CSV layout; cells are validated in [`convert_row`].
#[derive(Debug, Deserialize)]
struct IncomeRow {
    id: String,
    kind: String,
    source_jurisdiction: String,
    #[serde(default)]
    sub_type: Option<String>,
    amount: String,
    currency: String,
    #[serde(default)]
    frequency: Option<String>,
}

/// Errors raised while reading income declarations. Row numbers are
/// 1-based and exclude the header.
#[derive(Debug, Error)]
pub enum IncomeCsvError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised income kind '{value}' on row {row}")]
    InvalidKind { value: String, row: usize },

    #[error("unrecognised passive sub-type '{value}' on row {row}")]
    InvalidSubType { value: String, row: usize },

    #[error("invalid amount '{value}' on row {row}")]
    InvalidAmount { value: String, row: usize },

    #[error("unrecognised frequency '{value}' on row {row}")]
    InvalidFrequency { value: String, row: usize },

    #[error("missing {column} on row {row}")]
    MissingValue { column: &'static str, row: usize },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: String,
    column: &'static str,
    row: usize,
) -> Result<String, IncomeCsvError> {
    if value.trim().is_empty() {
        return Err(IncomeCsvError::MissingValue { column, row });
    }
    Ok(value)
}

fn convert_row(
    row: IncomeRow,
    row_number: usize,
) -> Result<IncomeDeclaration, IncomeCsvError> {
    let kind = IncomeKind::parse(&row.kind).ok_or_else(|| IncomeCsvError::InvalidKind {
        value: row.kind.clone(),
        row: row_number,
    })?;

    let sub_type = non_empty(row.sub_type)
        .map(|value| {
            PassiveSubType::parse(&value).ok_or(IncomeCsvError::InvalidSubType {
                value,
                row: row_number,
            })
        })
        .transpose()?;

    let amount = row
        .amount
        .parse::<Decimal>()
        .map_err(|_| IncomeCsvError::InvalidAmount {
            value: row.amount.clone(),
            row: row_number,
        })?;

    let frequency = non_empty(row.frequency)
        .map(|value| {
            Frequency::parse(&value).ok_or(IncomeCsvError::InvalidFrequency {
                value,
                row: row_number,
            })
        })
        .transpose()?
        .unwrap_or_default();

    Ok(IncomeDeclaration {
        id: required(row.id, "id", row_number)?,
        kind,
        source_jurisdiction: Jurisdiction::new(required(
            row.source_jurisdiction,
            "source_jurisdiction",
            row_number,
        )?),
        sub_type,
        amount,
        currency: CurrencyCode::new(required(row.currency, "currency", row_number)?),
        frequency,
    })
}

/// Reads income declarations in file order.
pub fn parse_income_csv<R: Read>(reader: R) -> Result<Vec<IncomeDeclaration>, IncomeCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    csv_reader
        .deserialize::<IncomeRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_income_csv(path: &Path) -> Result<Vec<IncomeDeclaration>, IncomeCsvError> {
    let file = std::fs::File::open(path).map_err(|source| IncomeCsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let declarations = parse_income_csv(file)?;
    debug!(path = %path.display(), rows = declarations.len(), "loaded income declarations");
    Ok(declarations)
}
