//! Regime table configuration.
//!
//! Regimes are read from a TOML file with one `[[regimes]]` table per
//! destination:
//!
//! ```toml
//! [[regimes]]
//! jurisdiction = "PT"
//! name = "Flat-rate resident regime"
//! local_employment_tax_rate = "0.20"
//! social_contribution_rate = "0.11"
//! foreign_pension_rate = "0.10"
//! default_foreign_rate = "0"
//! required_gross_formula = "flat_local_employment"
//! ```
//!
//! Rates may be written as strings or as bare numbers.

use std::path::{Path, PathBuf};

use relocation_core::{RegimeConfigError, RegimeTable};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid regime table: {0}")]
    Invalid(#[from] RegimeConfigError),
}

/// Parses and validates a regime table.
pub fn parse_regime_table(input: &str) -> Result<RegimeTable, ConfigError> {
    let table: RegimeTable = toml::from_str(input)?;
    table.validate()?;
    debug!(regimes = table.regimes().len(), "loaded regime table");
    Ok(table)
}

pub fn load_regime_table(path: &Path) -> Result<RegimeTable, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_regime_table(&contents)
}
