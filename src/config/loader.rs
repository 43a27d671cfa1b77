//! Tax configuration loading.
//!
//! Loads per-year YAML files from a directory and provides access to the
//! most recent tax year.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::TaxYearConfig;

/// Loads and provides access to tax withholding configuration.
///
/// # Directory Structure
///
/// The configuration directory holds one YAML file per tax year:
/// ```text
/// config/tax/
/// └── 2023.yaml   # brackets, CPP/EI parameters, basic personal amount
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::TaxTables;
///
/// let tables = TaxTables::load("./config/tax").unwrap();
/// let current = tables.latest();
/// println!("Tax year {}", current.year);
/// ```
#[derive(Debug, Clone)]
pub struct TaxTables {
    // Sorted by year ascending.
    years: Vec<TaxYearConfig>,
}

impl TaxTables {
    /// Loads all tax-year files from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or empty of YAML files,
    /// if any file fails to parse, or if a bracket table violates ordering
    /// (bounds must be strictly increasing with only the final bracket
    /// unbounded).
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(PayrollError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| PayrollError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut years = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| PayrollError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                let config = Self::load_yaml(&file_path)?;
                config.validate(&file_path.display().to_string())?;
                years.push(config);
            }
        }

        if years.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: format!("{} (no tax year files found)", dir_str),
            });
        }

        years.sort_by_key(|c| c.year);
        Ok(Self { years })
    }

    fn load_yaml(path: &Path) -> PayrollResult<TaxYearConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// The most recent tax year configuration.
    pub fn latest(&self) -> &TaxYearConfig {
        // Non-empty by construction.
        self.years.last().expect("loader never yields zero years")
    }

    /// The configuration for a specific tax year, if loaded.
    pub fn for_year(&self, year: i32) -> Option<&TaxYearConfig> {
        self.years.iter().find(|c| c.year == year)
    }
}
