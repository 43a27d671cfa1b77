//! Tax configuration for the payroll engine.
//!
//! Bracket tables, CPP/EI parameters, and the basic personal amount are
//! immutable configuration data loaded from YAML files, one file per tax
//! year. Jurisdictions are pluggable: a province is supported exactly when
//! its bracket table appears in the configuration.

mod loader;
mod types;

pub use loader::TaxTables;
pub use types::{BracketTable, CppConfig, EiConfig, TaxBracket, TaxYearConfig};
