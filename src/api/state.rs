//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::TaxTables;
use crate::store::{
    EmployeeStore, MemoryEmployeeStore, MemoryPunchStore, MemoryShiftStore,
    MemoryWeeklyHoursStore, PunchStore, ShiftStore, WeeklyHoursStore,
};

/// Shared application state.
///
/// Holds the data stores and the loaded tax tables. Stores are trait
/// objects so a persistent backend can replace the in-memory ones without
/// touching the handlers.
#[derive(Clone)]
pub struct AppState {
    shifts: Arc<dyn ShiftStore>,
    punches: Arc<dyn PunchStore>,
    weekly: Arc<dyn WeeklyHoursStore>,
    employees: Arc<dyn EmployeeStore>,
    tax: Arc<TaxTables>,
}

impl AppState {
    /// Creates application state with the given stores and tax tables.
    pub fn new(
        shifts: Arc<dyn ShiftStore>,
        punches: Arc<dyn PunchStore>,
        weekly: Arc<dyn WeeklyHoursStore>,
        employees: Arc<dyn EmployeeStore>,
        tax: TaxTables,
    ) -> Self {
        Self {
            shifts,
            punches,
            weekly,
            employees,
            tax: Arc::new(tax),
        }
    }

    /// Creates application state backed by fresh in-memory stores.
    pub fn in_memory(tax: TaxTables) -> Self {
        Self::new(
            Arc::new(MemoryShiftStore::new()),
            Arc::new(MemoryPunchStore::new()),
            Arc::new(MemoryWeeklyHoursStore::new()),
            Arc::new(MemoryEmployeeStore::new()),
            tax,
        )
    }

    /// Returns a reference to the shift store.
    pub fn shifts(&self) -> &dyn ShiftStore {
        self.shifts.as_ref()
    }

    /// Returns a reference to the punch store.
    pub fn punches(&self) -> &dyn PunchStore {
        self.punches.as_ref()
    }

    /// Returns a reference to the weekly hours store.
    pub fn weekly(&self) -> &dyn WeeklyHoursStore {
        self.weekly.as_ref()
    }

    /// Returns a reference to the employee store.
    pub fn employees(&self) -> &dyn EmployeeStore {
        self.employees.as_ref()
    }

    /// Returns a reference to the loaded tax tables.
    pub fn tax(&self) -> &TaxTables {
        &self.tax
    }
}
