//! In-memory store implementations.
//!
//! Mutex-guarded vectors, suitable for tests and for embedding the engine in
//! an application that supplies its own persistence elsewhere. Each mutation
//! holds the collection lock for the whole check-and-write sequence, which
//! is what makes the punch and upsert invariants atomic.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::calculation::duration_between;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeePayProfile, EmployeePunch, Shift, WeeklyHours};

use super::{EmployeeStore, PunchStore, ShiftStore, WeeklyHoursStore};

/// In-memory [`ShiftStore`].
#[derive(Debug, Default)]
pub struct MemoryShiftStore {
    shifts: Mutex<Vec<Shift>>,
}

impl MemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShiftStore for MemoryShiftStore {
    fn insert(&self, shift: Shift) {
        self.shifts.lock().expect("shift store poisoned").push(shift);
    }

    fn find_for_employee(
        &self,
        employee_id: i64,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Shift> {
        self.shifts
            .lock()
            .expect("shift store poisoned")
            .iter()
            .filter(|s| {
                s.employee_id == employee_id
                    && s.organization_id == organization_id
                    && s.date >= start
                    && s.date <= end
            })
            .cloned()
            .collect()
    }

    fn find_for_organization(
        &self,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Shift> {
        self.shifts
            .lock()
            .expect("shift store poisoned")
            .iter()
            .filter(|s| s.organization_id == organization_id && s.date >= start && s.date <= end)
            .cloned()
            .collect()
    }
}

/// In-memory [`PunchStore`].
#[derive(Debug, Default)]
pub struct MemoryPunchStore {
    punches: Mutex<Vec<EmployeePunch>>,
}

impl MemoryPunchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a punch record directly, bypassing the open-punch invariant.
    /// Test and backfill helper.
    pub fn insert_raw(&self, punch: EmployeePunch) {
        self.punches.lock().expect("punch store poisoned").push(punch);
    }
}

impl PunchStore for MemoryPunchStore {
    fn insert_open_punch(&self, punch: EmployeePunch) -> PayrollResult<()> {
        let mut punches = self.punches.lock().expect("punch store poisoned");
        let open_exists = punches
            .iter()
            .any(|p| p.employee_id == punch.employee_id && p.date == punch.date && p.is_open());
        if open_exists {
            return Err(PayrollError::AlreadyPunchedIn {
                employee_id: punch.employee_id,
                date: punch.date,
            });
        }
        punches.push(punch);
        Ok(())
    }

    fn close_open_punch(
        &self,
        employee_id: i64,
        date: NaiveDate,
        punch_out: NaiveTime,
        overtime_threshold: Decimal,
    ) -> PayrollResult<EmployeePunch> {
        let mut punches = self.punches.lock().expect("punch store poisoned");
        let open = punches
            .iter_mut()
            .find(|p| p.employee_id == employee_id && p.date == date && p.is_open())
            .ok_or(PayrollError::NotPunchedIn { employee_id, date })?;

        let worked = duration_between(open.punch_in, punch_out);
        open.punch_out = Some(punch_out);
        open.overtime_hours = (worked - overtime_threshold).max(Decimal::ZERO);
        Ok(open.clone())
    }

    fn find_on_date(&self, employee_id: i64, date: NaiveDate) -> Option<EmployeePunch> {
        let punches = self.punches.lock().expect("punch store poisoned");
        let mut on_date = punches
            .iter()
            .filter(|p| p.employee_id == employee_id && p.date == date);
        // An open session always wins; otherwise the most recently closed
        // one. Insertion order is chronological for a single day.
        let mut latest = None;
        for punch in &mut on_date {
            if punch.is_open() {
                return Some(punch.clone());
            }
            latest = Some(punch);
        }
        latest.cloned()
    }

    fn find_for_employee(
        &self,
        employee_id: i64,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<EmployeePunch> {
        self.punches
            .lock()
            .expect("punch store poisoned")
            .iter()
            .filter(|p| {
                p.employee_id == employee_id
                    && p.organization_id == organization_id
                    && p.date >= start
                    && p.date <= end
            })
            .cloned()
            .collect()
    }

    fn find_for_organization(
        &self,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<EmployeePunch> {
        self.punches
            .lock()
            .expect("punch store poisoned")
            .iter()
            .filter(|p| p.organization_id == organization_id && p.date >= start && p.date <= end)
            .cloned()
            .collect()
    }
}

/// In-memory [`WeeklyHoursStore`].
#[derive(Debug, Default)]
pub struct MemoryWeeklyHoursStore {
    records: Mutex<Vec<WeeklyHours>>,
}

impl MemoryWeeklyHoursStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows. Test helper.
    pub fn len(&self) -> usize {
        self.records.lock().expect("weekly hours store poisoned").len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WeeklyHoursStore for MemoryWeeklyHoursStore {
    fn upsert(&self, record: WeeklyHours) {
        let mut records = self.records.lock().expect("weekly hours store poisoned");
        if let Some(existing) = records.iter_mut().find(|r| r.same_window(&record)) {
            *existing = record;
        } else {
            records.push(record);
        }
    }

    fn find_overlapping(
        &self,
        organization_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Vec<WeeklyHours> {
        self.records
            .lock()
            .expect("weekly hours store poisoned")
            .iter()
            .filter(|r| r.organization_id == organization_id && r.overlaps(period_start, period_end))
            .cloned()
            .collect()
    }

    fn find_overlapping_for_employee(
        &self,
        employee_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Vec<WeeklyHours> {
        self.records
            .lock()
            .expect("weekly hours store poisoned")
            .iter()
            .filter(|r| r.employee_id == employee_id && r.overlaps(period_start, period_end))
            .cloned()
            .collect()
    }

    fn find_within_for_employee(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<WeeklyHours> {
        self.records
            .lock()
            .expect("weekly hours store poisoned")
            .iter()
            .filter(|r| r.employee_id == employee_id && r.week_start >= start && r.week_end <= end)
            .cloned()
            .collect()
    }
}

/// In-memory [`EmployeeStore`].
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    profiles: Mutex<HashMap<i64, EmployeePayProfile>>,
}

impl MemoryEmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeStore for MemoryEmployeeStore {
    fn upsert(&self, profile: EmployeePayProfile) {
        self.profiles
            .lock()
            .expect("employee store poisoned")
            .insert(profile.employee_id, profile);
    }

    fn get(&self, employee_id: i64) -> Option<EmployeePayProfile> {
        self.profiles
            .lock()
            .expect("employee store poisoned")
            .get(&employee_id)
            .cloned()
    }

    fn list_for_organization(&self, organization_id: i64) -> Vec<EmployeePayProfile> {
        self.profiles
            .lock()
            .expect("employee store poisoned")
            .values()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect()
    }
}
