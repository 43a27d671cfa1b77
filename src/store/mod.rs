//! Storage abstractions for the payroll engine.
//!
//! Persistence technology is the caller's concern; the engine works against
//! these traits. The two invariants the data layer must uphold live here:
//! at most one open punch per (employee, date), and one weekly-hours row per
//! (employee, organization, week) window. Both are enforced atomically by
//! the store, not by read-then-write application logic.

mod memory;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::error::PayrollResult;
use crate::models::{EmployeePayProfile, EmployeePunch, Shift, WeeklyHours};

pub use memory::{MemoryEmployeeStore, MemoryPunchStore, MemoryShiftStore, MemoryWeeklyHoursStore};

/// Read access to scheduled shifts.
pub trait ShiftStore: Send + Sync {
    /// Records a shift. Used by the surrounding scheduler; the engine itself
    /// only reads.
    fn insert(&self, shift: Shift);

    /// Shifts for one employee of an organization with dates in
    /// `[start, end]` inclusive.
    fn find_for_employee(
        &self,
        employee_id: i64,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Shift>;

    /// All shifts of an organization with dates in `[start, end]` inclusive.
    fn find_for_organization(
        &self,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Shift>;
}

/// Punch session storage.
///
/// The one-open-punch-per-day invariant is enforced inside the store: the
/// existence check and the write happen under a single lock, so two
/// concurrent punch-ins for the same employee cannot both succeed.
pub trait PunchStore: Send + Sync {
    /// Inserts an open punch session.
    ///
    /// # Errors
    ///
    /// [`crate::error::PayrollError::AlreadyPunchedIn`] when an open punch
    /// already exists for the same employee and date.
    fn insert_open_punch(&self, punch: EmployeePunch) -> PayrollResult<()>;

    /// Closes the open punch for (employee, date), recording the punch-out
    /// time and deriving the day's overtime against `overtime_threshold`.
    ///
    /// Lookup, duration derivation, and write happen atomically under the
    /// store lock. Returns the closed punch.
    ///
    /// # Errors
    ///
    /// [`crate::error::PayrollError::NotPunchedIn`] when no open punch
    /// exists for the employee on that date.
    fn close_open_punch(
        &self,
        employee_id: i64,
        date: NaiveDate,
        punch_out: NaiveTime,
        overtime_threshold: Decimal,
    ) -> PayrollResult<EmployeePunch>;

    /// The punch session for (employee, date). When the day holds several
    /// sessions, the open one takes precedence, then the latest closed one.
    fn find_on_date(&self, employee_id: i64, date: NaiveDate) -> Option<EmployeePunch>;

    /// Punches for one employee of an organization with dates in
    /// `[start, end]` inclusive.
    fn find_for_employee(
        &self,
        employee_id: i64,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<EmployeePunch>;

    /// All punches of an organization with dates in `[start, end]` inclusive.
    fn find_for_organization(
        &self,
        organization_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<EmployeePunch>;
}

/// Weekly hours aggregate storage.
pub trait WeeklyHoursStore: Send + Sync {
    /// Inserts the aggregate, replacing any existing row with the same
    /// (employee, organization, week_start, week_end) key. Recomputing a
    /// window is therefore idempotent.
    fn upsert(&self, record: WeeklyHours);

    /// Rows of an organization whose week window overlaps
    /// `[period_start, period_end]`.
    fn find_overlapping(
        &self,
        organization_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Vec<WeeklyHours>;

    /// Rows of one employee whose week window overlaps
    /// `[period_start, period_end]`.
    fn find_overlapping_for_employee(
        &self,
        employee_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Vec<WeeklyHours>;

    /// Rows of one employee whose week window lies entirely inside
    /// `[start, end]`. Used by the dashboard rollups.
    fn find_within_for_employee(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<WeeklyHours>;
}

/// Employee pay profile storage.
pub trait EmployeeStore: Send + Sync {
    /// Inserts or replaces a pay profile.
    fn upsert(&self, profile: EmployeePayProfile);

    /// The pay profile for an employee, if one exists.
    fn get(&self, employee_id: i64) -> Option<EmployeePayProfile>;

    /// All pay profiles belonging to an organization.
    fn list_for_organization(&self, organization_id: i64) -> Vec<EmployeePayProfile>;
}
