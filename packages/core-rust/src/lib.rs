//! Roster Core — employee record types and id helpers.

pub mod employee;
pub mod id;

pub use employee::{seed_employees, Employee, EmployeePatch, SEED_COUNT};
pub use id::is_numeric_id;
