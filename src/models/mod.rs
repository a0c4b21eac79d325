//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod leave_request;
mod report;

pub use attendance::{AttendanceRecord, AttendanceStatus, RecordState};
pub use employee::{Department, Employee, Role};
pub use leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
pub use report::{
    AdminOverview, AttendanceHistory, AttendanceSummary, Dashboard, EmployeeProfile, TodayStatus,
};
