//! Attendance Engine
//!
//! This crate decides when employees may check in and out, derives their
//! attendance status and work hours, manages leave requests, and reports
//! on attendance. The rules in [`evaluation`] and [`leave`] are pure
//! functions; [`tracker`] connects them to storage and a clock, and [`api`]
//! exposes the tracker over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod leave;
pub mod models;
pub mod reporting;
pub mod store;
pub mod tracker;
