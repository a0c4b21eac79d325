//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the attendance settings and the employee roster from
//! a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Standard check-in: {}", config.settings().standard_check_in_time);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceSettings, EmployeeRoster, TimeWindow};
