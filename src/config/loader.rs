//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading attendance
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{AttendanceSettings, EmployeeRoster};

/// Loads and provides access to attendance configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Windows, standard times, thresholds
/// └── employees.yaml  # Optional roster used to seed the employee directory
/// ```
///
/// `settings.yaml` is required. A missing `employees.yaml` yields an empty
/// roster.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// for employee in loader.employees() {
///     println!("{} ({})", employee.full_name, employee.id);
/// }
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: AttendanceSettings,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `settings.yaml` is missing
    /// - [`EngineError::ConfigParseError`] if any file contains invalid YAML
    ///   or the roster repeats an employee id
    /// - [`EngineError::InvalidSettings`] if the settings are inconsistent
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<AttendanceSettings>(&path.join("settings.yaml"))?;
        settings.validate()?;

        let roster_path = path.join("employees.yaml");
        let employees = if roster_path.exists() {
            let roster = Self::load_yaml::<EmployeeRoster>(&roster_path)?;
            Self::check_unique_ids(&roster_path, &roster.employees)?;
            roster.employees
        } else {
            Vec::new()
        };

        Ok(Self {
            settings,
            employees,
        })
    }

    /// Builds a loader from values already in memory.
    pub fn from_parts(settings: AttendanceSettings, employees: Vec<Employee>) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            employees,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_unique_ids(path: &Path, employees: &[Employee]) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for employee in employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate employee id '{}'", employee.id),
                });
            }
        }
        Ok(())
    }

    /// Returns the attendance settings.
    pub fn settings(&self) -> &AttendanceSettings {
        &self.settings
    }

    /// Returns the seed roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
