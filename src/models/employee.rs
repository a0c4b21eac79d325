//! Employee model and related types.
//!
//! This module defines the Employee struct together with the Role and
//! Department enums used for dashboards and authorization.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The employee's role, which decides the dashboard they see and whether
/// they may perform administrative actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees the whole organisation and may review leave.
    Manager,
    /// HR/admin staff; sees department statistics and may review leave.
    Hr,
    /// Regular staff; sees their own department.
    Staff,
}

impl Role {
    /// Returns true if the role may perform administrative actions.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Manager | Role::Hr)
    }
}

/// The department an employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Human Resources.
    Hr,
    /// Information Technology.
    It,
    /// Finance.
    Finance,
    /// Sales.
    Sales,
    /// Marketing.
    Marketing,
    /// Operations.
    Operations,
}

impl Department {
    /// Returns the human-readable department name.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Department;
    ///
    /// assert_eq!(Department::It.display_name(), "Information Technology");
    /// ```
    pub fn display_name(self) -> &'static str {
        match self {
            Department::Hr => "Human Resources",
            Department::It => "Information Technology",
            Department::Finance => "Finance",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Operations => "Operations",
        }
    }
}

fn default_active() -> bool {
    true
}

/// An employee whose attendance is tracked.
///
/// Immutable for the duration of an attendance cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee code (e.g. "EMP001").
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// The department the employee works in.
    pub department: Department,
    /// The employee's role.
    pub role: Role,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Deactivated employees cannot check in or request leave.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Employee {
    /// Returns the number of full years since the hire date.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Department, Employee, Role};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "EMP001".to_string(),
    ///     full_name: "Ada Lovelace".to_string(),
    ///     department: Department::It,
    ///     role: Role::Staff,
    ///     position: String::new(),
    ///     hire_date: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
    ///     is_active: true,
    /// };
    /// assert_eq!(employee.years_of_service(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()), 5);
    /// assert_eq!(employee.years_of_service(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), 6);
    /// ```
    pub fn years_of_service(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.hire_date.year();
        if (today.month(), today.day()) < (self.hire_date.month(), self.hire_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(role: Role) -> Employee {
        Employee {
            id: "EMP001".to_string(),
            full_name: "Ada Lovelace".to_string(),
            department: Department::It,
            role,
            position: "Engineer".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn test_deserialize_employee_defaults_active() {
        let json = r#"{
            "id": "EMP001",
            "full_name": "Ada Lovelace",
            "department": "it",
            "role": "staff",
            "hire_date": "2020-01-06"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.department, Department::It);
        assert_eq!(employee.role, Role::Staff);
        assert!(employee.is_active);
        assert!(employee.position.is_empty());
    }

    #[test]
    fn test_serialize_role_snake_case() {
        let employee = create_test_employee(Role::Hr);
        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("\"role\":\"hr\""));
    }

    #[test]
    fn test_admin_roles() {
        assert!(Role::Manager.is_admin());
        assert!(Role::Hr.is_admin());
        assert!(!Role::Staff.is_admin());
    }

    #[test]
    fn test_years_of_service_before_hire_is_zero() {
        let employee = create_test_employee(Role::Staff);
        let before = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(employee.years_of_service(before), 0);
    }
}
