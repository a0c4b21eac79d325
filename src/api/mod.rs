//! HTTP API module for the Attendance Engine.
//!
//! JSON endpoints for check-in and check-out, attendance history, leave
//! requests, the employee profile, dashboards and the administrative views. The caller's identity
//! arrives in the `x-employee-id` header.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, EMPLOYEE_ID_HEADER};
pub use request::{
    EmployeeRegistration, HistoryParams, LeaveReview, LeaveSubmission, StatusOverride,
};
pub use response::{ApiError, ApiErrorResponse, AttendanceActionResponse};
pub use state::AppState;
