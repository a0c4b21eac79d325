//! HTTP request handlers for the Attendance Engine API.
//!
//! Every handler tags its log lines with a fresh correlation id, reads the
//! caller's identity from the [`EMPLOYEE_ID_HEADER`] header, and delegates
//! to the [`AttendanceTracker`](crate::tracker::AttendanceTracker).

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::store::AttendanceQuery;

use super::request::{
    EmployeeRegistration, HistoryParams, LeaveReview, LeaveSubmission, StatusOverride,
};
use super::response::{ApiError, ApiErrorResponse, AttendanceActionResponse};
use super::state::AppState;

/// Header carrying the caller's employee id.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/status", get(status_handler))
        .route("/attendance/history", get(history_handler))
        .route("/leave", post(submit_leave_handler).get(list_leaves_handler))
        .route("/profile", get(profile_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/admin/overview", get(admin_overview_handler))
        .route("/admin/attendance", get(admin_attendance_handler))
        .route("/admin/employees", post(add_employee_handler))
        .route("/admin/leave/:id", put(review_leave_handler))
        .route(
            "/admin/attendance/:employee_id/:date",
            put(override_status_handler),
        )
        .with_state(state)
}

/// Handler for POST /attendance/check-in.
async fn check_in_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing check-in");

    let start_time = Instant::now();
    let result = state
        .tracker()
        .check_in(&employee_id)
        .map(|record| AttendanceActionResponse {
            message: format!("Checked in successfully at {}", clock_time(record.check_in_time)),
            record,
        });
    respond(correlation_id, "check-in", start_time, StatusCode::OK, result)
}

/// Handler for POST /attendance/check-out.
async fn check_out_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing check-out");

    let start_time = Instant::now();
    let result = state
        .tracker()
        .check_out(&employee_id)
        .map(|record| AttendanceActionResponse {
            message: format!(
                "Checked out successfully at {}. Work hours: {}",
                clock_time(record.check_out_time),
                record.work_hours.unwrap_or_default()
            ),
            record,
        });
    respond(correlation_id, "check-out", start_time, StatusCode::OK, result)
}

/// Handler for GET /attendance/status.
async fn status_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().status(&employee_id);
    respond(correlation_id, "status", start_time, StatusCode::OK, result)
}

/// Handler for GET /attendance/history.
async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return query_rejection(rejection, correlation_id).into_response(),
    };

    let start_time = Instant::now();
    let result = state
        .tracker()
        .history(&employee_id, params.start_date, params.end_date);
    respond(correlation_id, "history", start_time, StatusCode::OK, result)
}

/// Handler for POST /leave.
async fn submit_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LeaveSubmission>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => return json_rejection(rejection, correlation_id).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        leave_type = ?submission.leave_type,
        "Processing leave request"
    );

    let start_time = Instant::now();
    let result = state
        .tracker()
        .submit_leave(&employee_id, submission.into());
    respond(correlation_id, "submit leave", start_time, StatusCode::CREATED, result)
}

/// Handler for GET /leave.
async fn list_leaves_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().my_leaves(&employee_id);
    respond(correlation_id, "list leaves", start_time, StatusCode::OK, result)
}

/// Handler for GET /profile.
async fn profile_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().profile(&employee_id);
    respond(correlation_id, "profile", start_time, StatusCode::OK, result)
}

/// Handler for GET /dashboard.
async fn dashboard_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().dashboard(&employee_id);
    respond(correlation_id, "dashboard", start_time, StatusCode::OK, result)
}

/// Handler for GET /admin/overview.
async fn admin_overview_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let viewer_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().admin_overview(&viewer_id);
    respond(correlation_id, "admin overview", start_time, StatusCode::OK, result)
}

/// Handler for GET /admin/attendance.
async fn admin_attendance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let viewer_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(rejection, correlation_id).into_response(),
    };

    let start_time = Instant::now();
    let result = state.tracker().admin_attendance(&viewer_id, &query);
    respond(correlation_id, "admin attendance", start_time, StatusCode::OK, result)
}

/// Handler for POST /admin/employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EmployeeRegistration>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let viewer_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let registration = match payload {
        Ok(Json(registration)) => registration,
        Err(rejection) => return json_rejection(rejection, correlation_id).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        viewer_id = %viewer_id,
        employee_id = %registration.id,
        "Processing employee registration"
    );

    let start_time = Instant::now();
    let employee = registration.into_employee(state.tracker().today());
    let result = state.tracker().add_employee(&viewer_id, employee);
    respond(correlation_id, "add employee", start_time, StatusCode::CREATED, result)
}

/// Handler for PUT /admin/leave/:id.
async fn review_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<LeaveReview>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let reviewer_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let Path(leave_id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(rejection, correlation_id).into_response(),
    };
    let review = match payload {
        Ok(Json(review)) => review,
        Err(rejection) => return json_rejection(rejection, correlation_id).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        reviewer_id = %reviewer_id,
        leave_id,
        decision = ?review.decision,
        "Processing leave review"
    );

    let start_time = Instant::now();
    let result =
        state
            .tracker()
            .review_leave(&reviewer_id, leave_id, review.decision, &review.comments);
    respond(correlation_id, "review leave", start_time, StatusCode::OK, result)
}

/// Handler for PUT /admin/attendance/:employee_id/:date.
async fn override_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    target: Result<Path<(String, NaiveDate)>, PathRejection>,
    payload: Result<Json<StatusOverride>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let viewer_id = match identity(&headers, correlation_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let Path((employee_id, date)) = match target {
        Ok(target) => target,
        Err(rejection) => return path_rejection(rejection, correlation_id).into_response(),
    };
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_rejection(rejection, correlation_id).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        viewer_id = %viewer_id,
        employee_id = %employee_id,
        %date,
        status = ?body.status,
        "Processing status override"
    );

    let start_time = Instant::now();
    let result = state.tracker().override_status(
        &viewer_id,
        &employee_id,
        date,
        body.status,
        body.notes.as_deref(),
    );
    respond(correlation_id, "status override", start_time, StatusCode::OK, result)
}

/// Reads the caller's employee id from the request headers.
fn identity(headers: &HeaderMap, correlation_id: Uuid) -> Result<String, ApiErrorResponse> {
    let id = headers
        .get(EMPLOYEE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty());

    match id {
        Some(id) => Ok(id.to_string()),
        None => {
            warn!(correlation_id = %correlation_id, "Request without employee identity");
            Err(ApiErrorResponse::new(
                StatusCode::UNAUTHORIZED,
                ApiError::missing_identity(EMPLOYEE_ID_HEADER),
            ))
        }
    }
}

/// Turns a tracker result into a JSON response, logging the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    start_time: Instant,
    success: StatusCode,
    result: EngineResult<T>,
) -> Response {
    let duration = start_time.elapsed();
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = duration.as_micros(),
                "Request completed successfully"
            );
            (
                success,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_rejection(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(rejection: QueryRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn path_rejection(rejection: PathRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn clock_time(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
