//! HTTP request handlers for the HR KPI engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        State,
        rejection::{JsonRejection, StringRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_metrics;
use crate::error::EngineResult;
use crate::import::{import_absences, import_employees, import_remunerations};

use super::request::MetricsRequest;
use super::response::{ApiError, ApiErrorResponse, ImportResponse, MetricsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", post(metrics_handler))
        .route("/import/employees", post(import_employees_handler))
        .route("/import/remunerations", post(import_remunerations_handler))
        .route("/import/absences", post(import_absences_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Turns a JSON extraction failure into a 400 body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field path.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    }
}

/// Turns a CSV body extraction failure into a 400 body.
fn body_rejection_error(rejection: StringRejection, correlation_id: Uuid) -> ApiError {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection,
        "CSV body rejected"
    );
    match rejection {
        StringRejection::InvalidUtf8(err) => ApiError::with_details(
            "INVALID_ENCODING",
            "CSV body must be UTF-8 text",
            err.body_text(),
        ),
        _ => ApiError::malformed_json("Failed to read request body"),
    }
}

/// Handler for POST /metrics.
///
/// Computes the KPI snapshot for the posted records and returns it with its
/// audit trace and the ranked site and cost-center lists.
async fn metrics_handler(
    State(state): State<AppState>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing metrics request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let config = state.config();
    let start_time = Instant::now();
    let report = match compute_metrics(
        &request.employees,
        &request.remunerations,
        &request.absences,
        request.reference_date,
        config.config(),
    ) {
        Ok(report) => report,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Metrics computation failed"
            );
            return error_response(err.into());
        }
    };

    let ranking_limit = config.assumptions().ranking_limit;
    let snapshot = report.snapshot;
    info!(
        correlation_id = %correlation_id,
        establishment_id = request.establishment_id.as_deref().unwrap_or("-"),
        employees = request.employees.len(),
        active_headcount = snapshot.headcount.active_headcount,
        warnings = report.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Metrics computed successfully"
    );

    let response = MetricsResponse {
        snapshot_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        assumptions_version: config.metadata().version.clone(),
        establishment_id: request.establishment_id,
        top_sites: snapshot.top_sites(ranking_limit).to_vec(),
        top_cost_centers: snapshot.top_cost_centers(ranking_limit).to_vec(),
        snapshot,
        audit_trace: report.audit_trace,
    };
    json_response(StatusCode::OK, response)
}

fn import_response<T: Serialize>(
    kind: &str,
    correlation_id: Uuid,
    result: EngineResult<Vec<T>>,
) -> Response {
    match result {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                kind,
                imported = records.len(),
                "Import completed successfully"
            );
            json_response(StatusCode::OK, ImportResponse::from(records))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                kind,
                error = %err,
                "Import failed"
            );
            error_response(err.into())
        }
    }
}

fn import_csv<T: Serialize>(
    kind: &str,
    body: Result<String, StringRejection>,
    import: fn(&str) -> EngineResult<Vec<T>>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                body_rejection_error(rejection, correlation_id),
            );
        }
    };
    info!(correlation_id = %correlation_id, kind, bytes = body.len(), "Importing records");
    import_response(kind, correlation_id, import(&body))
}

/// Handler for POST /import/employees. The body is the CSV export.
async fn import_employees_handler(body: Result<String, StringRejection>) -> Response {
    import_csv("employees", body, import_employees)
}

/// Handler for POST /import/remunerations. The body is the CSV export.
async fn import_remunerations_handler(body: Result<String, StringRejection>) -> Response {
    import_csv("remunerations", body, import_remunerations)
}

/// Handler for POST /import/absences. The body is the CSV export.
async fn import_absences_handler(body: Result<String, StringRejection>) -> Response {
    import_csv("absences", body, import_absences)
}
