//! HTTP request handlers for the Net Salary Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::generate_breakdown;
use crate::models::{BreakdownResult, SalaryInput, round_half_up};

use super::request::BreakdownRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/breakdown/text", post(breakdown_text_handler))
        .with_state(state)
}

/// Handler for POST /breakdown.
///
/// Returns the [`BreakdownResult`] as JSON.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    match process_request(&state, payload) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(result),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for POST /breakdown/text.
///
/// Returns the rendered report, one labelled figure per line.
async fn breakdown_text_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    match process_request(&state, payload) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            result.report.to_string(),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

fn process_request(
    state: &AppState,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Result<BreakdownResult, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return Err(ApiErrorResponse::bad_request(error));
        }
    };

    let input: SalaryInput = request.into();

    match generate_breakdown(&input, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %result.calculation_id,
                gross_salary = %input.gross_salary,
                payments_per_year = input.payments_per_year,
                net_salary = %round_half_up(result.report.net_salary.annual),
                duration_us = result.audit_trace.duration_us,
                "Breakdown completed successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Breakdown failed"
            );
            Err(err.into())
        }
    }
}

fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let config = ConfigLoader::load("./config/it2024").expect("Failed to load config");
        create_router(AppState::new(config))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown", r#"{"gross_salary": "30000"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: BreakdownResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.tax_year, 2024);
        assert_eq!(result.input.payments_per_year, 14);
        assert_eq!(
            round_half_up(result.report.net_salary.annual),
            Decimal::from_str("23449.89").unwrap()
        );
        assert_eq!(result.audit_trace.steps.len(), 7);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_gross_salary_returns_400() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown", r#"{"payments_per_year": 14}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("gross_salary"));
    }

    #[tokio::test]
    async fn test_api_004_wrong_type_returns_malformed_json() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown", r#"{"gross_salary": true}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_005_negative_salary_returns_invalid_input() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown", r#"{"gross_salary": "-100"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_api_006_unknown_region_returns_400() {
        let response = create_test_router()
            .oneshot(post_json(
                "/breakdown",
                r#"{"gross_salary": "30000", "region": "atlantide"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "REGION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_007_zero_payments_returns_400() {
        let response = create_test_router()
            .oneshot(post_json(
                "/breakdown",
                r#"{"gross_salary": "30000", "payments_per_year": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_PAYMENT_COUNT");
    }

    #[tokio::test]
    async fn test_api_008_missing_content_type_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/breakdown")
            .body(Body::from(r#"{"gross_salary": "30000"}"#))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_api_009_text_endpoint_renders_report() {
        let response = create_test_router()
            .oneshot(post_json("/breakdown/text", r#"{"gross_salary": "30000"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert_eq!(text.lines().count(), 24);
        assert!(text.contains("Net salary annual"));
        assert!(text.contains(": 23449.89 €"));
    }

    #[tokio::test]
    async fn test_api_010_text_endpoint_reports_errors_as_json() {
        let response = create_test_router()
            .oneshot(post_json(
                "/breakdown/text",
                r#"{"gross_salary": "30000", "municipality": "gotham"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MUNICIPALITY_NOT_FOUND");
    }
}
