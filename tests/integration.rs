//! Integration tests for the Net Salary Engine.
//!
//! These tests drive the HTTP router against the shipped 2024 configuration
//! and cover:
//! - the reference 30,000 scenario
//! - the exemption bands and ceiling
//! - the credit proration under different payment conventions
//! - the total-tax floor
//! - the text report
//! - error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::generate_report;
use salary_engine::config::ConfigLoader;
use salary_engine::models::{SalaryInput, round_half_up};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/it2024").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(load_config()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

async fn post_breakdown(body: Value) -> (StatusCode, Value) {
    let (status, bytes) = post(create_router_for_test(), "/breakdown", body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Asserts that a report amount rounds half-up to the expected two-decimal figure.
fn assert_amount(result: &Value, pointer: &str, expected: &str) {
    let raw = result["report"]
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("Missing report field {}", pointer));
    let actual = round_half_up(decimal(raw));
    assert_eq!(
        actual,
        decimal(expected),
        "Expected {} to be {}, got {}",
        pointer,
        expected,
        actual
    );
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Reference scenario
// =============================================================================

#[tokio::test]
async fn test_reference_30000_over_14_payments() {
    let (status, result) = post_breakdown(json!({
        "gross_salary": "30000",
        "payments_per_year": 14,
        "region": "emilia_romagna",
        "municipality": "bologna"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "/social_security/annual", "2927.10");
    assert_amount(&result, "/taxable_income", "27072.90");
    assert_amount(&result, "/gross_income_tax", "6226.77");
    assert_amount(&result, "/exemption/amount/annual", "1542.96");
    assert_amount(&result, "/income_tax/annual", "4683.81");
    assert_amount(&result, "/regional_surtax/annual", "432.51");
    assert_amount(&result, "/municipal_surtax/annual", "216.58");
    assert_amount(&result, "/tax_credit/annual", "1709.88");
    assert_amount(&result, "/total_tax/annual", "3623.01");
    assert_amount(&result, "/total_withholding/annual", "6550.11");
    assert_amount(&result, "/net_salary/annual", "23449.89");
    assert_amount(&result, "/net_salary/monthly", "1674.99");
    assert_amount(&result, "/effective_tax_rate", "12.08");
    assert!(warning_codes(&result).is_empty());
}

#[tokio::test]
async fn test_defaults_match_explicit_reference_request() {
    let (_, defaulted) = post_breakdown(json!({ "gross_salary": "30000" })).await;
    let (_, explicit) = post_breakdown(json!({
        "gross_salary": "30000",
        "payments_per_year": 14,
        "region": "emilia_romagna",
        "municipality": "bologna"
    }))
    .await;

    assert_eq!(defaulted["report"], explicit["report"]);
    assert_eq!(defaulted["input"], explicit["input"]);
    assert_ne!(defaulted["calculation_id"], explicit["calculation_id"]);
}

#[tokio::test]
async fn test_audit_trace_records_each_stage() {
    let (_, result) = post_breakdown(json!({ "gross_salary": "30000" })).await;
    let steps = result["audit_trace"]["steps"].as_array().unwrap();

    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0]["rule_id"], "social_security");
    assert_eq!(steps[2]["rule_id"], "exemption");
    assert_eq!(steps[2]["output"]["monthly_gross_rounded"], "2143");
    assert_eq!(steps[6]["rule_id"], "net_salary");
    assert!(
        steps
            .iter()
            .all(|step| !step["legal_ref"].as_str().unwrap().is_empty())
    );
}

// =============================================================================
// SECTION 2: Payment conventions and bands
// =============================================================================

#[tokio::test]
async fn test_twelve_payments_above_exemption_ceiling() {
    let (status, result) = post_breakdown(json!({
        "gross_salary": "45000",
        "payments_per_year": 12
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["report"]["exemption"]["applicable"], false);
    assert_amount(&result, "/income_tax/annual", "8979.92");
    assert_amount(&result, "/regional_surtax/annual", "706.37");
    assert_amount(&result, "/municipal_surtax/annual", "324.87");
    assert_amount(&result, "/tax_credit/annual", "815.28");
    assert_amount(&result, "/total_tax/annual", "9195.89");
    assert_amount(&result, "/net_salary/annual", "31413.46");
    assert_amount(&result, "/net_salary/monthly", "2617.79");
    assert_amount(&result, "/effective_tax_rate", "20.44");
}

#[tokio::test]
async fn test_high_salary_receives_no_credit() {
    let (_, result) = post_breakdown(json!({ "gross_salary": "60000" })).await;

    assert_amount(&result, "/tax_credit/annual", "0.00");
    assert_amount(&result, "/income_tax/annual", "14049.34");
    assert_amount(&result, "/total_tax/annual", "15473.62");
    assert_amount(&result, "/net_salary/annual", "38672.18");
    assert_amount(&result, "/net_salary/monthly", "2762.30");
}

#[tokio::test]
async fn test_thirteen_payments_top_bracket() {
    let (_, result) = post_breakdown(json!({
        "gross_salary": "100000",
        "payments_per_year": 13
    }))
    .await;

    assert_amount(&result, "/social_security/annual", "9757.00");
    assert_amount(&result, "/income_tax/annual", "29571.14");
    assert_amount(&result, "/regional_surtax/annual", "1810.52");
    assert_amount(&result, "/net_salary/annual", "58139.40");
    assert_amount(&result, "/net_salary/monthly", "4472.26");
}

// =============================================================================
// SECTION 3: Floors
// =============================================================================

#[tokio::test]
async fn test_first_bracket_taxes_whole_income() {
    let (status, result) = post_breakdown(json!({ "gross_salary": "20000" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "/gross_income_tax", "4151.18");
    assert_amount(&result, "/exemption/amount/annual", "1200.36");
    assert_amount(&result, "/income_tax/annual", "2950.82");
    assert_amount(&result, "/tax_credit/annual", "2417.95");
    assert_amount(&result, "/total_tax/annual", "935.60");
    assert_amount(&result, "/net_salary/annual", "17113.00");
    assert!(warning_codes(&result).is_empty());
}

#[tokio::test]
async fn test_credit_exceeding_tax_floors_total_at_zero() {
    let (status, result) = post_breakdown(json!({ "gross_salary": "10000" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "/exemption/amount/annual", "600.60");
    assert_amount(&result, "/income_tax/annual", "1474.99");
    assert_amount(&result, "/tax_credit/annual", "1675.71");
    assert_amount(&result, "/total_tax/annual", "0.00");
    assert_amount(&result, "/net_salary/annual", "9024.30");
    assert_eq!(warning_codes(&result), vec!["TOTAL_TAX_FLOORED"]);
}

#[tokio::test]
async fn test_income_in_no_tax_area() {
    let (_, result) = post_breakdown(json!({ "gross_salary": "8000" })).await;

    assert_amount(&result, "/gross_income_tax", "0.00");
    assert_amount(&result, "/income_tax/annual", "0.00");
    assert_amount(&result, "/total_tax/annual", "0.00");
    assert_amount(&result, "/net_salary/annual", "7219.44");
    assert_eq!(
        warning_codes(&result),
        vec!["INCOME_TAX_FLOORED", "TOTAL_TAX_FLOORED"]
    );
}

#[tokio::test]
async fn test_zero_salary() {
    let (status, result) = post_breakdown(json!({ "gross_salary": "0" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "/net_salary/annual", "0.00");
    assert_amount(&result, "/effective_tax_rate", "0.00");
}

// =============================================================================
// SECTION 4: Text report
// =============================================================================

#[tokio::test]
async fn test_text_report_for_reference_scenario() {
    let (status, bytes) = post(
        create_router_for_test(),
        "/breakdown/text",
        json!({ "gross_salary": "30000" }),
    )
    .await;
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(lines.len(), 24);
    assert!(lines[0].ends_with(": 30000.00 €"));
    assert!(lines[2].ends_with(": 2143.00 €"));
    assert!(text.contains("Regional surtax Emilia-Romagna annual"));
    assert!(text.contains("Municipal surtax Bologna annual"));
    assert!(lines[23].ends_with(": 1674.99 €"));
}

#[tokio::test]
async fn test_text_report_matches_library_rendering() {
    let (_, bytes) = post(
        create_router_for_test(),
        "/breakdown/text",
        json!({ "gross_salary": "45000", "payments_per_year": 12 }),
    )
    .await;

    let config = load_config();
    let input = SalaryInput::new(decimal("45000")).with_payments_per_year(12);
    let report = generate_report(&input, config.config()).unwrap();

    assert_eq!(String::from_utf8(bytes).unwrap(), report.to_string());
}

// =============================================================================
// SECTION 5: Error cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/breakdown")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"gross_salary\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_gross_salary() {
    let (status, error) = post_breakdown(json!({ "payments_per_year": 14 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_negative_salary() {
    let (status, error) = post_breakdown(json!({ "gross_salary": "-30000" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert!(error["message"].as_str().unwrap().contains("gross_salary"));
}

#[tokio::test]
async fn test_error_unknown_region() {
    let (status, error) = post_breakdown(json!({
        "gross_salary": "30000",
        "region": "atlantide"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "REGION_NOT_FOUND");
}

#[tokio::test]
async fn test_error_unknown_municipality() {
    let (status, error) = post_breakdown(json!({
        "gross_salary": "30000",
        "municipality": "gotham"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MUNICIPALITY_NOT_FOUND");
}

#[tokio::test]
async fn test_error_zero_payments() {
    let (status, error) = post_breakdown(json!({
        "gross_salary": "30000",
        "payments_per_year": 0
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PAYMENT_COUNT");
}
