use crate::ApiError;

use ps_db::DbError;
use ps_engine::EngineError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "History item 7 not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "History item 7 not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation("Unknown status 'done'", Some("status"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "status");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::internal("Session export failed: write_failed");

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[gtest]
fn given_row_not_found_when_converted_then_not_found() {
    // Given
    let db_error = DbError::from(sqlx::Error::RowNotFound);

    // When
    let api_error = ApiError::from(db_error);

    // Then
    assert_that!(api_error, matches_pattern!(ApiError::NotFound { .. }));
}

#[gtest]
fn given_other_sqlx_error_when_converted_then_internal_hides_details() {
    // Given
    let db_error = DbError::from(sqlx::Error::PoolTimedOut);

    // When
    let api_error = ApiError::from(db_error);

    // Then
    assert_that!(
        api_error,
        matches_pattern!(ApiError::Internal {
            message: eq("Database operation failed"),
            ..
        })
    );
}

#[gtest]
fn given_engine_not_found_when_converted_then_names_entity() {
    // Given
    let engine_error = EngineError::not_found("Template", 12);

    // When
    let api_error = ApiError::from(engine_error);

    // Then
    assert_that!(
        api_error,
        matches_pattern!(ApiError::NotFound {
            message: eq("Template 12 not found"),
            ..
        })
    );
}
