use crate::{ApiError, HistoryListQuery};

use ps_core::HistoryStatus;
use ps_db::HistoryQuery;

use googletest::prelude::*;

#[gtest]
fn given_empty_query_when_converted_then_first_page_with_no_filters() {
    // Given
    let query = HistoryListQuery::default();

    // When
    let converted = HistoryQuery::try_from(query).unwrap();

    // Then
    assert_that!(converted.page, eq(1));
    assert_that!(converted.per_page, eq(0));
    assert_that!(converted.status, none());
    assert_that!(converted.search, none());
}

#[gtest]
fn given_known_status_when_converted_then_parsed() {
    // Given
    let query = HistoryListQuery {
        status: Some("failed".to_string()),
        template_id: Some(3),
        ..Default::default()
    };

    // When
    let converted = HistoryQuery::try_from(query).unwrap();

    // Then
    assert_that!(converted.status, some(eq(HistoryStatus::Failed)));
    assert_that!(converted.template_id, some(eq(3)));
}

#[gtest]
fn given_empty_status_when_converted_then_treated_as_absent() {
    let query = HistoryListQuery {
        status: Some(String::new()),
        ..Default::default()
    };

    let converted = HistoryQuery::try_from(query).unwrap();

    assert_that!(converted.status, none());
}

#[gtest]
fn given_unknown_status_when_converted_then_validation_error_on_status_field() {
    // Given
    let query = HistoryListQuery {
        status: Some("done".to_string()),
        ..Default::default()
    };

    // When
    let result = HistoryQuery::try_from(query);

    // Then
    assert_that!(
        result,
        err(matches_pattern!(ApiError::Validation {
            field: some(eq("status")),
            ..
        }))
    );
}
