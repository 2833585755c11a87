//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Server-side causes never reach the client
//! - Query parsing reports the offending field

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kingtable::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;

fn not_found() -> CatalogError {
    CatalogError::Source(SourceError::NotFound {
        path: PathBuf::from("/var/lib/kingtable/people.json"),
    })
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_missing_filters_returns_400() {
        let err = CatalogError::Query(QueryError::MissingFilters);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_argument_returns_400() {
        let err = CatalogError::Query(QueryError::invalid("size", "must not be negative"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_collection_returns_404() {
        let err = CatalogError::UnknownCollection {
            name: "planets".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_files_disabled_returns_404() {
        assert_eq!(CatalogError::FilesDisabled.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_source_error_returns_500() {
        assert_eq!(not_found().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(not_found().is_server_error());
    }

    #[test]
    fn test_config_error_returns_500() {
        let err = CatalogError::Config(ConfigError::FileNotFound {
            path: "kingtable.yaml".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_client_error_keeps_message() {
        let err = CatalogError::Query(QueryError::invalid("page", "'x' is not an integer"));
        let response = err.to_response();

        assert_eq!(response.code, "INVALID_ARGUMENT");
        assert!(response.message.contains("'x' is not an integer"));
        assert_eq!(response.details, Some(json!({ "field": "page" })));
    }

    #[test]
    fn test_server_error_hides_path() {
        let response = not_found().to_response();

        assert_eq!(response.code, "SOURCE_NOT_FOUND");
        assert_eq!(response.message, "Internal server error");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_display_keeps_cause_for_logs() {
        assert!(not_found().to_string().contains("/var/lib/kingtable/people.json"));
    }
}

// =============================================================================
// Query Parsing Errors
// =============================================================================

mod query_error_tests {
    use super::*;

    fn field_of(err: QueryError) -> String {
        match err {
            QueryError::InvalidArgument { field, .. } => field,
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_no_filters() {
        assert_eq!(
            QueryDescriptor::from_filters(None).unwrap_err(),
            QueryError::MissingFilters
        );
        assert_eq!(
            QueryDescriptor::from_filters(Some(&Value::Null)).unwrap_err(),
            QueryError::MissingFilters
        );
    }

    #[test]
    fn test_filters_must_be_an_object() {
        let err = QueryDescriptor::from_filters(Some(&json!([1, 2]))).unwrap_err();
        assert!(matches!(err, QueryError::InvalidBody { .. }));
    }

    #[test]
    fn test_bad_page_and_size() {
        let err = QueryDescriptor::from_filters(Some(&json!({ "page": "one", "size": 10 })));
        assert_eq!(field_of(err.unwrap_err()), "page");

        let err = QueryDescriptor::from_filters(Some(&json!({ "page": 1, "size": -5 })));
        assert_eq!(field_of(err.unwrap_err()), "size");

        let err = QueryDescriptor::from_filters(Some(&json!({ "page": 1.5, "size": 5 })));
        assert_eq!(field_of(err.unwrap_err()), "page");
    }

    #[test]
    fn test_bad_search_and_sort() {
        let err = QueryDescriptor::from_filters(Some(&json!({ "page": 1, "size": 5, "search": 7 })));
        assert_eq!(field_of(err.unwrap_err()), "search");

        let err = QueryDescriptor::from_filters(Some(&json!({ "page": 1, "size": 5, "sortBy": 7 })));
        assert_eq!(field_of(err.unwrap_err()), "sortBy");

        let err =
            QueryDescriptor::from_filters(Some(&json!({ "page": 1, "size": 5, "sortBy": [[1, 2]] })));
        assert_eq!(field_of(err.unwrap_err()), "sortBy");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let query =
            QueryDescriptor::from_filters(Some(&json!({ "page": " 3 ", "size": "20" }))).unwrap();
        assert_eq!(query.page_number, 3);
        assert_eq!(query.page_size, 20);
        assert_eq!(query.offset(), 40);
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    #[test]
    fn test_can_match_source_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CatalogError = SourceError::from_io("/data/colors.json", io).into();

        match err {
            CatalogError::Source(SourceError::NotFound { path }) => {
                assert_eq!(path, PathBuf::from("/data/colors.json"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_keeps_source() {
        use std::error::Error;

        let source = serde_json::from_str::<Vec<Record>>("{").unwrap_err();
        let err = SourceError::Parse {
            path: PathBuf::from("colors.json"),
            source,
        };
        assert!(err.source().is_some());
    }
}

// =============================================================================
// IntoResponse Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_filters_is_plain_text() {
        let response = CatalogError::Query(QueryError::MissingFilters).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/plain"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Missing filters data.");
    }

    #[tokio::test]
    async fn test_other_errors_are_json() {
        let response = CatalogError::UnknownCollection {
            name: "planets".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "COLLECTION_NOT_FOUND");
        assert_eq!(body["details"]["collection"], "planets");
    }

    #[tokio::test]
    async fn test_internal_error_into_response() {
        let response = CatalogError::Internal("lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("poisoned"));
    }
}
