use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use slotbook_api::middleware::auth::{AuthUser, USER_EMAIL_HEADER, USER_ID_HEADER};
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::errors::BookingError;

fn status_of(error: BookingError) -> StatusCode {
    AppError(error).into_response().status()
}

#[rstest]
#[case(BookingError::NotFound("x".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("x".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Authentication("x".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("x".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::Conflict("x".into()), StatusCode::CONFLICT)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(status_of(error), expected);
}

#[test]
fn test_database_errors_map_to_internal_server_error() {
    assert_eq!(
        status_of(BookingError::Database(eyre::eyre!("boom"))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_auth_user_extracted_from_identity_headers() {
    let id = Uuid::new_v4();
    let request = Request::builder()
        .header(USER_ID_HEADER, id.to_string())
        .header(USER_EMAIL_HEADER, "customer@example.com")
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email.as_deref(), Some("customer@example.com"));
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let request = Request::builder().body(()).unwrap();
    let (mut parts, _) = request.into_parts();

    let rejection = AuthUser::from_request_parts(&mut parts, &())
        .await
        .expect_err("no identity headers");
    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_identity_is_unauthorized() {
    let request = Request::builder()
        .header(USER_ID_HEADER, "not-a-uuid")
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let rejection = AuthUser::from_request_parts(&mut parts, &())
        .await
        .expect_err("malformed identity header");
    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_email_header_is_optional() {
    let request = Request::builder()
        .header(USER_ID_HEADER, Uuid::new_v4().to_string())
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(user.email, None);
}
