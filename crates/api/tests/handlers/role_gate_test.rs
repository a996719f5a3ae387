//! Fail-closed behavior of the admin gate, against a mock profile
//! repository.

use slotbook_core::errors::BookingError;
use slotbook_core::models::profile::Role;
use uuid::Uuid;

use crate::test_utils::{profile_row, TestContext};

/// Mirrors the gate: resolve the profile at call time; missing rows and
/// lookup failures are both "not admin".
async fn require_admin_wrapper(ctx: &TestContext, user_id: Uuid) -> Result<Role, BookingError> {
    let profile = ctx
        .profile_repo
        .get_profile_by_id(user_id)
        .await
        .map_err(|err| {
            BookingError::Authorization(format!(
                "Could not resolve role for identity {user_id}: {err}"
            ))
        })?
        .ok_or_else(|| {
            BookingError::Authorization(format!(
                "Admin access required, and identity {user_id} has no profile"
            ))
        })?;

    match profile.role.parse::<Role>() {
        Ok(Role::Admin) => Ok(Role::Admin),
        _ => Err(BookingError::Authorization(format!(
            "Admin access required for identity {user_id}"
        ))),
    }
}

#[tokio::test]
async fn test_admin_profile_passes_the_gate() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|id| Ok(Some(profile_row(id, "admin"))));

    assert_eq!(require_admin_wrapper(&ctx, user_id).await.unwrap(), Role::Admin);
}

#[tokio::test]
async fn test_customer_profile_is_refused() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|id| Ok(Some(profile_row(id, "customer"))));

    let result = require_admin_wrapper(&ctx, Uuid::new_v4()).await;
    assert!(matches!(result, Err(BookingError::Authorization(_))));
}

#[tokio::test]
async fn test_missing_profile_is_not_admin_and_names_the_identity() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    // No profile row: refused, not crashed.
    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|_| Ok(None));

    match require_admin_wrapper(&ctx, user_id).await {
        Err(BookingError::Authorization(message)) => {
            assert!(
                message.contains(&user_id.to_string()),
                "diagnostic should carry the subject id: {message}"
            );
        }
        other => panic!("expected authorization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_failure_fails_closed() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let result = require_admin_wrapper(&ctx, Uuid::new_v4()).await;
    assert!(matches!(result, Err(BookingError::Authorization(_))));
}

#[tokio::test]
async fn test_unknown_role_value_is_refused() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|id| Ok(Some(profile_row(id, "owner"))));

    let result = require_admin_wrapper(&ctx, Uuid::new_v4()).await;
    assert!(matches!(result, Err(BookingError::Authorization(_))));
}
