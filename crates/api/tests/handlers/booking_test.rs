//! State-machine semantics of the book/cancel transitions, exercised
//! against mock repositories standing in for the conditional writes.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use slotbook_core::errors::BookingError;
use slotbook_db::models::DbSlot;
use uuid::Uuid;

use crate::test_utils::{booked_slot, free_slot, TestContext};

/// Mirrors the book transition: the conditional write either returns
/// the updated row, or the caller discriminates conflict vs missing.
async fn book_wrapper(
    ctx: &TestContext,
    slot_id: Uuid,
    user_id: Uuid,
) -> Result<DbSlot, BookingError> {
    match ctx
        .slot_repo
        .book_slot(slot_id, user_id)
        .await
        .map_err(BookingError::Database)?
    {
        Some(slot) => Ok(slot),
        None => match ctx
            .slot_repo
            .get_slot_by_id(slot_id)
            .await
            .map_err(BookingError::Database)?
        {
            None => Err(BookingError::NotFound(format!(
                "Slot with ID {slot_id} not found"
            ))),
            Some(_) => Err(BookingError::Conflict(
                "This slot was just booked by someone else".to_string(),
            )),
        },
    }
}

/// Mirrors the cancel transition: idempotent on FREE, owner-gated
/// otherwise.
async fn cancel_wrapper(
    ctx: &TestContext,
    slot_id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<DbSlot, BookingError> {
    let slot = ctx
        .slot_repo
        .get_slot_by_id(slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {slot_id} not found")))?;

    if !slot.is_booked {
        return Ok(slot);
    }
    if slot.booked_by != Some(user_id) && !is_admin {
        return Err(BookingError::Authorization(
            "Only the booking owner or an admin may cancel".to_string(),
        ));
    }

    ctx.slot_repo
        .cancel_slot(slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {slot_id} not found")))
}

#[tokio::test]
async fn test_booking_a_free_slot_succeeds() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_book_slot()
        .times(1)
        .returning(move |id, booker| Ok(Some(booked_slot(id, booker))));

    let slot = book_wrapper(&ctx, slot_id, user_id).await.unwrap();
    assert!(slot.is_booked);
    assert_eq!(slot.booked_by, Some(user_id));
}

#[tokio::test]
async fn test_losing_the_race_reports_conflict_and_keeps_the_winner() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let winner = Uuid::new_v4();
    let loser = Uuid::new_v4();

    // The guard no longer matches, so the conditional write touches
    // nothing.
    ctx.slot_repo.expect_book_slot().returning(|_, _| Ok(None));
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |id| Ok(Some(booked_slot(id, winner))));

    let result = book_wrapper(&ctx, slot_id, loser).await;

    match result {
        Err(BookingError::Conflict(_)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }

    // The stored row still belongs to the winner.
    let stored = ctx.slot_repo.get_slot_by_id(slot_id).await.unwrap().unwrap();
    assert_eq!(stored.booked_by, Some(winner));
}

#[tokio::test]
async fn test_booking_a_missing_slot_reports_not_found() {
    let mut ctx = TestContext::new();

    ctx.slot_repo.expect_book_slot().returning(|_, _| Ok(None));
    ctx.slot_repo.expect_get_slot_by_id().returning(|_| Ok(None));

    let result = book_wrapper(&ctx, Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(BookingError::NotFound(_))));
}

#[tokio::test]
async fn test_two_attempts_on_one_slot_have_exactly_one_winner() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    // Stand-in for the store's conditional update: the first writer
    // flips the row, later writers see a non-matching guard.
    let winner: Arc<Mutex<Option<Uuid>>> = Arc::new(Mutex::new(None));

    let book_state = winner.clone();
    ctx.slot_repo.expect_book_slot().returning(move |id, booker| {
        let mut current = book_state.lock().unwrap();
        if current.is_none() {
            *current = Some(booker);
            Ok(Some(booked_slot(id, booker)))
        } else {
            Ok(None)
        }
    });
    let read_state = winner.clone();
    ctx.slot_repo.expect_get_slot_by_id().returning(move |id| {
        Ok(Some(match *read_state.lock().unwrap() {
            Some(booker) => booked_slot(id, booker),
            None => free_slot(id),
        }))
    });

    let outcome_one = book_wrapper(&ctx, slot_id, first).await;
    let outcome_two = book_wrapper(&ctx, slot_id, second).await;

    assert!(outcome_one.is_ok());
    assert!(matches!(outcome_two, Err(BookingError::Conflict(_))));

    // Final state: booked by the winner, never booker-less, never dual.
    let stored = ctx.slot_repo.get_slot_by_id(slot_id).await.unwrap().unwrap();
    assert!(stored.is_booked);
    assert_eq!(stored.booked_by, Some(first));
}

#[tokio::test]
async fn test_cancelling_a_free_slot_is_a_no_op() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(|id| Ok(Some(free_slot(id))));
    // The release write must not run for an already-free slot.
    ctx.slot_repo.expect_cancel_slot().times(0);

    let slot = cancel_wrapper(&ctx, Uuid::new_v4(), user_id, false)
        .await
        .unwrap();
    assert!(!slot.is_booked);
    assert_eq!(slot.booked_by, None);
}

#[tokio::test]
async fn test_owner_can_cancel_their_booking() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();

    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |id| Ok(Some(booked_slot(id, owner))));
    ctx.slot_repo
        .expect_cancel_slot()
        .times(1)
        .returning(|id| Ok(Some(free_slot(id))));

    let slot = cancel_wrapper(&ctx, Uuid::new_v4(), owner, false)
        .await
        .unwrap();
    assert!(!slot.is_booked);
}

#[tokio::test]
async fn test_stranger_cannot_cancel_without_admin_role() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |id| Ok(Some(booked_slot(id, owner))));
    ctx.slot_repo.expect_cancel_slot().times(0);

    let result = cancel_wrapper(&ctx, Uuid::new_v4(), stranger, false).await;
    assert!(matches!(result, Err(BookingError::Authorization(_))));
}

#[tokio::test]
async fn test_admin_can_cancel_any_booking() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();
    let admin = Uuid::new_v4();

    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |id| Ok(Some(booked_slot(id, owner))));
    ctx.slot_repo
        .expect_cancel_slot()
        .times(1)
        .returning(|id| Ok(Some(free_slot(id))));

    let slot = cancel_wrapper(&ctx, Uuid::new_v4(), admin, true).await.unwrap();
    assert!(!slot.is_booked);
    assert_eq!(slot.booked_by, None);
}
