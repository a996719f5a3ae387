//! Post-commit hook fan-out: each hook is isolated from the others, and
//! no notification failure escapes to the caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use eyre::Result;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use slotbook_api::notify::{run_booking_hooks, BookingHook, EmailBookingHook, Mailer};
use slotbook_core::models::slot::Slot;

fn sample_slot() -> Slot {
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    Slot {
        id: Uuid::new_v4(),
        start_time: start,
        end_time: start + Duration::minutes(30),
        is_booked: true,
        booked_by: Some(Uuid::new_v4()),
        created_at: start,
    }
}

struct FailingHook;

#[async_trait]
impl BookingHook for FailingHook {
    fn name(&self) -> &str {
        "failing"
    }

    async fn on_booked(&self, _slot: &Slot, _booker_email: Option<&str>) -> Result<()> {
        Err(eyre::eyre!("relay unreachable"))
    }
}

struct CountingHook {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl BookingHook for CountingHook {
    fn name(&self) -> &str {
        "counting"
    }

    async fn on_booked(&self, _slot: &Slot, _booker_email: Option<&str>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records sends; addresses listed in `fail_for` error out.
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    fail_for: Vec<String>,
}

impl RecordingMailer {
    fn new() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail_for: Vec::new() }
    }

    fn failing_for(address: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: vec![address.to_string()],
        }
    }

    fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(to, _)| to.clone()).collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        if self.fail_for.iter().any(|addr| addr == to) {
            return Err(eyre::eyre!("delivery to {to} refused"));
        }
        self.sent.lock().unwrap().push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn test_a_failing_hook_does_not_stop_the_others() {
    let calls = Arc::new(AtomicUsize::new(0));
    let hooks: Vec<Arc<dyn BookingHook>> = vec![
        Arc::new(FailingHook),
        Arc::new(CountingHook { calls: calls.clone() }),
    ];

    run_booking_hooks(&hooks, &sample_slot(), Some("customer@example.com")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_hook_failures_never_escape_the_fan_out() {
    let hooks: Vec<Arc<dyn BookingHook>> = vec![Arc::new(FailingHook)];

    // Completing without panicking or returning an error is the
    // contract: the committed booking is unaffected.
    run_booking_hooks(&hooks, &sample_slot(), None).await;
}

#[tokio::test]
async fn test_email_hook_notifies_admin_and_booker() {
    let mailer = Arc::new(RecordingMailer::new());
    let hook = EmailBookingHook::new(mailer.clone(), "admin@example.com".to_string());

    hook.on_booked(&sample_slot(), Some("customer@example.com"))
        .await
        .unwrap();

    assert_eq!(
        mailer.recipients(),
        vec!["admin@example.com".to_string(), "customer@example.com".to_string()]
    );
}

#[tokio::test]
async fn test_email_hook_skips_booker_without_an_address() {
    let mailer = Arc::new(RecordingMailer::new());
    let hook = EmailBookingHook::new(mailer.clone(), "admin@example.com".to_string());

    hook.on_booked(&sample_slot(), None).await.unwrap();

    assert_eq!(mailer.recipients(), vec!["admin@example.com".to_string()]);
}

#[tokio::test]
async fn test_admin_delivery_failure_still_mails_the_booker() {
    let mailer = Arc::new(RecordingMailer::failing_for("admin@example.com"));
    let hook = EmailBookingHook::new(mailer.clone(), "admin@example.com".to_string());

    let result = hook.on_booked(&sample_slot(), Some("customer@example.com")).await;

    assert!(result.is_err());
    assert_eq!(mailer.recipients(), vec!["customer@example.com".to_string()]);
}
