//! Post-commit booking notifications.
//!
//! After a booking transition commits, a list of hooks fires
//! best-effort: each hook runs regardless of the others, and a failure
//! is logged and swallowed. The committed booking is never rolled back
//! or reported as failed because a notification could not be sent.

use async_trait::async_trait;
use eyre::Result;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use slotbook_core::models::slot::Slot;

/// Outbound mail, fire-and-forget from the caller's perspective.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Delivers mail by POSTing JSON to an HTTP relay endpoint.
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl RelayMailer {
    pub fn new(relay_url: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
            from,
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.client
            .post(&self.relay_url)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// A post-commit observer of successful bookings.
#[async_trait]
pub trait BookingHook: Send + Sync {
    fn name(&self) -> &str;

    async fn on_booked(&self, slot: &Slot, booker_email: Option<&str>) -> Result<()>;
}

/// Emails the administrator and the booker about a new booking.
pub struct EmailBookingHook {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl EmailBookingHook {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: String) -> Self {
        Self { mailer, admin_email }
    }
}

#[async_trait]
impl BookingHook for EmailBookingHook {
    fn name(&self) -> &str {
        "email"
    }

    async fn on_booked(&self, slot: &Slot, booker_email: Option<&str>) -> Result<()> {
        let subject = "New booking";
        let body = format!(
            "A slot was booked: {} to {}.",
            slot.start_time.format("%Y-%m-%d %H:%M"),
            slot.end_time.format("%H:%M"),
        );

        // One recipient failing must not stop the other.
        let mut first_error = None;
        if let Err(err) = self.mailer.send(&self.admin_email, subject, &body).await {
            first_error = Some(err);
        }
        if let Some(booker) = booker_email {
            if let Err(err) = self
                .mailer
                .send(booker, "Your booking is confirmed", &body)
                .await
            {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Fires every hook for a committed booking. Hook failures are isolated
/// from each other and from the booking itself.
pub async fn run_booking_hooks(
    hooks: &[Arc<dyn BookingHook>],
    slot: &Slot,
    booker_email: Option<&str>,
) {
    for hook in hooks {
        if let Err(err) = hook.on_booked(slot, booker_email).await {
            warn!("booking hook '{}' failed: {err:#}", hook.name());
        }
    }
}
