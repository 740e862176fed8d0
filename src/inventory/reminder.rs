// ABOUTME: Expiry reminder job and the background scheduler that delivers its output
// ABOUTME: Each run scans every user for food expiring within the horizon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Expiry Reminders
//!
//! [`ReminderJob::run`] is a pure scan: it returns one notification per food
//! entry that expires within the horizon and sends nothing. The job keeps no
//! state between runs, so an entry inside the horizon is reported on every
//! run until it is removed or expires.
//!
//! [`ReminderScheduler`] drives the job on an interval and pushes each
//! notification through a [`MessagingClient`].

use super::Inventory;
use crate::constants::{replies, reminder::DISPLAY_DATE_FORMAT};
use crate::database::Database;
use crate::errors::AppResult;
use crate::line::{MessagingClient, OutboundMessage};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// One reminder to push to one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    /// Platform id of the recipient
    pub recipient: String,
    /// Food name
    pub food_name: String,
    /// Expiry of the entry
    pub expires_at: DateTime<Utc>,
    /// Message text
    pub text: String,
}

/// Scans all inventories for food about to expire
#[derive(Clone)]
pub struct ReminderJob {
    db: Database,
    inventory: Inventory,
    horizon: Duration,
    display_offset: FixedOffset,
}

impl ReminderJob {
    /// Create a job with the given horizon and display time zone
    #[must_use]
    pub const fn new(
        db: Database,
        inventory: Inventory,
        horizon: Duration,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            db,
            inventory,
            horizon,
            display_offset,
        }
    }

    /// Collect notifications for every entry with `now <= expiry <= now + horizon`
    ///
    /// Users are visited in creation order and entries in expiry order. A
    /// failing user is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the user list cannot be read
    pub async fn run(&self, now: DateTime<Utc>) -> AppResult<Vec<ReminderNotification>> {
        let users = self.db.list_users().await?;
        let mut notifications = Vec::new();

        for user in &users {
            let entries = match self.inventory.expiring_within(user.id, now, self.horizon).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(user_id = user.id, error = %e, "Skipping user in reminder scan");
                    continue;
                }
            };

            notifications.extend(entries.into_iter().map(|entry| ReminderNotification {
                recipient: user.line_id.clone(),
                text: format_reminder(&entry.name, entry.expires_at, self.display_offset),
                food_name: entry.name,
                expires_at: entry.expires_at,
            }));
        }

        info!(
            users = users.len(),
            notifications = notifications.len(),
            horizon_hours = self.horizon.num_hours(),
            "Reminder scan complete"
        );
        Ok(notifications)
    }
}

/// Render the reminder text with the expiry date in the display time zone
#[must_use]
pub fn format_reminder(name: &str, expires_at: DateTime<Utc>, offset: FixedOffset) -> String {
    let date = expires_at
        .with_timezone(&offset)
        .format(DISPLAY_DATE_FORMAT)
        .to_string();
    replies::REMINDER_TEMPLATE
        .replace("{name}", name)
        .replace("{date}", &date)
}

/// Push notifications one by one; failures are logged and skipped
///
/// Returns the number delivered.
pub async fn deliver_reminders(
    messaging: &dyn MessagingClient,
    notifications: &[ReminderNotification],
) -> usize {
    let mut delivered = 0;
    for notification in notifications {
        let message = OutboundMessage::text(&notification.text);
        match messaging
            .push(&notification.recipient, std::slice::from_ref(&message))
            .await
        {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                recipient = %notification.recipient,
                food = %notification.food_name,
                error = %e,
                "Failed to push expiry reminder"
            ),
        }
    }
    delivered
}

/// Runs a [`ReminderJob`] on a fixed interval until shut down
pub struct ReminderScheduler {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl ReminderScheduler {
    /// Spawn the scheduler; the first run happens one `period` from now
    #[must_use]
    pub fn spawn(
        job: ReminderJob,
        messaging: Arc<dyn MessagingClient>,
        period: std::time::Duration,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        Self::tick(&job, messaging.as_ref()).await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Reminder scheduler received shutdown signal");
                        break;
                    }
                }
            }
        });

        info!(period_secs = period.as_secs(), "Reminder scheduler started");
        Self {
            shutdown_tx,
            handle,
        }
    }

    async fn tick(job: &ReminderJob, messaging: &dyn MessagingClient) {
        match job.run(Utc::now()).await {
            Ok(notifications) => {
                let delivered = deliver_reminders(messaging, &notifications).await;
                info!(
                    delivered,
                    failed = notifications.len() - delivered,
                    "Expiry reminders pushed"
                );
            }
            Err(e) => warn!(error = %e, "Reminder scan failed"),
        }
    }

    /// Stop the loop and wait for the task to finish
    pub async fn shutdown(self) {
        if let Err(e) = self.shutdown_tx.send(()).await {
            debug!(error = ?e, "Reminder scheduler already stopped");
        }
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Reminder scheduler task ended abnormally");
        }
    }
}
