// ABOUTME: Integration tests for the expiry reminder job and scheduler
// ABOUTME: Covers notification texts, horizon boundaries, and push delivery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{Duration, FixedOffset};
use common::{create_test_inventory, create_test_user, test_now, MockMessaging};
use fridge_companion::inventory::{deliver_reminders, ReminderJob, ReminderScheduler};

fn taipei() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

#[tokio::test]
async fn test_run_reports_food_expiring_within_horizon() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let user = create_test_user(&database, "U-reminder").await.unwrap();
    let added_at = test_now();
    inventory.add(user.id, "牛奶", 1, added_at).await.unwrap();
    inventory.add(user.id, "雞蛋", 6, added_at).await.unwrap();

    let job = ReminderJob::new(database, inventory, Duration::hours(24), taipei());
    let run_at = added_at + Duration::days(7) - Duration::hours(1);
    let notifications = job.run(run_at).await.unwrap();

    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.recipient, "U-reminder");
    assert_eq!(notification.food_name, "牛奶");
    assert_eq!(notification.expires_at, added_at + Duration::days(7));
    // 2025-03-08 04:00 UTC is noon in Taipei on the same day
    assert_eq!(
        notification.text,
        "提醒：你的 牛奶 即將在 2025-03-08 過期，請盡快食用。"
    );
}

#[tokio::test]
async fn test_run_repeats_until_entry_is_gone() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let user = create_test_user(&database, "U-repeat").await.unwrap();
    let added_at = test_now();
    inventory.add(user.id, "菠菜", 1, added_at).await.unwrap();

    let job = ReminderJob::new(
        database,
        inventory.clone(),
        Duration::hours(24),
        taipei(),
    );
    let run_at = added_at + Duration::days(6) + Duration::hours(12);

    assert_eq!(job.run(run_at).await.unwrap().len(), 1);
    assert_eq!(job.run(run_at + Duration::hours(1)).await.unwrap().len(), 1);

    inventory
        .remove(
            user.id,
            "菠菜",
            fridge_companion::models::RemoveAmount::All,
        )
        .await
        .unwrap();
    assert!(job.run(run_at).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_covers_every_user() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let alice = create_test_user(&database, "U-alice").await.unwrap();
    let bob = create_test_user(&database, "U-bob").await.unwrap();
    let _carol = create_test_user(&database, "U-carol").await.unwrap();
    let added_at = test_now();
    inventory.add(alice.id, "番茄", 1, added_at).await.unwrap();
    inventory.add(bob.id, "番茄", 2, added_at).await.unwrap();
    inventory.add(bob.id, "菠菜", 2, added_at).await.unwrap();

    let job = ReminderJob::new(database, inventory, Duration::hours(24), taipei());
    let notifications = job
        .run(added_at + Duration::days(7) - Duration::hours(2))
        .await
        .unwrap();

    let mut recipients: Vec<&str> = notifications
        .iter()
        .map(|n| n.recipient.as_str())
        .collect();
    recipients.sort_unstable();
    assert_eq!(recipients, vec!["U-alice", "U-bob", "U-bob"]);
}

#[tokio::test]
async fn test_run_horizon_boundaries_are_inclusive() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let user = create_test_user(&database, "U-bounds").await.unwrap();
    let added_at = test_now();
    inventory.add(user.id, "牛奶", 1, added_at).await.unwrap();
    let expires_at = added_at + Duration::days(7);
    let horizon = Duration::hours(24);

    let job = ReminderJob::new(database, inventory, horizon, taipei());

    assert_eq!(job.run(expires_at - horizon).await.unwrap().len(), 1);
    assert_eq!(job.run(expires_at).await.unwrap().len(), 1);
    assert!(job
        .run(expires_at + Duration::seconds(1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_run_with_no_users() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let job = ReminderJob::new(database, inventory, Duration::hours(24), taipei());

    assert!(job.run(test_now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deliver_pushes_each_notification() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let alice = create_test_user(&database, "U-alice").await.unwrap();
    let bob = create_test_user(&database, "U-bob").await.unwrap();
    let added_at = test_now();
    inventory.add(alice.id, "牛奶", 1, added_at).await.unwrap();
    inventory.add(bob.id, "牛奶", 1, added_at).await.unwrap();

    let job = ReminderJob::new(database, inventory, Duration::hours(24), taipei());
    let notifications = job
        .run(added_at + Duration::days(7) - Duration::hours(1))
        .await
        .unwrap();

    let messaging = MockMessaging::new().failing_pushes_to("U-bob");
    let delivered = deliver_reminders(&messaging, &notifications).await;

    assert_eq!(delivered, 1);
    let pushes = messaging.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].0, "U-alice");
    assert_eq!(
        pushes[0].1[0].as_text(),
        Some("提醒：你的 牛奶 即將在 2025-03-08 過期，請盡快食用。")
    );
}

#[tokio::test]
async fn test_scheduler_shuts_down_before_first_tick() {
    let (database, inventory) = create_test_inventory().await.unwrap();
    let job = ReminderJob::new(database, inventory, Duration::hours(24), taipei());
    let messaging = Arc::new(MockMessaging::new());

    let scheduler = ReminderScheduler::spawn(
        job,
        Arc::clone(&messaging) as Arc<dyn fridge_companion::line::MessagingClient>,
        std::time::Duration::from_secs(3600),
    );
    scheduler.shutdown().await;

    assert!(messaging.pushes().is_empty());
}
