// ABOUTME: Integration tests for the file-backed SQLite database
// ABOUTME: Data and migrations survive reopening the same file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{init_test_logging, test_now};
use fridge_companion::{
    database::Database,
    inventory::{Inventory, ShelfLifeTable},
};
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("fridge.db").display())
}

#[tokio::test]
async fn test_inventory_survives_reopen() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    {
        let database = Database::new(&url).await.unwrap();
        let shelf_life = ShelfLifeTable::new(&database, 7);
        assert!(shelf_life.seed_defaults().await.unwrap() > 0);
        let user = database.create_user("U-file", "檔案", test_now()).await.unwrap();
        Inventory::new(&database, shelf_life)
            .add(user.id, "牛奶", 2, test_now())
            .await
            .unwrap();
        database.pool().close().await;
    }

    let database = Database::new(&url).await.unwrap();
    let shelf_life = ShelfLifeTable::new(&database, 7);
    assert_eq!(shelf_life.seed_defaults().await.unwrap(), 0);

    let user = database.get_user_by_line_id("U-file").await.unwrap().unwrap();
    let entry = Inventory::new(&database, shelf_life)
        .get(user.id, "牛奶")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.quantity, 2);
    assert_eq!(entry.expires_at, test_now() + Duration::days(7));
}

#[tokio::test]
async fn test_create_user_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let database = Database::new(&database_url(&dir)).await.unwrap();

    let first = database.create_user("U-same", "第一次", test_now()).await.unwrap();
    let second = database
        .create_user("U-same", "第二次", test_now() + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.display_name, "第一次");
    assert_eq!(database.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_bind_device_links_user() {
    let dir = TempDir::new().unwrap();
    let database = Database::new(&database_url(&dir)).await.unwrap();
    let user = database.create_user("U-bind", "綁定", test_now()).await.unwrap();
    assert!(user.device_id.is_none());

    database.bind_device(user.id, "fridge-9", test_now()).await.unwrap();

    let user = database.get_user_by_line_id("U-bind").await.unwrap().unwrap();
    assert_eq!(user.device_id.as_deref(), Some("fridge-9"));
    assert!(database.get_device("fridge-9").await.unwrap().is_some());
}
