// ABOUTME: Integration tests for the shelf-life table
// ABOUTME: Covers seeding, lazy insertion of unknown names, and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::create_test_database;
use fridge_companion::{constants::inventory::DEFAULT_SHELF_LIFE_SEED, inventory::ShelfLifeTable};

#[tokio::test]
async fn test_seed_populates_empty_table_once() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);

    assert_eq!(table.seed_defaults().await.unwrap(), DEFAULT_SHELF_LIFE_SEED.len());
    assert_eq!(table.seed_defaults().await.unwrap(), 0);

    let entries = table.list().await.unwrap();
    assert_eq!(entries.len(), DEFAULT_SHELF_LIFE_SEED.len());
    assert_eq!(table.lookup("雞蛋").await.unwrap(), Some(35));
    assert_eq!(table.lookup("香蕉").await.unwrap(), Some(9));
}

#[tokio::test]
async fn test_seed_skips_non_empty_table() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);
    table.ensure_with_default("豆腐", 3).await.unwrap();

    assert_eq!(table.seed_defaults().await.unwrap(), 0);
    assert_eq!(table.list().await.unwrap().len(), 1);
    assert_eq!(table.lookup("牛奶").await.unwrap(), None);
}

#[tokio::test]
async fn test_ensure_inserts_default_for_unknown_name() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);

    assert_eq!(table.lookup("芭樂").await.unwrap(), None);
    assert_eq!(table.ensure("芭樂").await.unwrap(), 7);
    assert_eq!(table.lookup("芭樂").await.unwrap(), Some(7));
}

#[tokio::test]
async fn test_ensure_keeps_existing_value() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);
    table.seed_defaults().await.unwrap();

    assert_eq!(table.ensure("雞蛋").await.unwrap(), 35);
    assert_eq!(table.ensure_with_default("雞蛋", 2).await.unwrap(), 35);
    assert_eq!(table.list().await.unwrap().len(), DEFAULT_SHELF_LIFE_SEED.len());
}

#[tokio::test]
async fn test_ensure_rejects_zero_default() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);

    assert!(table.ensure_with_default("鹽", 0).await.is_err());
    assert_eq!(table.lookup("鹽").await.unwrap(), None);
}

#[tokio::test]
async fn test_names_match_exactly() {
    let database = create_test_database().await.unwrap();
    let table = ShelfLifeTable::new(&database, 7);
    table.seed_defaults().await.unwrap();

    // No trimming or case folding
    assert_eq!(table.lookup("Milk").await.unwrap(), None);
    assert_eq!(table.lookup("milk").await.unwrap(), None);
    assert_eq!(table.lookup("牛奶 ").await.unwrap(), None);
}
