// ABOUTME: Renders inventory, sensor, and recipe data into chat reply messages
// ABOUTME: Dates are shown in the configured display time zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use chrono::{DateTime, FixedOffset, Utc};

use crate::constants::{reminder::DISPLAY_DATE_FORMAT, replies};
use crate::line::{OutboundMessage, TemplateAction};
use crate::models::{FoodEntry, Recipe, SensorReading};

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn display_date(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

fn entry_lines(entries: &[FoodEntry], offset: FixedOffset) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} - {}（到期日: {}）",
                entry.name,
                entry.quantity,
                display_date(entry.expires_at, offset)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `查詢冰箱` reply
#[must_use]
pub fn fridge_list(entries: &[FoodEntry], offset: FixedOffset) -> String {
    if entries.is_empty() {
        return replies::EMPTY_FRIDGE.to_owned();
    }
    format!(
        "{}\n{}",
        replies::FRIDGE_LIST_HEADER,
        entry_lines(entries, offset)
    )
}

/// `即將過期` reply
#[must_use]
pub fn expiring_list(entries: &[FoodEntry], offset: FixedOffset) -> String {
    if entries.is_empty() {
        return replies::NOTHING_EXPIRING.to_owned();
    }
    format!(
        "{}\n{}",
        replies::EXPIRING_LIST_HEADER,
        entry_lines(entries, offset)
    )
}

/// `冰箱狀態` reply
#[must_use]
pub fn sensor_status(reading: &SensorReading, offset: FixedOffset) -> String {
    format!(
        "冰箱溫度: {:.1}°C\n冰箱濕度: {:.1}%\n更新時間: {}",
        reading.temperature,
        reading.humidity,
        reading
            .recorded_at
            .with_timezone(&offset)
            .format(DISPLAY_TIME_FORMAT)
    )
}

/// Recipe search reply
#[must_use]
pub fn recipe_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return replies::NO_RECIPES.to_owned();
    }

    let body = recipes
        .iter()
        .enumerate()
        .map(|(index, recipe)| {
            let mut line = format!("{}. {}", index + 1, recipe.name);
            if !recipe.description.is_empty() {
                line.push('\n');
                line.push_str(&recipe.description);
            }
            line.push('\n');
            line.push_str(&recipe.url);
            line
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n{body}", replies::RECIPE_LIST_HEADER)
}

/// Buttons card offered by `新增食物`
#[must_use]
pub fn add_food_menu() -> OutboundMessage {
    OutboundMessage::buttons(
        replies::ADD_FOOD_TITLE,
        replies::ADD_FOOD_PROMPT,
        vec![
            TemplateAction::message(replies::ADD_BY_TEXT_LABEL, "文字輸入新增食物"),
            TemplateAction::message(replies::ADD_BY_PHOTO_LABEL, "圖片辨識新增食物"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn entry(name: &str, quantity: u32, expires_at: DateTime<Utc>) -> FoodEntry {
        FoodEntry {
            id: 1,
            user_id: 1,
            name: name.to_owned(),
            quantity,
            added_at: expires_at,
            expires_at,
        }
    }

    #[test]
    fn test_fridge_list() {
        let expires = Utc.with_ymd_and_hms(2025, 3, 7, 20, 0, 0).unwrap();
        assert_eq!(fridge_list(&[], taipei()), "你的冰箱裡沒有食物。");
        assert_eq!(
            fridge_list(&[entry("牛奶", 2, expires)], taipei()),
            "你的冰箱裡有以下食材：\n牛奶 - 2（到期日: 2025-03-08）"
        );
    }

    #[test]
    fn test_sensor_status() {
        let reading = SensorReading {
            id: 1,
            device_id: "esp32".to_owned(),
            temperature: 4.3,
            humidity: 60.0,
            recorded_at: Utc.with_ymd_and_hms(2025, 3, 7, 1, 30, 0).unwrap(),
        };
        assert_eq!(
            sensor_status(&reading, taipei()),
            "冰箱溫度: 4.3°C\n冰箱濕度: 60.0%\n更新時間: 2025-03-07 09:30"
        );
    }

    #[test]
    fn test_recipe_list() {
        let recipes = vec![Recipe {
            name: "番茄炒蛋".to_owned(),
            url: "https://icook.tw/recipes/1".to_owned(),
            description: String::new(),
            additional_type: String::new(),
            image: String::new(),
        }];
        assert_eq!(
            recipe_list(&recipes),
            "為你找到以下食譜：\n1. 番茄炒蛋\nhttps://icook.tw/recipes/1"
        );
        assert_eq!(recipe_list(&[]), "未找到相關食譜。");
    }
}
