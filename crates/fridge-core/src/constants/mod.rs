// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults, shelf-life seed data, and the user-facing reply texts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identity
pub mod service {
    /// Service name used in logs and health responses
    pub const SERVICE_NAME: &str = "fridge-companion";
    /// Fallback display name when the profile lookup fails
    pub const FALLBACK_DISPLAY_NAME: &str = "朋友";
}

/// Network defaults
pub mod network {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default outbound request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted webhook body size
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}

/// Inventory defaults
pub mod inventory {
    /// Shelf life given to food names seen for the first time
    pub const DEFAULT_SHELF_LIFE_DAYS: u32 = 7;

    /// Seed list loaded into an empty shelf-life table
    pub const DEFAULT_SHELF_LIFE_SEED: &[(&str, u32)] = &[
        ("香蕉", 9),
        ("麵包", 14),
        ("雞蛋", 35),
        ("牛奶", 7),
        ("馬鈴薯", 35),
        ("菠菜", 7),
        ("番茄", 7),
    ];
}

/// Reminder defaults
pub mod reminder {
    /// Seconds between reminder scans
    pub const DEFAULT_INTERVAL_SECS: u64 = 24 * 60 * 60;
    /// Expiry horizon scanned by each run
    pub const DEFAULT_HORIZON_HOURS: i64 = 24;
    /// Offset used when printing dates to users (Taiwan)
    pub const DEFAULT_DISPLAY_UTC_OFFSET_HOURS: i32 = 8;
    /// Date format in reminder texts
    pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Recipe search defaults
pub mod recipes {
    /// Recipe website base URL
    pub const DEFAULT_SEARCH_BASE_URL: &str = "https://icook.tw";
    /// Results kept per search
    pub const DEFAULT_RESULT_LIMIT: usize = 5;
    /// In-memory cache lifetime
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
}

/// LINE Messaging API endpoints
pub mod line {
    /// Messaging API base
    pub const DEFAULT_API_BASE: &str = "https://api.line.me";
    /// Content download base
    pub const DEFAULT_DATA_API_BASE: &str = "https://api-data.line.me";
    /// Signature header sent with every webhook
    pub const SIGNATURE_HEADER: &str = "x-line-signature";
    /// Maximum characters in one text message
    pub const MAX_TEXT_LENGTH: usize = 5000;
}

/// Telemetry defaults
pub mod sensors {
    /// Header carrying the device upload token
    pub const DEVICE_TOKEN_HEADER: &str = "x-device-token";
    /// Description stored for devices registered implicitly
    pub const AUTO_REGISTERED_DESCRIPTION: &str = "auto-registered";
}

/// User-facing reply texts
pub mod replies {
    /// Greeting for a newly created fridge; `{name}` is replaced
    pub const WELCOME_TEMPLATE: &str = "Hello {name}, 您的虛擬冰箱剛建立完成，請重新選擇功能！";
    /// Expiry reminder; `{name}` and `{date}` are replaced
    pub const REMINDER_TEMPLATE: &str = "提醒：你的 {name} 即將在 {date} 過期，請盡快食用。";
    /// Unknown command
    pub const UNKNOWN_COMMAND: &str = "請輸入有效的指令！";
    /// Empty fridge
    pub const EMPTY_FRIDGE: &str = "你的冰箱裡沒有食物。";
    /// Header of the fridge listing
    pub const FRIDGE_LIST_HEADER: &str = "你的冰箱裡有以下食材：";
    /// Nothing is about to expire
    pub const NOTHING_EXPIRING: &str = "目前沒有即將過期的食物。";
    /// Header of the expiring listing
    pub const EXPIRING_LIST_HEADER: &str = "以下食材即將過期：";
    /// Usage for text add
    pub const ADD_USAGE: &str = "請輸入: 新增 食物名稱 數量（數量為選填）";
    /// Add without arguments
    pub const ADD_MISSING_ARGUMENT: &str = "請輸入食物名稱。例如：'新增 蘋果 3'";
    /// Partial removal without arguments
    pub const REMOVE_USAGE: &str = "請輸入: 刪除 食物名稱 數量（數量為選填）";
    /// Full removal without arguments
    pub const CLEAR_USAGE: &str = "請輸入: 清除 食物名稱1 食物名稱2...";
    /// Malformed name/quantity sequence
    pub const MALFORMED_COMMAND: &str = "指令格式錯誤，請以「食物名稱 數量」的順序輸入，例如：'新增 蘋果 3 香蕉 2'";
    /// Usage for recipe search
    pub const RECIPE_USAGE: &str = "請輸入: 查詢 食材1 食材2...";
    /// Recipe search found nothing
    pub const NO_RECIPES: &str = "未找到相關食譜。";
    /// Header of the recipe search results
    pub const RECIPE_LIST_HEADER: &str = "為你找到以下食譜：";
    /// Ask for a photo
    pub const PHOTO_PROMPT: &str = "請輸入一張圖片";
    /// Photo did not contain food
    pub const PHOTO_NOT_FOOD: &str = "無法辨識圖片中的食物，請再試一次。";
    /// Unsupported message type
    pub const UNSUPPORTED_MESSAGE: &str = "無法處理此類訊息。";
    /// Generic failure reply
    pub const APOLOGY: &str = "抱歉，系統暫時無法處理你的請求，請稍後再試。";
    /// AI features are not configured
    pub const AI_UNAVAILABLE: &str = "AI 功能目前未啟用。";
    /// Recommendation without ingredients
    pub const RECOMMEND_NEEDS_FOOD: &str = "你的冰箱裡沒有食物，先新增一些食材吧！";
    /// Chat without a question
    pub const CHAT_USAGE: &str = "請輸入: 小冰 你的問題";
    /// Bind without a device id
    pub const BIND_USAGE: &str = "請輸入: 綁定 裝置編號";
    /// Bind succeeded; `{device}` is replaced
    pub const BIND_SUCCESS_TEMPLATE: &str = "已綁定冰箱裝置 {device}。";
    /// Status requested without a bound device
    pub const NO_DEVICE_BOUND: &str = "你尚未綁定冰箱裝置，請輸入: 綁定 裝置編號";
    /// Bound device has not reported yet
    pub const NO_SENSOR_DATA: &str = "冰箱裝置尚未回傳任何資料。";
    /// Buttons card title
    pub const ADD_FOOD_TITLE: &str = "新增食物";
    /// Buttons card body
    pub const ADD_FOOD_PROMPT: &str = "你想用什麼方式增加呢?";
    /// Button label for text entry
    pub const ADD_BY_TEXT_LABEL: &str = "文字輸入";
    /// Button label for photo recognition
    pub const ADD_BY_PHOTO_LABEL: &str = "圖片辨識";
    /// Help text
    pub const HELP: &str = "可用指令：\n\
新增食物：選擇新增方式\n\
新增 食物 數量：新增食材（數量選填）\n\
刪除 食物 數量：移除部分食材\n\
清除 食物：整筆移除食材\n\
查詢冰箱：列出所有食材與到期日\n\
即將過期：列出快過期的食材\n\
查詢 食材1 食材2：搜尋食譜\n\
推薦食譜：依冰箱內容推薦食譜\n\
冰箱狀態：查看溫度與濕度\n\
綁定 裝置編號：連結冰箱裝置\n\
小冰 問題：和小冰聊天";
}

/// Shared time helpers
pub mod time {
    /// Seconds per hour
    pub const SECS_PER_HOUR: i32 = 3600;
}
