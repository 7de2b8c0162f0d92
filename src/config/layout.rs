// src/config/layout.rs
//! 盤面レイアウトのデフォルト値だよ！
//! 座標は全部「左上が原点、右と下が正」。

/// 場札 (Tableau) で 1 枚ごとにずらす縦の幅。
pub const CARD_STACK_OFFSET: f32 = 20.0;
/// ドロップ先として認める距離 (縦横それぞれこれ未満)。
pub const DROP_PROXIMITY: f32 = 30.0;

pub const STOCK_POS_X: f32 = 0.0;
pub const STOCK_POS_Y: f32 = 0.0;

pub const WASTE_POS_X: f32 = 100.0;
pub const WASTE_POS_Y: f32 = 0.0;

pub const FOUNDATION_START_X: f32 = 300.0;
pub const FOUNDATION_START_Y: f32 = 0.0;
pub const FOUNDATION_X_OFFSET: f32 = 100.0;

pub const TABLEAU_START_X: f32 = 0.0;
pub const TABLEAU_START_Y: f32 = 150.0;
pub const TABLEAU_X_OFFSET: f32 = 100.0;

/// セーブデータを置くキー。
pub const DEFAULT_SAVE_KEY: &str = "klondike_save";
