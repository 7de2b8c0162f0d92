// src/config/mod.rs
//! ゲーム全体の設定。JS から JSON で一部だけ上書きできるよ。
//!
//! ```json
//! { "layout": { "drop_proximity": 40 }, "save_key": "my_save" }
//! ```
//! 書かなかった項目は `layout.rs` のデフォルト値になる。

pub mod layout;

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::components::stack::StackType;
use layout::*;

/// パイルの置き場所とドラッグ判定の設定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub stock: Position,
    pub waste: Position,
    pub foundation_start: Position,
    pub foundation_spacing: f32,
    pub tableau_start: Position,
    pub tableau_spacing: f32,
    /// 場札で 1 枚ごとにずらす縦幅。
    pub stack_offset: f32,
    /// ドロップ判定の距離。
    pub drop_proximity: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stock: Position::new(STOCK_POS_X, STOCK_POS_Y),
            waste: Position::new(WASTE_POS_X, WASTE_POS_Y),
            foundation_start: Position::new(FOUNDATION_START_X, FOUNDATION_START_Y),
            foundation_spacing: FOUNDATION_X_OFFSET,
            tableau_start: Position::new(TABLEAU_START_X, TABLEAU_START_Y),
            tableau_spacing: TABLEAU_X_OFFSET,
            stack_offset: CARD_STACK_OFFSET,
            drop_proximity: DROP_PROXIMITY,
        }
    }
}

impl LayoutConfig {
    /// パイルの基準位置 (一番下のカードが置かれる場所)。
    pub fn anchor(&self, stack_type: StackType) -> Position {
        match stack_type {
            StackType::Stock => self.stock,
            StackType::Waste => self.waste,
            StackType::Foundation(index) => Position::new(
                self.foundation_start.x + self.foundation_spacing * index as f32,
                self.foundation_start.y,
            ),
            StackType::Tableau(index) => Position::new(
                self.tableau_start.x + self.tableau_spacing * index as f32,
                self.tableau_start.y,
            ),
        }
    }

    /// パイルごとの縦のずらし幅。扇状に広げるのは場札だけ。
    pub fn fan_offset(&self, stack_type: StackType) -> f32 {
        match stack_type {
            StackType::Tableau(_) => self.stack_offset,
            StackType::Stock | StackType::Waste | StackType::Foundation(_) => 0.0,
        }
    }
}

/// 得点ルール。デフォルトはよくある Klondike の点数だよ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub waste_to_tableau: i32,
    pub waste_to_foundation: i32,
    pub tableau_to_foundation: i32,
    pub foundation_to_tableau: i32,
    pub turn_over_tableau_card: i32,
    pub recycle_waste: i32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            waste_to_tableau: 5,
            waste_to_foundation: 10,
            tableau_to_foundation: 10,
            foundation_to_tableau: -15,
            turn_over_tableau_card: 5,
            recycle_waste: -100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub layout: LayoutConfig,
    pub scoring: ScoreConfig,
    /// `BlobStore` に保存する時のキー。
    pub save_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scoring: ScoreConfig::default(),
            save_key: DEFAULT_SAVE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// JSON から読む。空文字列ならデフォルト。
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_follow_default_layout() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.anchor(StackType::Stock), Position::new(0.0, 0.0));
        assert_eq!(layout.anchor(StackType::Waste), Position::new(100.0, 0.0));
        assert_eq!(layout.anchor(StackType::Foundation(2)), Position::new(500.0, 0.0));
        assert_eq!(layout.anchor(StackType::Tableau(6)), Position::new(600.0, 150.0));
        assert_eq!(layout.fan_offset(StackType::Tableau(0)), CARD_STACK_OFFSET);
        assert_eq!(layout.fan_offset(StackType::Foundation(0)), 0.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "layout": { "drop_proximity": 45 }, "save_key": "slot-a" }"#)
            .unwrap();
        assert_eq!(config.layout.drop_proximity, 45.0);
        assert_eq!(config.layout.stack_offset, CARD_STACK_OFFSET);
        assert_eq!(config.save_key, "slot-a");
        assert_eq!(config.scoring, ScoreConfig::default());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(GameConfig::from_json("  ").unwrap(), GameConfig::default());
        assert!(GameConfig::from_json("{ nope").is_err());
    }
}
