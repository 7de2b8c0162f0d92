// src/components/position.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 画面上の位置だよ。📍 `x` が left、`y` が top。
///
/// 表示専用の値で、ゲームのルールはこれを一切見ない。
/// 普段はカードが置かれたパイルから計算されて、ドラッグ中だけ仮の値になるよ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 移動量を足して、負の座標は 0 に丸める。
    pub fn translated_clamped(self, dx: f32, dy: f32) -> Self {
        Self {
            x: (self.x + dx).max(0.0),
            y: (self.y + dy).max(0.0),
        }
    }

    /// 両方の軸で `threshold` 未満の距離にいるか。
    pub fn is_near(self, other: Position, threshold: f32) -> bool {
        (self.x - other.x).abs() < threshold && (self.y - other.y).abs() < threshold
    }
}

impl Component for Position {}
