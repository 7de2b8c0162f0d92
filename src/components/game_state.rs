// src/components/game_state.rs

use serde::{Deserialize, Serialize};

/// ゲームの進行状態だよ！🏆
///
/// 一人用なので「プレイ中」か「クリア済み」の 2 つだけ。
/// `Board` が 1 つだけ持ってる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
}

impl GameStatus {
    pub fn is_won(self) -> bool {
        self == GameStatus::Won
    }
}
