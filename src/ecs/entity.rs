// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// ゲームに登場する「モノ」を表す ID だよ。
///
/// このクレートではカード 1 枚 1 枚がエンティティになる。
/// 52 枚ぶんの ID は `Board` を作った時に一度だけ発行されて、
/// 配り直しや undo、ロードの後もずっと同じ ID を使い回すよ。
/// だから JS 側から `card_id` として渡ってくる数字もこの中身そのまま！
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity(pub usize);

impl Entity {
    /// 中身の ID を取り出す。
    pub fn id(self) -> usize {
        self.0
    }
}
