// src/components/dragging_info.rs

use crate::components::position::Position;
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;

/// ドラッグ中のカードの束 (run) についての情報だよ！🖱️🃏
///
/// ドラッグ中もカードは元のパイルに所属したまま。
/// ここに持ってるのは「どれを持ち上げてるか」と「今どこに見えてるか」だけ。
#[derive(Clone, Debug, PartialEq)]
pub struct DraggingInfo {
    /// 持ち上げたカード。先頭 (`run[0]`) がつかんだカード。
    pub run: Vec<Entity>,
    /// 持ち上げる前にいたパイル。
    pub origin: StackType,
    /// 先頭カードの今の (仮の) 位置。
    pub leader_position: Position,
    /// run のメンバーを縦にずらす幅 (場札から持ち上げた時だけ 0 じゃない)。
    pub member_offset: f32,
}

impl DraggingInfo {
    /// つかんだカード。
    pub fn leader(&self) -> Entity {
        self.run[0]
    }

    pub fn is_single_card(&self) -> bool {
        self.run.len() == 1
    }

    /// run の `i` 番目が今いるべき位置。
    pub fn member_position(&self, i: usize) -> Position {
        Position::new(
            self.leader_position.x,
            self.leader_position.y + self.member_offset * i as f32,
        )
    }
}
