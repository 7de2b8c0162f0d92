//! 移動先の種類ごとにルールを振り分ける。

use crate::board::Board;
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;

use super::foundation::can_move_to_foundation;
use super::tableau::can_move_to_tableau;

/// `card_entity` を `target` に置けるか。山札と捨て札には絶対に置けない。
pub fn is_move_valid(board: &Board, card_entity: Entity, target: StackType) -> bool {
    match target {
        StackType::Tableau(index) => can_move_to_tableau(board, card_entity, index),
        StackType::Foundation(index) => can_move_to_foundation(board, card_entity, index),
        StackType::Stock | StackType::Waste => false,
    }
}
