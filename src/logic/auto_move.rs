// src/logic/auto_move.rs
//! ダブルタップでカードを組札へ自動で送るためのロジックだよ！🪄

use log::debug;

use crate::board::Board;
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;
use crate::logic::rules;

/// `card_entity` を受け入れてくれる組札を、番号の若い順に探す。
/// 見つかったらその `StackType::Foundation(index)` を返すよ。
pub fn find_automatic_foundation_move(board: &Board, card_entity: Entity) -> Option<StackType> {
    let target = StackType::foundations().find(|foundation| match foundation {
        StackType::Foundation(index) => rules::can_move_to_foundation(board, card_entity, *index),
        _ => false,
    });
    match target {
        Some(foundation) => debug!("[AutoMove] {:?} -> {}", card_entity, foundation),
        None => debug!("[AutoMove] no foundation accepts {:?}", card_entity),
    }
    target
}
