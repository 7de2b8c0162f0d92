//! 組札 (Foundation) へのカード移動ルール。

use log::trace;

use crate::board::Board;
use crate::components::card::{Card, Rank};
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;

/// 組札の一番上 (`foundation_top`) に `card` を置けるか。
///
/// * 空の組札には A だけ。どのスートの A でもいい。
/// * それ以外は同じスートで、ちょうど 1 つ上のランクだけ。
pub fn legal_foundation_move(card: &Card, foundation_top: Option<&Card>) -> bool {
    match foundation_top {
        None => card.rank == Rank::Ace,
        Some(top) => card.suit == top.suit && card.rank.value() == top.rank.value() + 1,
    }
}

/// 盤面上のカードを `Foundation(index)` に置けるか。
pub fn can_move_to_foundation(board: &Board, card_entity: Entity, index: u8) -> bool {
    let Some(card) = board.card(card_entity) else {
        trace!("[Foundation Rule] {:?} is not a card", card_entity);
        return false;
    };
    let top = board.top_card(StackType::Foundation(index));
    let legal = legal_foundation_move(card, top);
    trace!(
        "[Foundation Rule] {:?} {:?} onto foundation{} (top {:?}) -> {}",
        card.rank, card.suit, index, top.map(|t| (t.rank, t.suit)), legal
    );
    legal
}
