//! 場札 (Tableau) へのカード移動ルール。

use log::trace;

use super::common::CardColor;
use crate::board::Board;
use crate::components::card::{Card, Rank};
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;

/// 場札の一番上 (`tableau_top`) に `card` を置けるか。
///
/// * 空の列には K だけ。
/// * それ以外は、色が違って、ランクがちょうど 1 つ下で、しかも一番上が表向きの時だけ。
pub fn legal_tableau_move(card: &Card, tableau_top: Option<&Card>) -> bool {
    match tableau_top {
        None => card.rank == Rank::King,
        Some(top) => {
            CardColor::from_suit(card.suit) != CardColor::from_suit(top.suit)
                && top.rank.value() == card.rank.value() + 1
                && top.is_face_up
        }
    }
}

/// 盤面上のカードを `Tableau(index)` に置けるか。
/// run を動かす時は先頭のカードで聞けば OK (下の並びは見ない)。
pub fn can_move_to_tableau(board: &Board, card_entity: Entity, index: u8) -> bool {
    let Some(card) = board.card(card_entity) else {
        trace!("[Tableau Rule] {:?} is not a card", card_entity);
        return false;
    };
    let top = board.top_card(StackType::Tableau(index));
    let legal = legal_tableau_move(card, top);
    trace!(
        "[Tableau Rule] {:?} {:?} onto tableau{} (top {:?}) -> {}",
        card.rank, card.suit, index, top.map(|t| (t.rank, t.suit, t.is_face_up)), legal
    );
    legal
}
