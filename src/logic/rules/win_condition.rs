//! クリア判定。

use itertools::Itertools;

use crate::board::Board;
use crate::components::card::{Card, Rank, ALL_RANKS};
use crate::components::stack::StackType;

/// 組札 1 つが A から K まで、同じスートで 1 ずつ上がって完成してるか。
pub fn is_foundation_complete(cards: &[&Card]) -> bool {
    cards.len() == ALL_RANKS.len()
        && cards.first().map_or(false, |card| card.rank == Rank::Ace)
        && cards
            .iter()
            .tuple_windows()
            .all(|(lower, upper)| {
                lower.suit == upper.suit && upper.rank.value() == lower.rank.value() + 1
            })
}

/// 4 つの組札が全部完成してたらクリア！🏆 (= 52 枚全部が組札にある)
pub fn check_win(board: &Board) -> bool {
    StackType::foundations().all(|foundation| {
        let cards: Vec<&Card> = board
            .pile(foundation)
            .cards
            .iter()
            .filter_map(|entity| board.card(*entity))
            .collect();
        is_foundation_complete(&cards)
    })
}
