// src/systems/deal_system.rs

use log::{error, info};

use crate::board::{Board, DECK_SIZE};
use crate::components::game_state::GameStatus;
use crate::components::stack::{StackType, TABLEAU_COUNT};
use crate::ecs::entity::Entity;
use crate::logic::deck::{shuffle_deck_random, shuffle_deck_seeded};
use crate::systems::System;

/// 初期カード配置システム！🃏
///
/// 52 枚をシャッフルして、クロンダイクのルールで配るよ。
///
/// * 場札: 1 周目で 0..6 列に 1 枚ずつ、2 周目で 1..6 列に 1 枚ずつ…と三角形に配る。
///   `i` 列目は `i + 1` 枚になって、一番上だけ表向き。
/// * 山札: 残りの 24 枚を全部裏向きで。並びはシャッフル順のまま (最後が一番上)。
/// * 捨て札と組札は空っぽ、点数は 0、ステータスは Playing に戻る。
///
/// `seed` を指定すると毎回同じ配り方になる (テストやデイリーチャレンジ用)。
#[derive(Debug, Default, Clone)]
pub struct DealInitialCardsSystem {
    seed: Option<u64>,
}

impl DealInitialCardsSystem {
    /// 毎回ランダムに配るシステム。
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// 同じシードなら毎回同じ配り方をするシステム。
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// シャッフルして配る。
    pub fn deal(&self, board: &mut Board) {
        let mut order = board.all_cards().to_vec();
        match self.seed {
            Some(seed) => shuffle_deck_seeded(&mut order, seed),
            None => shuffle_deck_random(&mut order),
        }
        Self::deal_with_order(board, &order);
    }

    /// 指定した並び (`order`) のとおりに配る。シャッフルはしない。
    ///
    /// `order` は盤面の 52 枚をちょうど 1 回ずつ含んでないとダメ。
    /// そうじゃなければ何もしないで `false` を返す。
    pub fn deal_with_order(board: &mut Board, order: &[Entity]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort();
        let mut expected = board.all_cards().to_vec();
        expected.sort();
        if order.len() != DECK_SIZE || sorted != expected {
            error!("DealInitialCardsSystem: order is not a permutation of the deck ({} cards)", order.len());
            debug_assert!(false, "deal order must be a permutation of the 52 cards");
            return false;
        }

        let mut tableaus: Vec<Vec<Entity>> = vec![Vec::new(); TABLEAU_COUNT as usize];
        let mut cards = order.iter().copied();
        for round in 0..TABLEAU_COUNT as usize {
            for pile in tableaus.iter_mut().skip(round) {
                if let Some(card) = cards.next() {
                    pile.push(card);
                }
            }
        }
        let stock: Vec<Entity> = cards.collect();

        let mut assignments: Vec<(StackType, Vec<Entity>)> = vec![(StackType::Stock, stock)];
        assignments.extend(StackType::tableaus().zip(tableaus));
        board.rebuild(&assignments);

        for entity in board.all_cards().to_vec() {
            board.set_face_up(entity, false);
        }
        for tableau in StackType::tableaus() {
            if let Some(top) = board.pile(tableau).top() {
                board.set_face_up(top, true);
            }
        }
        board.set_score(0);
        board.set_status(GameStatus::Playing);

        info!(
            "DealInitialCardsSystem: dealt {} cards ({} left in stock)",
            DECK_SIZE,
            board.pile(StackType::Stock).len()
        );
        true
    }
}

impl System for DealInitialCardsSystem {
    fn run(&mut self, board: &mut Board) {
        self.deal(board);
    }
}
