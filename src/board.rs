// src/board.rs
//! 盤面全体 (山札・捨て札・組札 x4・場札 x7 と 52 枚のカード) を持つ `Board` だよ。
//!
//! パイルの中身 (`Pile::cards`) がカードの持ち主の唯一の正解。
//! カード側の `StackInfo` はその逆引きラベルで、どちらも `Board` の
//! メソッド経由でしか書き換えないので、ずれることはない。
//! ルール判定やドラッグ処理は `&Board` を受け取って読むだけ。
//! 盤面を書き換えるのは `systems` の中だけだよ。

use log::{debug, error};

use crate::components::card::{Card, Rank, Suit, ALL_RANKS, ALL_SUITS};
use crate::components::game_state::GameStatus;
use crate::components::position::Position;
use crate::components::stack::{Pile, StackInfo, StackType};
use crate::config::LayoutConfig;
use crate::ecs::{Entity, World};
use crate::logic::deck::create_standard_deck;

pub const DECK_SIZE: usize = 52;

pub struct Board {
    world: World,
    /// `StackType::index()` の順に 13 個。
    piles: Vec<Pile>,
    /// 52 枚のカード。スート x ランク順で固定。
    all_cards: Vec<Entity>,
    /// 描画の重なり順。後ろほど手前に描かれる。
    z_order: Vec<Entity>,
    layout: LayoutConfig,
    score: i32,
    status: GameStatus,
}

impl Board {
    /// 52 枚のカードを作って、全部裏向きで山札に積んだ盤面を作る。
    /// 実際に遊ぶ前に `DealInitialCardsSystem` で配ってね。
    pub fn new(layout: LayoutConfig) -> Self {
        let mut world = World::new();
        world.register_component::<Card>();
        world.register_component::<Position>();
        world.register_component::<StackInfo>();

        let piles = StackType::all()
            .map(|stack_type| {
                Pile::new(stack_type, layout.anchor(stack_type), layout.fan_offset(stack_type))
            })
            .collect();

        let all_cards: Vec<Entity> = create_standard_deck()
            .into_iter()
            .map(|card| {
                let entity = world.create_entity();
                world.add_component(entity, card);
                entity
            })
            .collect();

        let mut board = Board {
            world,
            piles,
            z_order: all_cards.clone(),
            all_cards,
            layout,
            score: 0,
            status: GameStatus::Playing,
        };
        let deck = board.all_cards.clone();
        board.push_cards(StackType::Stock, &deck);
        debug!(
            "Board: {} entities, {} with a Card",
            board.world.entity_count(),
            board.world.get_all_entities_with_component::<Card>().len()
        );
        board
    }

    // --- 読み取り ---

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn all_cards(&self) -> &[Entity] {
        &self.all_cards
    }

    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    pub fn pile(&self, stack_type: StackType) -> &Pile {
        &self.piles[stack_type.index()]
    }

    pub fn card(&self, entity: Entity) -> Option<&Card> {
        self.world.get_component::<Card>(entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get_component::<Position>(entity).copied()
    }

    pub fn stack_info(&self, entity: Entity) -> Option<StackInfo> {
        self.world.get_component::<StackInfo>(entity).copied()
    }

    /// `(suit, rank)` からカードのエンティティを引く。
    pub fn card_entity(&self, suit: Suit, rank: Rank) -> Option<Entity> {
        let suit_index = ALL_SUITS.iter().position(|s| *s == suit)?;
        self.all_cards
            .get(suit_index * ALL_RANKS.len() + rank.value() as usize - 1)
            .copied()
    }

    pub fn top_card(&self, stack_type: StackType) -> Option<&Card> {
        self.pile(stack_type).top().and_then(|entity| self.card(entity))
    }

    pub fn is_face_up(&self, entity: Entity) -> bool {
        self.card(entity).map_or(false, |card| card.is_face_up)
    }

    pub fn z_order(&self) -> &[Entity] {
        &self.z_order
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 全パイルにあるカードの合計枚数。常に 52 のはず。
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    // --- 書き換え (systems と drag からだけ使う) ---

    /// パイルの `from` 番目から上を全部取り外して返す。
    pub(crate) fn take_from(&mut self, stack_type: StackType, from: usize) -> Vec<Entity> {
        let pile = &mut self.piles[stack_type.index()];
        if from >= pile.cards.len() {
            return Vec::new();
        }
        pile.cards.split_off(from)
    }

    /// カードを順番にパイルの上に積む。逆引きラベルと位置もここで更新する。
    pub(crate) fn push_cards(&mut self, stack_type: StackType, cards: &[Entity]) {
        for &entity in cards {
            let pile = &mut self.piles[stack_type.index()];
            let index = pile.cards.len();
            let position = pile.card_position(index);
            pile.cards.push(entity);
            self.world.add_component(entity, StackInfo::new(stack_type, index));
            self.world.add_component(entity, position);
        }
    }

    /// 全パイルを空にして、渡された並びで積み直す。
    /// `assignments` は 52 枚を過不足なく含んでいること (呼ぶ側が検証する)。
    pub(crate) fn rebuild(&mut self, assignments: &[(StackType, Vec<Entity>)]) {
        for pile in self.piles.iter_mut() {
            pile.cards.clear();
        }
        for (stack_type, cards) in assignments {
            self.push_cards(*stack_type, cards);
        }
        if self.card_count() != DECK_SIZE {
            error!("Board: rebuild produced {} cards instead of {}", self.card_count(), DECK_SIZE);
            debug_assert_eq!(self.card_count(), DECK_SIZE);
        }
        self.z_order = self
            .piles
            .iter()
            .flat_map(|pile| pile.cards.iter().copied())
            .collect();
    }

    /// 表裏を変える。実際に変わったら `true`。
    pub(crate) fn set_face_up(&mut self, entity: Entity, face_up: bool) -> bool {
        match self.world.get_component_mut::<Card>(entity) {
            Some(card) if card.is_face_up != face_up => {
                card.is_face_up = face_up;
                true
            }
            Some(_) => false,
            None => {
                error!("Board: entity {:?} has no Card component", entity);
                false
            }
        }
    }

    /// 表示位置だけを変える (ドラッグ中の仮の位置など)。
    pub(crate) fn set_position(&mut self, entity: Entity, position: Position) {
        self.world.add_component(entity, position);
    }

    /// パイルのカード全部を、パイルから計算した位置に戻す。
    pub(crate) fn refresh_positions(&mut self, stack_type: StackType) {
        let pile = &self.piles[stack_type.index()];
        let placements: Vec<(Entity, Position)> = pile
            .cards
            .iter()
            .enumerate()
            .map(|(i, entity)| (*entity, pile.card_position(i)))
            .collect();
        for (entity, position) in placements {
            self.world.add_component(entity, position);
        }
    }

    /// カードを描画順の一番手前に持ってくる (並びは保ったまま)。
    pub(crate) fn raise_to_top(&mut self, cards: &[Entity]) {
        self.z_order.retain(|entity| !cards.contains(entity));
        self.z_order.extend_from_slice(cards);
    }

    /// 点数を足す。0 未満にはならない。実際に変わった量を返す。
    pub(crate) fn add_score(&mut self, delta: i32) -> i32 {
        let before = self.score;
        self.score = (self.score + delta).max(0);
        self.score - before
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = score.max(0);
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            debug!("Board: status {:?} -> {:?}", self.status, status);
        }
        self.status = status;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! テスト用に盤面を好きな形で組み立てるヘルパー。

    use super::*;

    /// 指定したパイルに指定したカードを置いて、残りは全部山札 (裏向き) に入れる。
    /// `(suit, rank, face_up)` の順で下から積むよ。
    pub fn board_with(layout: &[(StackType, Vec<(Suit, Rank, bool)>)]) -> Board {
        board_with_layout(LayoutConfig::default(), layout)
    }

    /// `board_with` と同じだけど、パイルの配置を自分で決める。
    pub fn board_with_layout(config: LayoutConfig, layout: &[(StackType, Vec<(Suit, Rank, bool)>)]) -> Board {
        let mut board = Board::new(config);
        let mut assignments: Vec<(StackType, Vec<Entity>)> = Vec::new();
        let mut used = Vec::new();
        let mut face_up = Vec::new();
        for (stack_type, cards) in layout {
            let entities: Vec<Entity> = cards
                .iter()
                .map(|(suit, rank, up)| {
                    let entity = board.card_entity(*suit, *rank).unwrap();
                    face_up.push((entity, *up));
                    entity
                })
                .collect();
            used.extend(entities.iter().copied());
            assignments.push((*stack_type, entities));
        }
        let rest: Vec<Entity> = board
            .all_cards()
            .iter()
            .copied()
            .filter(|entity| !used.contains(entity))
            .collect();
        let stock_index = assignments.iter().position(|(s, _)| *s == StackType::Stock);
        match stock_index {
            Some(i) => {
                let mut stock = rest.clone();
                stock.extend(assignments[i].1.iter().copied());
                assignments[i].1 = stock;
            }
            None => assignments.push((StackType::Stock, rest.clone())),
        }
        board.rebuild(&assignments);
        for entity in board.all_cards().to_vec() {
            board.set_face_up(entity, false);
        }
        for (entity, up) in face_up {
            board.set_face_up(entity, up);
        }
        board
    }

    pub fn entity(board: &Board, suit: Suit, rank: Rank) -> Entity {
        board.card_entity(suit, rank).unwrap()
    }
}
