// src/systems/move_card_system.rs

use log::{debug, error};

use crate::board::Board;
use crate::components::stack::StackType;
use crate::config::ScoreConfig;
use crate::ecs::entity::Entity;
use crate::logic::scoring;
use crate::protocol::Notification;

/// カード移動を確定させるシステムだよ！🖱️💨
///
/// ルールのチェックはドラッグ処理 (`DragController`) やダブルタップ側で済んでる前提。
/// ここでは「持ち上げた束が本当に元のパイルの一番上の部分か」だけを確かめて、
/// パイルの中身・逆引きラベル・表示位置・重なり順・点数をまとめて更新する。
#[derive(Debug, Clone, Default)]
pub struct MoveCardSystem {
    scoring: ScoreConfig,
}

impl MoveCardSystem {
    pub fn new(scoring: ScoreConfig) -> Self {
        Self { scoring }
    }

    /// `run` を `target` の上に移す。
    ///
    /// `run` は元のパイルの一番上から連続した束 (先頭が一番下) じゃないとダメ。
    /// 違ったら壊れた状態なので、デバッグビルドでは panic、リリースでは
    /// エラーログだけ出して何もしない。
    pub fn commit(&self, board: &mut Board, run: &[Entity], target: StackType) -> Vec<Notification> {
        let Some(origin) = Self::origin_of_suffix(board, run) else {
            error!("MoveCardSystem: {:?} is not the top run of its pile", run);
            debug_assert!(false, "moved cards must be the top run of their pile");
            return Vec::new();
        };
        if origin == target {
            error!("MoveCardSystem: {:?} already lives in {}", run, target);
            debug_assert!(false, "move target must differ from the origin pile");
            return Vec::new();
        }

        let from = board.pile(origin).len() - run.len();
        let moved = board.take_from(origin, from);
        board.push_cards(target, &moved);

        let mut notifications = Vec::with_capacity(moved.len() + 1);
        for &entity in &moved {
            notifications.push(Notification::CardMoved { card_id: entity, from: origin, to: target });
            if board.set_face_up(entity, true) {
                notifications.push(Notification::CardFlipped { card_id: entity, face_up: true });
            }
        }
        board.raise_to_top(&moved);

        let applied = board.add_score(scoring::move_score(&self.scoring, origin, target));
        if applied != 0 {
            notifications.push(Notification::ScoreChanged { delta: applied });
        }
        debug!("MoveCardSystem: moved {} card(s) {} -> {}", moved.len(), origin, target);
        notifications
    }

    /// 場札の一番上にある裏向きのカードを表にする (タップ用)。
    /// 一番上じゃない、場札じゃない、もう表向き…なら何もしない。
    pub fn flip_tableau_top(&self, board: &mut Board, entity: Entity) -> Vec<Notification> {
        let Some(info) = board.stack_info(entity) else {
            return Vec::new();
        };
        if !info.stack_type.is_tableau() || board.pile(info.stack_type).top() != Some(entity) {
            return Vec::new();
        }
        if !board.set_face_up(entity, true) {
            return Vec::new();
        }
        let mut notifications = vec![Notification::CardFlipped { card_id: entity, face_up: true }];
        let applied = board.add_score(scoring::flip_score(&self.scoring));
        if applied != 0 {
            notifications.push(Notification::ScoreChanged { delta: applied });
        }
        debug!("MoveCardSystem: turned over {:?} on {}", entity, info.stack_type);
        notifications
    }

    /// `run` がどこかのパイルの一番上の部分とぴったり一致してたら、そのパイルを返す。
    fn origin_of_suffix(board: &Board, run: &[Entity]) -> Option<StackType> {
        let leader = *run.first()?;
        let origin = board.stack_info(leader)?.stack_type;
        let cards = &board.pile(origin).cards;
        if cards.len() < run.len() {
            return None;
        }
        (cards[cards.len() - run.len()..] == *run).then_some(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{board_with, entity};
    use crate::board::DECK_SIZE;
    use crate::components::card::{Rank, Suit};
    use crate::components::stack::StackInfo;

    #[test]
    fn commit_moves_a_run_and_keeps_order() {
        let mut board = board_with(&[
            (
                StackType::Tableau(0),
                vec![
                    (Suit::Club, Rank::Four, false),
                    (Suit::Spade, Rank::Nine, true),
                    (Suit::Heart, Rank::Eight, true),
                ],
            ),
            (StackType::Tableau(3), vec![(Suit::Diamond, Rank::Ten, true)]),
        ]);
        let nine = entity(&board, Suit::Spade, Rank::Nine);
        let eight = entity(&board, Suit::Heart, Rank::Eight);
        let system = MoveCardSystem::default();

        let notes = system.commit(&mut board, &[nine, eight], StackType::Tableau(3));

        let target = board.pile(StackType::Tableau(3));
        assert_eq!(target.cards[1..], [nine, eight]);
        assert_eq!(board.pile(StackType::Tableau(0)).len(), 1);
        assert_eq!(board.stack_info(eight), Some(StackInfo::new(StackType::Tableau(3), 2)));
        assert_eq!(board.position(eight), Some(target.card_position(2)));
        assert_eq!(&board.z_order()[DECK_SIZE - 2..], &[nine, eight]);
        assert_eq!(board.card_count(), DECK_SIZE);
        assert_eq!(
            notes,
            vec![
                Notification::CardMoved { card_id: nine, from: StackType::Tableau(0), to: StackType::Tableau(3) },
                Notification::CardMoved { card_id: eight, from: StackType::Tableau(0), to: StackType::Tableau(3) },
            ]
        );
        assert_eq!(board.score(), 0, "場札同士の移動は 0 点");
    }

    #[test]
    fn commit_applies_score() {
        let mut board = board_with(&[(StackType::Waste, vec![(Suit::Club, Rank::Ace, true)])]);
        let ace = entity(&board, Suit::Club, Rank::Ace);
        let notes = MoveCardSystem::default().commit(&mut board, &[ace], StackType::Foundation(0));
        assert_eq!(board.score(), 10);
        assert_eq!(notes.last(), Some(&Notification::ScoreChanged { delta: 10 }));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "top run")]
    fn commit_rejects_cards_that_are_not_on_top() {
        let mut board = board_with(&[(
            StackType::Tableau(0),
            vec![(Suit::Spade, Rank::Nine, true), (Suit::Heart, Rank::Eight, true)],
        )]);
        let nine = entity(&board, Suit::Spade, Rank::Nine);
        MoveCardSystem::default().commit(&mut board, &[nine], StackType::Tableau(1));
    }

    #[test]
    fn flip_only_turns_the_top_face_down_card() {
        let mut board = board_with(&[(
            StackType::Tableau(2),
            vec![(Suit::Club, Rank::Two, false), (Suit::Heart, Rank::Five, false)],
        )]);
        let two = entity(&board, Suit::Club, Rank::Two);
        let five = entity(&board, Suit::Heart, Rank::Five);
        let system = MoveCardSystem::default();

        assert!(system.flip_tableau_top(&mut board, two).is_empty(), "一番上じゃない");
        let notes = system.flip_tableau_top(&mut board, five);
        assert!(board.is_face_up(five));
        assert_eq!(
            notes,
            vec![
                Notification::CardFlipped { card_id: five, face_up: true },
                Notification::ScoreChanged { delta: 5 },
            ]
        );
        assert!(system.flip_tableau_top(&mut board, five).is_empty(), "もう表向き");
    }

    #[test]
    fn flip_ignores_non_tableau_cards() {
        let mut board = board_with(&[]);
        let top = board.pile(StackType::Stock).top().unwrap();
        assert!(MoveCardSystem::default().flip_tableau_top(&mut board, top).is_empty());
        assert!(!board.is_face_up(top));
    }
}
