// src/app/drag_handler.rs
//! カードのドラッグ (開始・移動・終了) を扱うよ。🖱️
//!
//! ドラッグ中に動かすのは表示位置と重なり順だけ。
//! どのパイルに入ってるかは一切触らないで、ドロップ先が決まったら
//! `DropResolution` を返して、実際の移動はセッションが `MoveCardSystem` に頼む。

use log::{debug, info, warn};

use crate::board::Board;
use crate::components::{DraggingInfo, StackType};
use crate::ecs::entity::Entity;
use crate::logic::rules;

/// ドロップした結果。
#[derive(Debug, Clone, PartialEq)]
pub enum DropResolution {
    /// `target` に置ける。まだ何も動かしてないので、コミットは呼ぶ側で。
    Legal { run: Vec<Entity>, origin: StackType, target: StackType },
    /// 置ける場所がなかった。カードはもう元の位置に戻してあるよ。
    Bounced { run: Vec<Entity>, origin: StackType },
}

/// 1 回のジェスチャーの状態。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DraggingInfo),
}

/// ドラッグのステートマシン。`Idle -> Dragging -> (ドロップ) -> Idle`。
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// `card` をつかむ。つかめたら `true`。
    ///
    /// 裏向きのカード・山札のカード・動かせない位置のカードはつかめない。
    /// すでに何かをドラッグ中なら無視するよ。
    pub fn start(&mut self, board: &mut Board, card: Entity) -> bool {
        if self.is_dragging() {
            debug!("DragController: already dragging, ignoring start on {:?}", card);
            return false;
        }
        let Some(run) = draggable_run(board, card) else {
            debug!("DragController: {:?} cannot be dragged", card);
            return false;
        };
        let (Some(info), Some(leader_position)) = (board.stack_info(card), board.position(card)) else {
            warn!("DragController: {:?} has no placement", card);
            return false;
        };
        let member_offset = match info.stack_type {
            StackType::Tableau(_) => board.layout().stack_offset,
            _ => 0.0,
        };
        board.raise_to_top(&run);
        info!("DragController: picked up {} card(s) from {}", run.len(), info.stack_type);
        self.state = DragState::Dragging(DraggingInfo {
            run,
            origin: info.stack_type,
            leader_position,
            member_offset,
        });
        true
    }

    /// ドラッグ中の束を `(delta_x, delta_y)` だけ動かす。座標は 0 未満にならない。
    pub fn update(&mut self, board: &mut Board, card: Entity, delta_x: f32, delta_y: f32) -> bool {
        let DragState::Dragging(info) = &mut self.state else {
            return false;
        };
        if info.leader() != card {
            warn!("DragController: update for {:?} while dragging {:?}", card, info.leader());
            return false;
        }
        info.leader_position = info.leader_position.translated_clamped(delta_x, delta_y);
        for (i, entity) in info.run.iter().enumerate() {
            board.set_position(*entity, info.member_position(i));
        }
        true
    }

    /// 手を離した。置ける場所を探して結果を返す。ドラッグ中じゃなければ `None`。
    pub fn end(&mut self, board: &mut Board, card: Entity) -> Option<DropResolution> {
        match &self.state {
            DragState::Dragging(info) if info.leader() == card => {}
            DragState::Dragging(info) => {
                warn!("DragController: end for {:?} while dragging {:?}", card, info.leader());
                return None;
            }
            DragState::Idle => return None,
        }
        let DragState::Dragging(info) = std::mem::take(&mut self.state) else {
            return None;
        };

        match resolve_drop(board, &info) {
            Some(target) => {
                info!("DragController: drop {:?} on {}", info.leader(), target);
                Some(DropResolution::Legal { run: info.run, origin: info.origin, target })
            }
            None => {
                debug!("DragController: no target for {:?}, bouncing back", info.leader());
                board.refresh_positions(info.origin);
                Some(DropResolution::Bounced { run: info.run, origin: info.origin })
            }
        }
    }

    /// ドラッグを途中でやめる (リスタートや Undo が割り込んだ時)。
    pub fn cancel(&mut self, board: &mut Board) {
        if let DragState::Dragging(info) = std::mem::take(&mut self.state) {
            board.refresh_positions(info.origin);
        }
    }
}

/// `card` をつかんだら一緒に持ち上がる束。つかめないなら `None`。
///
/// * 場札: つかんだカードから一番上まで全部。
/// * 捨て札・組札: 一番上のカード 1 枚だけ。
/// * 山札: つかめない。
pub fn draggable_run(board: &Board, card: Entity) -> Option<Vec<Entity>> {
    if !board.is_face_up(card) {
        return None;
    }
    let info = board.stack_info(card)?;
    let pile = board.pile(info.stack_type);
    let index = pile.index_of(card)?;
    match info.stack_type {
        StackType::Tableau(_) => Some(pile.cards[index..].to_vec()),
        StackType::Waste | StackType::Foundation(_) => (pile.top() == Some(card)).then(|| vec![card]),
        StackType::Stock => None,
    }
}

/// ドロップ先を探す。
///
/// 1. 場札 (元の列以外) を順番に見て、次のカードが来る位置が近くて、先頭カードを置けるもの。
/// 2. 1 枚だけの時は、組札を順番に見て、近くて置けるもの。
///
/// 最初に見つかったものが勝ち。
pub fn resolve_drop(board: &Board, info: &DraggingInfo) -> Option<StackType> {
    let proximity = board.layout().drop_proximity;
    let leader = info.leader();
    let near = |stack_type: StackType| {
        info.leader_position.is_near(board.pile(stack_type).next_card_position(), proximity)
    };
    let accepts = |stack_type: StackType| {
        stack_type != info.origin && near(stack_type) && rules::is_move_valid(board, leader, stack_type)
    };

    let tableau = StackType::tableaus().find(|&stack_type| accepts(stack_type));
    if tableau.is_some() || !info.is_single_card() {
        return tableau;
    }
    StackType::foundations().find(|&stack_type| accepts(stack_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{board_with, board_with_layout, entity};
    use crate::components::card::{Rank, Suit};
    use crate::components::position::Position;
    use crate::config::LayoutConfig;

    /// 先頭カードが `target` の次の位置に来るような移動量。
    fn delta_to(board: &Board, card: Entity, target: StackType) -> (f32, f32) {
        let from = board.position(card).unwrap();
        let to = board.pile(target).next_card_position();
        (to.x - from.x, to.y - from.y)
    }

    #[test]
    fn face_down_card_cannot_be_dragged() {
        let mut board = board_with(&[(
            StackType::Tableau(3),
            vec![(Suit::Club, Rank::Four, false), (Suit::Heart, Rank::Three, true)],
        )]);
        let four = entity(&board, Suit::Club, Rank::Four);
        assert_eq!(draggable_run(&board, four), None);

        let mut drag = DragController::new();
        assert!(!drag.start(&mut board, four));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn runs_follow_the_pile_kind() {
        let board = board_with(&[
            (
                StackType::Tableau(0),
                vec![(Suit::Spade, Rank::Nine, true), (Suit::Heart, Rank::Eight, true), (Suit::Club, Rank::Seven, true)],
            ),
            (StackType::Waste, vec![(Suit::Diamond, Rank::Two, true), (Suit::Diamond, Rank::Five, true)]),
            (StackType::Foundation(0), vec![(Suit::Heart, Rank::Ace, true), (Suit::Heart, Rank::Two, true)]),
        ]);
        let nine = entity(&board, Suit::Spade, Rank::Nine);
        let eight = entity(&board, Suit::Heart, Rank::Eight);
        let seven = entity(&board, Suit::Club, Rank::Seven);
        assert_eq!(draggable_run(&board, eight), Some(vec![eight, seven]));
        assert_eq!(draggable_run(&board, nine).map(|run| run.len()), Some(3));

        let buried_waste = entity(&board, Suit::Diamond, Rank::Two);
        let waste_top = entity(&board, Suit::Diamond, Rank::Five);
        assert_eq!(draggable_run(&board, buried_waste), None);
        assert_eq!(draggable_run(&board, waste_top), Some(vec![waste_top]));

        let heart_ace = entity(&board, Suit::Heart, Rank::Ace);
        let heart_two = entity(&board, Suit::Heart, Rank::Two);
        assert_eq!(draggable_run(&board, heart_ace), None);
        assert_eq!(draggable_run(&board, heart_two), Some(vec![heart_two]));

        let stock_top = board.pile(StackType::Stock).top().unwrap();
        assert_eq!(draggable_run(&board, stock_top), None);
    }

    #[test]
    fn update_moves_the_whole_run_and_clamps() {
        let mut board = board_with(&[(
            StackType::Tableau(0),
            vec![(Suit::Spade, Rank::Nine, true), (Suit::Heart, Rank::Eight, true)],
        )]);
        let nine = entity(&board, Suit::Spade, Rank::Nine);
        let eight = entity(&board, Suit::Heart, Rank::Eight);
        let mut drag = DragController::new();
        assert!(drag.start(&mut board, nine));
        assert_eq!(&board.z_order()[board.z_order().len() - 2..], &[nine, eight]);
        assert!(!drag.start(&mut board, eight), "2 つ目のドラッグは無視");

        assert!(drag.update(&mut board, nine, 30.0, 10.0));
        assert_eq!(board.position(nine), Some(Position::new(30.0, 160.0)));
        assert_eq!(board.position(eight), Some(Position::new(30.0, 180.0)));

        drag.update(&mut board, nine, -500.0, -500.0);
        assert_eq!(board.position(nine), Some(Position::new(0.0, 0.0)));
        assert_eq!(board.position(eight), Some(Position::new(0.0, 20.0)));
        assert!(!drag.update(&mut board, eight, 1.0, 1.0), "先頭以外の id は無視");
    }

    #[test]
    fn drop_near_legal_tableau_is_accepted() {
        let mut board = board_with(&[
            (StackType::Tableau(0), vec![(Suit::Heart, Rank::Seven, true)]),
            (StackType::Tableau(4), vec![(Suit::Spade, Rank::Eight, true)]),
        ]);
        let seven = entity(&board, Suit::Heart, Rank::Seven);
        let (dx, dy) = delta_to(&board, seven, StackType::Tableau(4));
        let mut drag = DragController::new();
        drag.start(&mut board, seven);
        drag.update(&mut board, seven, dx + 10.0, dy - 10.0);

        assert_eq!(
            drag.end(&mut board, seven),
            Some(DropResolution::Legal {
                run: vec![seven],
                origin: StackType::Tableau(0),
                target: StackType::Tableau(4),
            })
        );
        assert!(!drag.is_dragging());
        assert_eq!(board.pile(StackType::Tableau(0)).cards, vec![seven], "コントローラーはパイルを触らない");
    }

    #[test]
    fn illegal_drop_bounces_back_to_layout_positions() {
        let mut board = board_with(&[
            (StackType::Tableau(0), vec![(Suit::Heart, Rank::Seven, true), (Suit::Spade, Rank::Six, true)]),
            (StackType::Tableau(4), vec![(Suit::Diamond, Rank::Eight, true)]),
        ]);
        let seven = entity(&board, Suit::Heart, Rank::Seven);
        let six = entity(&board, Suit::Spade, Rank::Six);
        let home = (board.position(seven).unwrap(), board.position(six).unwrap());
        let (dx, dy) = delta_to(&board, seven, StackType::Tableau(4));
        let mut drag = DragController::new();
        drag.start(&mut board, seven);
        drag.update(&mut board, seven, dx, dy);

        assert_eq!(
            drag.end(&mut board, seven),
            Some(DropResolution::Bounced { run: vec![seven, six], origin: StackType::Tableau(0) })
        );
        assert_eq!((board.position(seven).unwrap(), board.position(six).unwrap()), home);
    }

    #[test]
    fn drop_out_of_range_bounces() {
        let mut board = board_with(&[
            (StackType::Tableau(0), vec![(Suit::Heart, Rank::Seven, true)]),
            (StackType::Tableau(4), vec![(Suit::Spade, Rank::Eight, true)]),
        ]);
        let seven = entity(&board, Suit::Heart, Rank::Seven);
        let (dx, dy) = delta_to(&board, seven, StackType::Tableau(4));
        let mut drag = DragController::new();
        drag.start(&mut board, seven);
        drag.update(&mut board, seven, dx + 30.0, dy);
        assert!(matches!(drag.end(&mut board, seven), Some(DropResolution::Bounced { .. })));
    }

    #[test]
    fn foundation_only_takes_single_cards() {
        let mut board = board_with(&[
            (StackType::Foundation(1), vec![(Suit::Club, Rank::Ace, true)]),
            (StackType::Tableau(2), vec![(Suit::Club, Rank::Two, true), (Suit::Heart, Rank::Ace, true)]),
        ]);
        let club_two = entity(&board, Suit::Club, Rank::Two);
        let heart_ace = entity(&board, Suit::Heart, Rank::Ace);
        let mut drag = DragController::new();

        let (dx, dy) = delta_to(&board, club_two, StackType::Foundation(1));
        drag.start(&mut board, club_two);
        drag.update(&mut board, club_two, dx, dy);
        assert!(matches!(drag.end(&mut board, club_two), Some(DropResolution::Bounced { .. })));

        let (dx, dy) = delta_to(&board, heart_ace, StackType::Foundation(0));
        drag.start(&mut board, heart_ace);
        drag.update(&mut board, heart_ace, dx, dy);
        assert_eq!(
            drag.end(&mut board, heart_ace),
            Some(DropResolution::Legal {
                run: vec![heart_ace],
                origin: StackType::Tableau(2),
                target: StackType::Foundation(0),
            })
        );
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut board = board_with(&[]);
        let mut drag = DragController::new();
        assert_eq!(drag.end(&mut board, Entity(0)), None);
    }

    #[test]
    fn cancel_restores_positions() {
        let mut board = board_with(&[(StackType::Waste, vec![(Suit::Club, Rank::Nine, true)])]);
        let nine = entity(&board, Suit::Club, Rank::Nine);
        let home = board.position(nine).unwrap();
        let mut drag = DragController::new();
        drag.start(&mut board, nine);
        drag.update(&mut board, nine, 55.0, 70.0);
        drag.cancel(&mut board);
        assert!(!drag.is_dragging());
        assert_eq!(board.position(nine), Some(home));
    }

    #[test]
    fn overlapping_tableaus_pick_the_lowest_index() {
        let layout = LayoutConfig { tableau_spacing: 10.0, ..LayoutConfig::default() };
        let mut board = board_with_layout(
            layout,
            &[
                (StackType::Waste, vec![(Suit::Heart, Rank::Seven, true)]),
                (StackType::Tableau(1), vec![(Suit::Spade, Rank::Eight, true)]),
                (StackType::Tableau(2), vec![(Suit::Club, Rank::Eight, true)]),
            ],
        );
        let seven = entity(&board, Suit::Heart, Rank::Seven);
        // tableau1 の次の位置は (10, 170)、tableau2 は (20, 170)。その真ん中に落とす
        let from = board.position(seven).unwrap();
        let mut drag = DragController::new();
        assert!(drag.start(&mut board, seven));
        drag.update(&mut board, seven, 15.0 - from.x, 170.0 - from.y);

        assert_eq!(
            drag.end(&mut board, seven),
            Some(DropResolution::Legal { run: vec![seven], origin: StackType::Waste, target: StackType::Tableau(1) })
        );
    }

    #[test]
    fn tableau_wins_over_foundation_at_the_same_spot() {
        let layout = LayoutConfig { foundation_start: Position::new(400.0, 170.0), ..LayoutConfig::default() };
        let mut board = board_with_layout(
            layout,
            &[
                (StackType::Waste, vec![(Suit::Heart, Rank::Two, true)]),
                (StackType::Foundation(0), vec![(Suit::Heart, Rank::Ace, true)]),
                (StackType::Tableau(4), vec![(Suit::Club, Rank::Three, true)]),
            ],
        );
        let two = entity(&board, Suit::Heart, Rank::Two);
        assert_eq!(board.pile(StackType::Foundation(0)).next_card_position(), Position::new(400.0, 170.0));
        assert_eq!(board.pile(StackType::Tableau(4)).next_card_position(), Position::new(400.0, 170.0));
        assert!(rules::is_move_valid(&board, two, StackType::Foundation(0)));

        let (dx, dy) = delta_to(&board, two, StackType::Tableau(4));
        let mut drag = DragController::new();
        assert!(drag.start(&mut board, two));
        drag.update(&mut board, two, dx, dy);
        assert_eq!(
            drag.end(&mut board, two),
            Some(DropResolution::Legal { run: vec![two], origin: StackType::Waste, target: StackType::Tableau(4) })
        );
    }
}
