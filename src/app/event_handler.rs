// src/app/event_handler.rs
//! タップとダブルタップで何をするかを決めるよ。👆
//!
//! ここは判断だけ。実際の盤面の書き換えはセッションがシステムに頼む。

use log::trace;

use crate::app::drag_handler::draggable_run;
use crate::board::Board;
use crate::components::StackType;
use crate::ecs::entity::Entity;
use crate::logic::auto_move::find_automatic_foundation_move;
use crate::protocol::TapTarget;

/// タップされた時にやること。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// 場札の一番上の裏向きカードを表にする。
    FlipTableauTop(Entity),
    /// 山札から 1 枚めくる (空なら捨て札を戻す)。
    TapStock,
    /// 何もしない。
    Nothing,
}

/// タップされたものからやることを決める。
///
/// * 場札の一番上にある裏向きカード -> めくる
/// * 山札の一番上のカード、または山札の置き場 -> 山札をめくる
/// * それ以外 -> 何もしない
pub fn classify_tap(board: &Board, target: TapTarget) -> TapAction {
    let action = match target {
        TapTarget::Slot { slot: StackType::Stock } => TapAction::TapStock,
        TapTarget::Slot { .. } => TapAction::Nothing,
        TapTarget::Card { card_id } => match board.stack_info(card_id) {
            Some(info) if info.stack_type == StackType::Stock => {
                if board.pile(StackType::Stock).top() == Some(card_id) {
                    TapAction::TapStock
                } else {
                    TapAction::Nothing
                }
            }
            Some(info)
                if info.stack_type.is_tableau()
                    && board.pile(info.stack_type).top() == Some(card_id)
                    && !board.is_face_up(card_id) =>
            {
                TapAction::FlipTableauTop(card_id)
            }
            _ => TapAction::Nothing,
        },
    };
    trace!("classify_tap: {:?} -> {:?}", target, action);
    action
}

/// ダブルタップされたカードの自動移動先。
///
/// 表向きで、1 枚だけで持ち上がるカード (捨て札の一番上、場札の一番上) だけが対象。
/// 組札にあるカードは動かさない。
pub fn double_tap_target(board: &Board, card: Entity) -> Option<StackType> {
    let origin = board.stack_info(card)?.stack_type;
    if origin.is_foundation() {
        return None;
    }
    let run = draggable_run(board, card)?;
    if run.len() != 1 {
        return None;
    }
    find_automatic_foundation_move(board, card)
}
