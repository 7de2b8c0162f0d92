// src/systems/history_system.rs
//! Undo のための履歴だよ！⏪
//!
//! 状態が確定するたびに盤面のスナップショット (`HistoryEntry`) を積んでいく。
//! Undo は一番新しいのを捨てて、1 つ前のスナップショットに盤面を戻す。

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::board::Board;
use crate::components::stack::StackType;
use crate::ecs::entity::Entity;
use crate::protocol::Notification;
use crate::systems::win_condition_system::WinConditionSystem;

/// ある時点の盤面のコピー。
///
/// パイルごとのカードの並び、カードごとの表裏、その時の点数だけを持つ。
/// 位置や重なり順は戻す時にパイルから計算し直すので持たない。
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// `StackType::index()` の順に 13 個。
    piles: Vec<Vec<Entity>>,
    face_up: BTreeMap<Entity, bool>,
    score: i32,
}

impl HistoryEntry {
    pub fn capture(board: &Board) -> Self {
        Self {
            piles: board.piles().iter().map(|pile| pile.cards.clone()).collect(),
            face_up: board
                .all_cards()
                .iter()
                .map(|entity| (*entity, board.is_face_up(*entity)))
                .collect(),
            score: board.score(),
        }
    }

    /// 盤面をこのスナップショットの状態に戻す。
    ///
    /// 戻した後、場札の一番上は全部表向き、山札は全部裏向きにそろえる。
    /// ステータスも中身から決め直すよ。
    pub fn restore(&self, board: &mut Board) {
        let assignments: Vec<(StackType, Vec<Entity>)> =
            StackType::all().zip(self.piles.iter().cloned()).collect();
        board.rebuild(&assignments);

        for (entity, face_up) in &self.face_up {
            board.set_face_up(*entity, *face_up);
        }
        for tableau in StackType::tableaus() {
            if let Some(top) = board.pile(tableau).top() {
                board.set_face_up(top, true);
            }
        }
        for entity in board.pile(StackType::Stock).cards.clone() {
            board.set_face_up(entity, false);
        }
        board.set_score(self.score);
        WinConditionSystem::recompute_status(board);
    }

    /// `self` から `after` に変わった時の通知を作る。
    /// カードは `after` のパイル順 (下から上) で並ぶよ。
    pub fn diff(&self, after: &HistoryEntry) -> Vec<Notification> {
        let before_location: HashMap<Entity, StackType> = StackType::all()
            .zip(self.piles.iter())
            .flat_map(|(stack_type, cards)| cards.iter().map(move |entity| (*entity, stack_type)))
            .collect();

        let mut notifications = Vec::new();
        for (to, cards) in StackType::all().zip(after.piles.iter()) {
            for entity in cards {
                match before_location.get(entity) {
                    Some(from) if *from != to => notifications.push(Notification::CardMoved {
                        card_id: *entity,
                        from: *from,
                        to,
                    }),
                    _ => {}
                }
            }
        }
        for (entity, face_up) in &after.face_up {
            if self.face_up.get(entity) != Some(face_up) {
                notifications.push(Notification::CardFlipped { card_id: *entity, face_up: *face_up });
            }
        }
        if after.score != self.score {
            notifications.push(Notification::ScoreChanged { delta: after.score - self.score });
        }
        notifications
    }
}

/// スナップショットの積み重ね。追加と Undo (末尾を捨てる) しかしない。
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 今の盤面を積む。
    pub fn snapshot(&mut self, board: &Board) {
        self.entries.push(HistoryEntry::capture(board));
        debug!("History: snapshot #{}", self.entries.len());
    }

    /// 一番新しいスナップショットを今の盤面で上書きする。
    /// 手数に数えない変化 (タップでめくった場札) を、直前の手に含めるのに使う。
    pub fn replace_latest(&mut self, board: &Board) {
        match self.entries.last_mut() {
            Some(latest) => *latest = HistoryEntry::capture(board),
            None => self.snapshot(board),
        }
    }

    /// 履歴を全部捨てて、今の盤面だけを持つ状態にする (新しいゲームや読み込みの後)。
    pub fn reset(&mut self, board: &Board) {
        self.entries.clear();
        self.snapshot(board);
    }

    /// 1 手戻す。スナップショットが 2 つ未満なら何もしない。
    /// 盤面がどう変わったかを通知のリストで返すよ。
    pub fn undo(&mut self, board: &mut Board) -> Vec<Notification> {
        if self.entries.len() < 2 {
            debug!("History: nothing to undo");
            return Vec::new();
        }
        self.entries.pop();
        let Some(previous) = self.entries.last() else {
            return Vec::new();
        };
        let before = HistoryEntry::capture(board);
        previous.restore(board);
        let notifications = before.diff(&HistoryEntry::capture(board));
        debug!("History: undo -> {} entries left", self.entries.len());
        notifications
    }
}
