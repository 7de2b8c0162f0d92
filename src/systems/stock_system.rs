// src/systems/stock_system.rs

use log::{debug, info};

use crate::board::Board;
use crate::components::stack::StackType;
use crate::config::ScoreConfig;
use crate::logic::{rules, scoring};
use crate::protocol::Notification;

/// 山札 (Stock) と捨て札 (Waste) の間でカードを動かすシステムだよ。🔄
#[derive(Debug, Clone, Default)]
pub struct StockSystem {
    scoring: ScoreConfig,
}

impl StockSystem {
    pub fn new(scoring: ScoreConfig) -> Self {
        Self { scoring }
    }

    /// 山札のタップ。山札にカードがあれば 1 枚めくり、空なら捨て札を戻す。
    pub fn tap_stock(&self, board: &mut Board) -> Vec<Notification> {
        let stock_empty = board.pile(StackType::Stock).is_empty();
        if rules::can_deal_from_stock(stock_empty) {
            self.deal_from_stock(board)
        } else {
            self.reset_waste_to_stock(board)
        }
    }

    /// 山札の一番上を表向きにして捨て札に乗せる。
    pub fn deal_from_stock(&self, board: &mut Board) -> Vec<Notification> {
        let stock = board.pile(StackType::Stock);
        if !rules::can_deal_from_stock(stock.is_empty()) {
            return Vec::new();
        }
        let from = stock.len() - 1;
        let drawn = board.take_from(StackType::Stock, from);
        board.push_cards(StackType::Waste, &drawn);

        let mut notifications = Vec::with_capacity(drawn.len() * 2);
        for &entity in &drawn {
            notifications.push(Notification::CardMoved {
                card_id: entity,
                from: StackType::Stock,
                to: StackType::Waste,
            });
            if board.set_face_up(entity, true) {
                notifications.push(Notification::CardFlipped { card_id: entity, face_up: true });
            }
        }
        board.raise_to_top(&drawn);
        debug!("StockSystem: drew {:?}", drawn);
        notifications
    }

    /// 山札が空の時に、捨て札を全部裏向きで山札に戻す。
    ///
    /// 捨て札の一番上から 1 枚ずつ山札に積むので、山札は捨て札の逆順になる。
    /// 次の周も 1 周目と同じ順番でめくれるよ。
    pub fn reset_waste_to_stock(&self, board: &mut Board) -> Vec<Notification> {
        let stock_empty = board.pile(StackType::Stock).is_empty();
        let waste_empty = board.pile(StackType::Waste).is_empty();
        if !rules::can_reset_stock_from_waste(stock_empty, waste_empty) {
            return Vec::new();
        }

        let mut notifications = Vec::new();
        let mut recycled = Vec::new();
        while let Some(top) = board.pile(StackType::Waste).top() {
            let from = board.pile(StackType::Waste).len() - 1;
            let card = board.take_from(StackType::Waste, from);
            board.push_cards(StackType::Stock, &card);
            notifications.push(Notification::CardMoved {
                card_id: top,
                from: StackType::Waste,
                to: StackType::Stock,
            });
            if board.set_face_up(top, false) {
                notifications.push(Notification::CardFlipped { card_id: top, face_up: false });
            }
            recycled.push(top);
        }
        board.raise_to_top(&recycled);

        let applied = board.add_score(scoring::recycle_score(&self.scoring));
        if applied != 0 {
            notifications.push(Notification::ScoreChanged { delta: applied });
        }
        info!("StockSystem: recycled {} card(s) back to stock", recycled.len());
        notifications
    }
}
