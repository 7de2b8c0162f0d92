// src/systems/mod.rs
//! 盤面を書き換える「システム」たちだよ！⚙️
//!
//! ルール判定 (`logic`) は盤面を読むだけ。実際にカードを動かすのはここだけ！
//! それぞれのシステムは起きたことを `Notification` のリストで返すので、
//! セッション側がそれをキューに積んで JS に渡すよ。

pub mod deal_system;
pub mod history_system;
pub mod move_card_system;
pub mod stock_system;
pub mod win_condition_system;

use crate::board::Board;

pub use deal_system::DealInitialCardsSystem;
pub use history_system::{History, HistoryEntry};
pub use move_card_system::MoveCardSystem;
pub use stock_system::StockSystem;
pub use win_condition_system::WinConditionSystem;

/// System トレイトだよ！
///
/// 盤面全体を受け取って、何かしらの処理を 1 回走らせる。
/// 入力に応じて呼ぶもの (カード移動など) は専用のメソッドを持ってて、
/// 「毎回同じことをする」ものだけがこのトレイトを実装してるよ。
pub trait System {
    fn run(&mut self, board: &mut Board);
}
