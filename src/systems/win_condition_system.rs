// src/systems/win_condition_system.rs

use log::info;

use crate::board::Board;
use crate::components::game_state::GameStatus;
use crate::logic::rules::check_win;
use crate::systems::System;

/// ゲームの勝利条件をチェックするシステムだよ！🏆🎉
///
/// Playing の時に 4 つの組札が全部完成してたら Won にする。
/// Won になった瞬間だけ `take_newly_won()` が `true` を返すので、
/// セッションはそれを見て `Win` を 1 回だけ通知するよ。
#[derive(Debug, Default)]
pub struct WinConditionSystem {
    newly_won: bool,
}

impl WinConditionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前回聞いてから Playing -> Won に変わったか。読んだらリセットされる。
    pub fn take_newly_won(&mut self) -> bool {
        std::mem::take(&mut self.newly_won)
    }

    /// 盤面の中身からステータスを決め直す (Undo や読み込みの後用)。
    /// こっちは通知のフラグを立てない。
    pub fn recompute_status(board: &mut Board) -> GameStatus {
        let status = if check_win(board) { GameStatus::Won } else { GameStatus::Playing };
        board.set_status(status);
        status
    }
}

impl System for WinConditionSystem {
    fn run(&mut self, board: &mut Board) {
        if board.status() != GameStatus::Playing {
            return;
        }
        if check_win(board) {
            info!("WinConditionSystem: all foundations complete 🏆");
            board.set_status(GameStatus::Won);
            self.newly_won = true;
        }
    }
}
