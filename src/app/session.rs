// src/app/session.rs
//! 1 回分のゲームセッション `Solitaire` だよ！🎮
//!
//! 盤面・履歴・ドラッグ状態・ストア・通知キューを全部持ってて、
//! 入力イベントを受け取ったら、ルールを聞いて、システムに盤面を書き換えてもらい、
//! 起きたことを通知キューに積む。JS とのやり取り (`GameApp`) はこの上に薄く乗ってるだけ。

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::app::drag_handler::{DragController, DropResolution};
use crate::app::event_handler::{self, TapAction};
use crate::app::state_handler;
use crate::board::Board;
use crate::components::{GameStatus, StackType};
use crate::config::GameConfig;
use crate::ecs::entity::Entity;
use crate::error::{LoadError, StorageError};
use crate::protocol::{InputEvent, Notification, TapTarget};
use crate::storage::BlobStore;
use crate::systems::history_system::{History, HistoryEntry};
use crate::systems::{DealInitialCardsSystem, MoveCardSystem, StockSystem, System, WinConditionSystem};

pub struct Solitaire {
    config: GameConfig,
    board: Board,
    history: History,
    drag: DragController,
    dealer: DealInitialCardsSystem,
    mover: MoveCardSystem,
    stock: StockSystem,
    win: WinConditionSystem,
    store: Box<dyn BlobStore>,
    notifications: VecDeque<Notification>,
}

impl Solitaire {
    /// ランダムに配って始める。
    pub fn new(config: GameConfig, store: Box<dyn BlobStore>) -> Self {
        Self::with_dealer(config, store, DealInitialCardsSystem::new())
    }

    /// シードを決めて配る。リスタートしても同じ配り方になるよ。
    pub fn with_seed(config: GameConfig, store: Box<dyn BlobStore>, seed: u64) -> Self {
        Self::with_dealer(config, store, DealInitialCardsSystem::with_seed(seed))
    }

    fn with_dealer(config: GameConfig, store: Box<dyn BlobStore>, mut dealer: DealInitialCardsSystem) -> Self {
        let mut board = Board::new(config.layout.clone());
        dealer.run(&mut board);
        let mut history = History::new();
        history.reset(&board);
        info!("Solitaire: new session (seed {:?})", dealer.seed());
        Self {
            mover: MoveCardSystem::new(config.scoring.clone()),
            stock: StockSystem::new(config.scoring.clone()),
            config,
            board,
            history,
            drag: DragController::new(),
            dealer,
            win: WinConditionSystem::new(),
            store,
            notifications: VecDeque::new(),
        }
    }

    // --- 読み取り ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> i32 {
        self.board.score()
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// 溜まってる通知を全部取り出す (古い順)。
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // --- 入力 ---

    /// 入力イベントを 1 つ処理する。
    pub fn handle_event(&mut self, event: InputEvent) {
        debug!("Solitaire: {:?}", event);
        match event {
            InputEvent::DragStart { card_id } => {
                self.drag_start(card_id);
            }
            InputEvent::DragUpdate { card_id, delta_x, delta_y } => {
                self.drag_update(card_id, delta_x, delta_y);
            }
            InputEvent::DragEnd { card_id } => self.drag_end(card_id),
            InputEvent::Tap { target } => self.tap(target),
            InputEvent::DoubleTap { card_id } => self.double_tap(card_id),
            InputEvent::RestartRequested => self.restart(),
            InputEvent::UndoRequested => self.undo(),
            InputEvent::SaveRequested => {
                let _ = self.save();
            }
            InputEvent::LoadRequested => {
                let _ = self.load();
            }
        }
    }

    pub fn drag_start(&mut self, card: Entity) -> bool {
        self.drag.start(&mut self.board, card)
    }

    pub fn drag_update(&mut self, card: Entity, delta_x: f32, delta_y: f32) -> bool {
        self.drag.update(&mut self.board, card, delta_x, delta_y)
    }

    /// 手を離した。置ける場所があれば移動を確定して履歴を積む。
    pub fn drag_end(&mut self, card: Entity) {
        match self.drag.end(&mut self.board, card) {
            Some(DropResolution::Legal { run, target, .. }) => self.commit_move(&run, target),
            Some(DropResolution::Bounced { .. }) | None => {}
        }
    }

    pub fn tap(&mut self, target: TapTarget) {
        if self.drag.is_dragging() {
            return;
        }
        let notes = match event_handler::classify_tap(&self.board, target) {
            TapAction::FlipTableauTop(card) => {
                let notes = self.mover.flip_tableau_top(&mut self.board, card);
                if !notes.is_empty() {
                    self.history.replace_latest(&self.board);
                }
                notes
            }
            TapAction::TapStock => {
                let notes = self.stock.tap_stock(&mut self.board);
                if !notes.is_empty() {
                    self.history.snapshot(&self.board);
                }
                notes
            }
            TapAction::Nothing => Vec::new(),
        };
        self.notifications.extend(notes);
    }

    pub fn double_tap(&mut self, card: Entity) {
        if self.drag.is_dragging() {
            return;
        }
        if let Some(target) = event_handler::double_tap_target(&self.board, card) {
            self.commit_move(&[card], target);
        }
    }

    /// 配り直す。履歴も新しくなる。
    pub fn restart(&mut self) {
        self.drag.cancel(&mut self.board);
        let previous_score = self.board.score();
        self.dealer.run(&mut self.board);
        self.history.reset(&self.board);
        if previous_score != 0 {
            self.notifications.push_back(Notification::ScoreChanged { delta: -previous_score });
        }
        self.notifications.push_back(Notification::StateLoaded);
        info!("Solitaire: restarted");
    }

    /// 1 手戻す。戻せない時は何もしない。
    pub fn undo(&mut self) {
        self.drag.cancel(&mut self.board);
        let notes = self.history.undo(&mut self.board);
        self.notifications.extend(notes);
    }

    /// 今の盤面をストアに保存する。失敗したら `SaveFailed` を通知する。
    pub fn save(&mut self) -> Result<(), StorageError> {
        let result = state_handler::save(&self.board, self.store.as_mut(), &self.config.save_key);
        if let Err(err) = &result {
            self.notifications.push_back(Notification::SaveFailed { reason: err.reason_code().to_string() });
        }
        result
    }

    /// ストアから読み込む。失敗したら盤面はそのままで `LoadFailed` を通知する。
    ///
    /// セーブデータに点数は入ってないので、読み込んだゲームは 0 点から。
    pub fn load(&mut self) -> Result<(), LoadError> {
        match self.try_load() {
            Ok(()) => {
                self.notifications.push_back(Notification::StateLoaded);
                Ok(())
            }
            Err(err) => {
                warn!("Solitaire: load failed: {}", err);
                self.notifications.push_back(Notification::LoadFailed { reason: err.reason_code().to_string() });
                Err(err)
            }
        }
    }

    fn try_load(&mut self) -> Result<(), LoadError> {
        let layout = state_handler::read_layout(&self.board, self.store.as_ref(), &self.config.save_key)?;

        self.drag.cancel(&mut self.board);
        let previous_score = self.board.score();
        state_handler::apply_layout(&mut self.board, &layout);
        self.board.set_score(0);
        WinConditionSystem::recompute_status(&mut self.board);
        self.history.reset(&self.board);
        if previous_score != 0 {
            self.notifications.push_back(Notification::ScoreChanged { delta: -previous_score });
        }
        Ok(())
    }

    /// 移動を確定して、履歴を積んで、勝利判定をする。
    fn commit_move(&mut self, run: &[Entity], target: StackType) {
        let notes = self.mover.commit(&mut self.board, run, target);
        if notes.is_empty() {
            return;
        }
        self.notifications.extend(notes);
        self.history.snapshot(&self.board);
        self.win.run(&mut self.board);
        if self.win.take_newly_won() {
            self.notifications.push_back(Notification::Win);
        }
    }

    /// 今の盤面のスナップショット (テストや UI のデバッグ用)。
    pub fn snapshot(&self) -> HistoryEntry {
        HistoryEntry::capture(&self.board)
    }
}
