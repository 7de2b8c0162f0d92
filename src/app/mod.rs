// src/app/mod.rs
//! 入力を受け取ってゲームを進める部分をまとめたモジュールだよ！
//!
//! * `drag_handler` / `event_handler`: ドラッグとタップの判断
//! * `state_handler`: セーブデータの変換と保存・読み込み
//! * `session`: それら全部をまとめた `Solitaire`
//! * `game_app`: JS 向けの `GameApp`

pub mod drag_handler;
pub mod event_handler;
pub mod game_app;
pub mod session;
pub mod state_handler;

pub use game_app::GameApp;
pub use session::Solitaire;
