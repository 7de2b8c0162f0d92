// src/lib.rs
//! クロンダイク (ソリティア) のルールエンジンとゲームの状態管理だよ！🃏
//!
//! 描画はしない。JS 側から入力イベントを受け取って、盤面を更新して、
//! 「カードが動いた」「点数が変わった」みたいな通知を返すだけ。
//!
//! ネイティブの Rust からは `app::Solitaire` をそのまま使えるし、
//! wasm では `GameApp` が JSON でやり取りする窓口になる。

use wasm_bindgen::prelude::*;

pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod logging;
pub mod logic;
pub mod protocol;
pub mod storage;
pub mod systems;

pub use app::{GameApp, Solitaire};
pub use board::Board;
pub use config::GameConfig;
pub use error::{LoadError, StorageError};
pub use protocol::{InputEvent, Notification, TapTarget};
pub use storage::{BlobStore, MemoryStore};

/// Wasm がロードされた時に最初に実行される関数だよ。
/// パニックをコンソールに出すフックと、ロガーを設定する。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if logging::init(log::LevelFilter::Info).is_ok() {
        log::info!("klondike_wasm: logger ready");
    }
}
