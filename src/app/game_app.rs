// src/app/game_app.rs
//! JS から使う `GameApp` だよ！🌐
//!
//! 中身は `Solitaire` に全部おまかせ。ここでやるのは
//! JSON の入力イベントを読む、通知を JS に渡す、エラーを `JsValue` にする、だけ。

use js_sys::Function;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::app::session::Solitaire;
use crate::app::state_handler;
use crate::config::GameConfig;
use crate::protocol::{InputEvent, Notification};
use crate::storage::{BlobStore, LocalStorageStore, MemoryStore};

#[wasm_bindgen]
pub struct GameApp {
    session: Solitaire,
    /// 通知を 1 つずつ受け取る JS の関数。無ければ `drain_notifications` で取りに来てもらう。
    listener: Option<Function>,
}

#[wasm_bindgen]
impl GameApp {
    /// デフォルト設定で、ランダムに配って始める。
    #[wasm_bindgen(constructor)]
    pub fn new() -> GameApp {
        Self::from_session(Solitaire::new(GameConfig::default(), default_store()))
    }

    /// JSON の設定 (一部だけでも OK) で始める。
    pub fn with_config(config_json: &str) -> Result<GameApp, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self::from_session(Solitaire::new(config, default_store())))
    }

    /// シードを決めて始める。同じシードなら同じ配り方。
    pub fn with_seed(config_json: &str, seed: u64) -> Result<GameApp, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self::from_session(Solitaire::with_seed(config, default_store(), seed)))
    }

    /// 通知を受け取る関数を登録する。引数は通知 1 つ分の JSON 文字列。
    pub fn set_listener(&mut self, listener: Function) {
        self.listener = Some(listener);
        self.flush_to_listener();
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// 入力イベント (JSON) を 1 つ処理する。
    pub fn handle_event(&mut self, event_json: &str) -> Result<(), JsValue> {
        let event: InputEvent = serde_json::from_str(event_json)
            .map_err(|err| JsValue::from_str(&format!("invalid input event: {}", err)))?;
        self.session.handle_event(event);
        self.flush_to_listener();
        Ok(())
    }

    /// 溜まってる通知を JSON 配列で取り出す。
    pub fn drain_notifications(&mut self) -> Result<String, JsValue> {
        let notifications = self.session.drain_notifications();
        serde_json::to_string(&notifications).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// 今の盤面をセーブデータと同じ形の JSON で返す (描画用)。
    pub fn get_state_json(&self) -> Result<String, JsValue> {
        state_handler::to_json(self.session.board()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// 描画の重なり順 (奥から手前) のカード ID。
    pub fn z_order(&self) -> Vec<u32> {
        self.session.board().z_order().iter().map(|entity| entity.id() as u32).collect()
    }

    pub fn score(&self) -> i32 {
        self.session.score()
    }

    pub fn is_won(&self) -> bool {
        self.session.status().is_won()
    }

    pub fn can_undo(&self) -> bool {
        self.session.history_len() > 1
    }
}

impl Default for GameApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GameApp {
    fn from_session(session: Solitaire) -> Self {
        info!("GameApp: ready (save key {})", session.config().save_key);
        Self { session, listener: None }
    }

    /// リスナーがいれば、溜まってる通知を全部渡す。
    fn flush_to_listener(&mut self) {
        let Some(listener) = &self.listener else {
            return;
        };
        for notification in self.session.drain_notifications() {
            if let Err(err) = call_listener(listener, &notification) {
                error!("GameApp: listener failed: {:?}", err);
            }
        }
    }
}

fn call_listener(listener: &Function, notification: &Notification) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(notification).map_err(|err| JsValue::from_str(&err.to_string()))?;
    listener.call1(&JsValue::NULL, &JsValue::from_str(&json))
}

fn parse_config(config_json: &str) -> Result<GameConfig, JsValue> {
    GameConfig::from_json(config_json).map_err(|err| JsValue::from_str(&format!("invalid config: {}", err)))
}

/// localStorage が使えればそれを、ダメならメモリに保存する。
fn default_store() -> Box<dyn BlobStore> {
    match LocalStorageStore::new() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("GameApp: {}, saves will only live in memory", err);
            Box::new(MemoryStore::new())
        }
    }
}
