// src/storage.rs
//! セーブデータ (JSON 文字列) をキーで出し入れする場所だよ。💾
//!
//! ゲーム側は `BlobStore` トレイトしか知らない。
//! ブラウザでは `LocalStorageStore`、テストやネイティブでは `MemoryStore` を使う。

use std::collections::HashMap;

use log::debug;
use wasm_bindgen::JsValue;

use crate::error::StorageError;

pub trait BlobStore {
    /// `blob` を `key` に保存する (上書き)。
    fn store(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;
    /// `key` の中身を取り出す。何も無ければ `Ok(None)`。
    fn retrieve(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// メモリ上の `HashMap` に置くだけのストア。
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn store(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }
}

/// ブラウザの `window.localStorage` を使うストア。
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// `window.localStorage` をつかまえる。プライベートモードなどで使えない時はエラー。
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(js_error_text(&err)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl BlobStore for LocalStorageStore {
    fn store(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        debug!("LocalStorageStore: writing {} bytes to {}", blob.len(), key);
        self.storage
            .set_item(key, blob)
            .map_err(|err| StorageError::Backend(js_error_text(&err)))
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Backend(js_error_text(&err)))
    }
}

fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
