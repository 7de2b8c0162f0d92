// src/error.rs
//! 外から入ってくるデータが壊れてた時のエラー型だよ。
//!
//! ルール違反の移動や空の Undo はエラーじゃない (`bool` や何もしない、で表す)。
//! ここにあるのはセーブデータの読み込みとストレージの失敗だけ！

use std::error::Error;
use std::fmt;

/// ストレージ (`BlobStore`) の読み書きに失敗した。
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// ストレージ自体が使えない (localStorage が無効など)。
    Unavailable(String),
    /// 読み書きの途中で失敗した (容量オーバーなど)。
    Backend(String),
}

impl StorageError {
    /// `SaveFailed` 通知で JS に渡すコード。
    pub fn reason_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => "storage_unavailable",
            StorageError::Backend(_) => "storage_error",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(detail) => write!(f, "storage unavailable: {}", detail),
            StorageError::Backend(detail) => write!(f, "storage error: {}", detail),
        }
    }
}

impl Error for StorageError {}

/// セーブデータを読み込めなかった理由。
///
/// 読み込みは全部検証してから盤面に反映するので、これが返った時の盤面は元のまま。
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// JSON として読めない、または形が違う。
    MalformedJson(String),
    /// 知らない slot id。
    UnknownSlot(String),
    /// 知らないスートやランクの名前。
    UnknownCard { suite: String, rank: String },
    /// 同じカードが 2 回出てきた。
    DuplicateCard { suite: String, rank: String },
    /// カードが 52 枚そろってない。
    MissingCards { found: usize },
    /// パイル内の index が 0 から連番になってない。
    BadIndex { slot: String },
    /// 指定したキーにセーブデータが無い。
    NotFound { key: String },
    Storage(StorageError),
}

impl LoadError {
    /// `LoadFailed` 通知で JS に渡す、変わらないコード。
    pub fn reason_code(&self) -> &'static str {
        match self {
            LoadError::MalformedJson(_) => "malformed_json",
            LoadError::UnknownSlot(_) => "unknown_slot",
            LoadError::UnknownCard { .. } => "unknown_card",
            LoadError::DuplicateCard { .. } => "duplicate_card",
            LoadError::MissingCards { .. } => "missing_cards",
            LoadError::BadIndex { .. } => "bad_index",
            LoadError::NotFound { .. } => "not_found",
            LoadError::Storage(_) => "storage_error",
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MalformedJson(detail) => write!(f, "save data is not valid JSON: {}", detail),
            LoadError::UnknownSlot(slot) => write!(f, "unknown slot id: {}", slot),
            LoadError::UnknownCard { suite, rank } => write!(f, "unknown card: {} of {}", rank, suite),
            LoadError::DuplicateCard { suite, rank } => write!(f, "card appears twice: {} of {}", rank, suite),
            LoadError::MissingCards { found } => write!(f, "expected 52 cards, found {}", found),
            LoadError::BadIndex { slot } => write!(f, "indices in {} are not 0..n", slot),
            LoadError::NotFound { key } => write!(f, "no saved game under key {}", key),
            LoadError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        LoadError::Storage(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::MalformedJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(LoadError::MalformedJson("x".into()).reason_code(), "malformed_json");
        assert_eq!(LoadError::UnknownSlot("hand".into()).reason_code(), "unknown_slot");
        assert_eq!(LoadError::MissingCards { found: 51 }.reason_code(), "missing_cards");
        assert_eq!(LoadError::NotFound { key: "k".into() }.reason_code(), "not_found");
        assert_eq!(
            LoadError::from(StorageError::Backend("quota".into())).reason_code(),
            "storage_error"
        );
        assert_eq!(StorageError::Unavailable("no window".into()).reason_code(), "storage_unavailable");
        assert_eq!(StorageError::Backend("quota".into()).reason_code(), "storage_error");
    }

    #[test]
    fn storage_error_is_the_source() {
        let err = LoadError::from(StorageError::Unavailable("no window".into()));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "storage unavailable: no window");
        assert!(LoadError::BadIndex { slot: "waste".into() }.source().is_none());
    }
}
