// src/protocol.rs

// JS 側とやり取りするデータの形 (プロトコル) をまとめたファイルだよ！💌
// どれも serde で JSON にしたり JSON から戻したりする。
//
// * `InputEvent`   : JS -> Rust。ドラッグやタップなどの入力。
// * `Notification` : Rust -> JS。カードが動いた、点数が変わった、などのお知らせ。
// * `CardRecord`   : セーブデータの 1 枚分。

use serde::{Deserialize, Serialize};

use crate::ecs::entity::Entity;
pub use crate::components::stack::StackType;

/// タップされたもの。カードか、カードの無いパイル置き場か。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind")]
pub enum TapTarget {
    Card { card_id: Entity },
    Slot { slot: StackType },
}

/// JS から届く入力イベント。
///
/// ```json
/// { "type": "DragUpdate", "card_id": 12, "delta_x": 4.0, "delta_y": -2.5 }
/// { "type": "Tap", "target": { "kind": "Slot", "slot": "stock" } }
/// ```
/// `card_id` は 0..51 のカードのエンティティ ID。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum InputEvent {
    DragStart { card_id: Entity },
    DragUpdate { card_id: Entity, delta_x: f32, delta_y: f32 },
    DragEnd { card_id: Entity },
    Tap { target: TapTarget },
    DoubleTap { card_id: Entity },
    RestartRequested,
    UndoRequested,
    SaveRequested,
    LoadRequested,
}

/// Rust から JS へのお知らせ。起きた順にキューに積まれるよ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Notification {
    CardMoved { card_id: Entity, from: StackType, to: StackType },
    CardFlipped { card_id: Entity, face_up: bool },
    /// 実際に変わった点数の差分 (0 点未満で切られた分は含まない)。
    ScoreChanged { delta: i32 },
    Win,
    StateLoaded,
    /// `reason` は `LoadError::reason_code()` の値。
    LoadFailed { reason: String },
    /// `reason` は `StorageError::reason_code()` の値。
    SaveFailed { reason: String },
}

/// セーブデータのカード 1 枚分。
///
/// `suite` と `rank` は名前 (`"hearts"`, `"Queen"` など)、`slot` は slot id。
/// どれも文字列のまま受け取って、読み込む時に 1 つずつ検証する。
/// `top` / `left` は UI のために書き出すだけで、読み込み時はレイアウトから計算し直すよ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub suite: String,
    pub rank: String,
    pub face_up: bool,
    pub top: f32,
    pub left: f32,
    pub index: usize,
    pub slot: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_events_parse_from_tagged_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{ "type": "DragUpdate", "card_id": 7, "delta_x": 3.5, "delta_y": -1 }"#)
                .unwrap();
        assert_eq!(event, InputEvent::DragUpdate { card_id: Entity(7), delta_x: 3.5, delta_y: -1.0 });

        let tap: InputEvent =
            serde_json::from_str(r#"{ "type": "Tap", "target": { "kind": "Slot", "slot": "stock" } }"#).unwrap();
        assert_eq!(tap, InputEvent::Tap { target: TapTarget::Slot { slot: StackType::Stock } });

        let undo: InputEvent = serde_json::from_str(r#"{ "type": "UndoRequested" }"#).unwrap();
        assert_eq!(undo, InputEvent::UndoRequested);

        assert!(serde_json::from_str::<InputEvent>(r#"{ "type": "Shuffle" }"#).is_err());
        assert!(serde_json::from_str::<InputEvent>(
            r#"{ "type": "Tap", "target": { "kind": "Slot", "slot": "tableau9" } }"#
        )
        .is_err());
    }

    #[test]
    fn notifications_serialize_with_type_tag() {
        let moved = Notification::CardMoved {
            card_id: Entity(3),
            from: StackType::Waste,
            to: StackType::Foundation(1),
        };
        let json: serde_json::Value = serde_json::to_value(&moved).unwrap();
        assert_eq!(json["type"], "CardMoved");
        assert_eq!(json["card_id"], 3);
        assert_eq!(json["from"], "waste");
        assert_eq!(json["to"], "foundation1");

        let win = serde_json::to_string(&Notification::Win).unwrap();
        assert_eq!(win, r#"{"type":"Win"}"#);
    }
}
