// src/app/state_handler.rs
//! 盤面とセーブデータ (JSON) の変換、保存と読み込みだよ。💾
//!
//! セーブデータは `CardRecord` のフラットな配列。
//! 並びは山札・捨て札・組札 0..3・場札 0..6 の順で、その中は下から上。
//!
//! 読み込みは「全部検証してから反映」。途中で変なデータが見つかったら
//! 盤面には一切触らないで `LoadError` を返すよ。

use std::collections::{BTreeMap, HashSet};

use log::{info, warn};

use crate::board::{Board, DECK_SIZE};
use crate::components::card::{Rank, Suit};
use crate::components::StackType;
use crate::ecs::entity::Entity;
use crate::error::{LoadError, StorageError};
use crate::protocol::CardRecord;
use crate::storage::BlobStore;

/// 検証が終わったセーブデータ。あとは盤面に流し込むだけ。
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLayout {
    /// パイルごとに下から上の順で `(カード, 表向きか)`。
    piles: Vec<(StackType, Vec<(Entity, bool)>)>,
}

/// 盤面を `CardRecord` の列にする。
pub fn serialize_board(board: &Board) -> Vec<CardRecord> {
    board
        .piles()
        .iter()
        .flat_map(|pile| pile.cards.iter().enumerate().map(move |(index, entity)| (pile.stack_type, index, *entity)))
        .filter_map(|(stack_type, index, entity)| {
            let card = board.card(entity)?;
            let position = board.position(entity).unwrap_or_default();
            Some(CardRecord {
                suite: card.suit.name().to_string(),
                rank: card.rank.name().to_string(),
                face_up: card.is_face_up,
                top: position.y,
                left: position.x,
                index,
                slot: stack_type.slot_id(),
            })
        })
        .collect()
}

/// 盤面を JSON 文字列にする。
pub fn to_json(board: &Board) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serialize_board(board))
}

/// JSON を読んで検証する。盤面は読むだけ。
pub fn parse_and_validate(board: &Board, json: &str) -> Result<LoadedLayout, LoadError> {
    let records: Vec<CardRecord> = serde_json::from_str(json)?;
    validate_records(board, &records)
}

/// `CardRecord` の列を検証する。
///
/// 1 枚ずつ slot id、カード名、重複を見て、最後に枚数と index の連番を確かめる。
pub fn validate_records(board: &Board, records: &[CardRecord]) -> Result<LoadedLayout, LoadError> {
    let mut by_slot: BTreeMap<usize, Vec<(usize, Entity, bool)>> = BTreeMap::new();
    let mut seen = HashSet::with_capacity(DECK_SIZE);

    for record in records {
        let stack_type =
            StackType::from_slot_id(&record.slot).ok_or_else(|| LoadError::UnknownSlot(record.slot.clone()))?;
        let unknown_card = || LoadError::UnknownCard { suite: record.suite.clone(), rank: record.rank.clone() };
        let suit = Suit::from_name(&record.suite).ok_or_else(unknown_card)?;
        let rank = Rank::from_name(&record.rank).ok_or_else(unknown_card)?;
        let entity = board.card_entity(suit, rank).ok_or_else(unknown_card)?;
        if !seen.insert(entity) {
            return Err(LoadError::DuplicateCard { suite: record.suite.clone(), rank: record.rank.clone() });
        }
        by_slot
            .entry(stack_type.index())
            .or_default()
            .push((record.index, entity, record.face_up));
    }

    if seen.len() != DECK_SIZE {
        return Err(LoadError::MissingCards { found: seen.len() });
    }

    let mut piles = Vec::with_capacity(by_slot.len());
    for (slot_index, mut cards) in by_slot {
        let Some(stack_type) = StackType::from_index(slot_index) else {
            continue;
        };
        cards.sort_by_key(|(index, _, _)| *index);
        let contiguous = cards.iter().enumerate().all(|(expected, (index, _, _))| *index == expected);
        if !contiguous {
            return Err(LoadError::BadIndex { slot: stack_type.slot_id() });
        }
        piles.push((stack_type, cards.into_iter().map(|(_, entity, up)| (entity, up)).collect()));
    }
    Ok(LoadedLayout { piles })
}

/// 検証済みのレイアウトを盤面に反映する。位置はレイアウト設定から計算し直すよ。
pub fn apply_layout(board: &mut Board, layout: &LoadedLayout) {
    let assignments: Vec<(StackType, Vec<Entity>)> = layout
        .piles
        .iter()
        .map(|(stack_type, cards)| (*stack_type, cards.iter().map(|(entity, _)| *entity).collect()))
        .collect();
    board.rebuild(&assignments);
    for (_, cards) in &layout.piles {
        for (entity, face_up) in cards {
            board.set_face_up(*entity, *face_up);
        }
    }
}

/// JSON を検証して盤面に反映する。失敗したら盤面はそのまま。
pub fn deserialize_into(board: &mut Board, json: &str) -> Result<(), LoadError> {
    let layout = parse_and_validate(board, json)?;
    apply_layout(board, &layout);
    Ok(())
}

/// 盤面を `key` に保存する。
pub fn save(board: &Board, store: &mut dyn BlobStore, key: &str) -> Result<(), StorageError> {
    let json = to_json(board).map_err(|err| StorageError::Backend(err.to_string()))?;
    store.store(key, &json).map_err(|err| {
        warn!("state_handler: saving to {} failed: {}", key, err);
        err
    })?;
    info!("state_handler: saved {} cards to {}", DECK_SIZE, key);
    Ok(())
}

/// `key` のセーブデータを読んで検証する。盤面への反映 (`apply_layout`) は呼ぶ側で。
pub fn read_layout(board: &Board, store: &dyn BlobStore, key: &str) -> Result<LoadedLayout, LoadError> {
    let json = store.retrieve(key)?.ok_or_else(|| LoadError::NotFound { key: key.to_string() })?;
    let layout = parse_and_validate(board, &json)?;
    info!("state_handler: read saved game from {}", key);
    Ok(layout)
}
