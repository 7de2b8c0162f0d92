// src/components/stack.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::position::Position;
use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

pub const FOUNDATION_COUNT: u8 = 4;
pub const TABLEAU_COUNT: u8 = 7;
/// stock + waste + foundation x4 + tableau x7
pub const STACK_COUNT: usize = 2 + FOUNDATION_COUNT as usize + TABLEAU_COUNT as usize;

/// カードが置かれる場所の種類だよ。
///
/// JSON ではセーブデータと同じ slot id 文字列 (`"stock"`, `"foundation2"`, `"tableau6"` など)
/// になるようにしてある。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum StackType {
    /// 山札。裏向きのカードが積まれてる。
    Stock,
    /// 山札からめくったカードの置き場。
    Waste,
    /// 組札 (0-3)。スートは固定しないで、最初に置かれた A で決まる。
    Foundation(u8),
    /// 場札 (0-6)。
    Tableau(u8),
}

impl StackType {
    /// 全 13 パイルを `Board` の並び順で返す。
    pub fn all() -> impl Iterator<Item = StackType> {
        (0..STACK_COUNT).filter_map(StackType::from_index)
    }

    pub fn foundations() -> impl Iterator<Item = StackType> {
        (0..FOUNDATION_COUNT).map(StackType::Foundation)
    }

    pub fn tableaus() -> impl Iterator<Item = StackType> {
        (0..TABLEAU_COUNT).map(StackType::Tableau)
    }

    /// `Board` 内の配列インデックス。
    /// stock=0, waste=1, foundation0..3=2..5, tableau0..6=6..12
    pub fn index(self) -> usize {
        match self {
            StackType::Stock => 0,
            StackType::Waste => 1,
            StackType::Foundation(i) => 2 + i as usize,
            StackType::Tableau(i) => 2 + FOUNDATION_COUNT as usize + i as usize,
        }
    }

    pub fn from_index(index: usize) -> Option<StackType> {
        let foundation_end = 2 + FOUNDATION_COUNT as usize;
        match index {
            0 => Some(StackType::Stock),
            1 => Some(StackType::Waste),
            i if i < foundation_end => Some(StackType::Foundation((i - 2) as u8)),
            i if i < STACK_COUNT => Some(StackType::Tableau((i - foundation_end) as u8)),
            _ => None,
        }
    }

    /// セーブデータの slot id。
    pub fn slot_id(self) -> String {
        match self {
            StackType::Stock => "stock".to_string(),
            StackType::Waste => "waste".to_string(),
            StackType::Foundation(i) => format!("foundation{}", i),
            StackType::Tableau(i) => format!("tableau{}", i),
        }
    }

    /// slot id を読む。範囲外の番号や知らない名前は `None`。
    pub fn from_slot_id(slot: &str) -> Option<StackType> {
        match slot {
            "stock" => return Some(StackType::Stock),
            "waste" => return Some(StackType::Waste),
            _ => {}
        }
        let parse_index = |digits: &str, limit: u8| -> Option<u8> {
            // "foundation01" や "tableau+1" みたいな表記は受け付けない
            if digits.len() != 1 {
                return None;
            }
            digits.parse::<u8>().ok().filter(|i| *i < limit)
        };
        if let Some(rest) = slot.strip_prefix("foundation") {
            return parse_index(rest, FOUNDATION_COUNT).map(StackType::Foundation);
        }
        if let Some(rest) = slot.strip_prefix("tableau") {
            return parse_index(rest, TABLEAU_COUNT).map(StackType::Tableau);
        }
        None
    }

    pub fn is_tableau(self) -> bool {
        matches!(self, StackType::Tableau(_))
    }

    pub fn is_foundation(self) -> bool {
        matches!(self, StackType::Foundation(_))
    }
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slot_id())
    }
}

impl From<StackType> for String {
    fn from(stack_type: StackType) -> Self {
        stack_type.slot_id()
    }
}

impl TryFrom<String> for StackType {
    type Error = String;

    fn try_from(slot: String) -> Result<Self, Self::Error> {
        StackType::from_slot_id(&slot).ok_or_else(|| format!("unknown slot id: {}", slot))
    }
}

/// カードがどのパイルの何番目にいるか、の逆引き情報だよ。
///
/// あくまで「持ち主はどこか」を指すだけのラベルで、本当の並び順は
/// `Pile::cards` が持ってる。両方を書き換えるのは `Board` だけ！
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackInfo {
    pub stack_type: StackType,
    /// 下から数えて何番目か (0 が一番下)。
    pub position_in_stack: usize,
}

impl StackInfo {
    pub fn new(stack_type: StackType, position_in_stack: usize) -> Self {
        Self { stack_type, position_in_stack }
    }
}

impl Component for StackInfo {}

/// カードの山 1 つ分。種類 (`stack_type`) とレイアウトの情報も一緒に持つよ。
#[derive(Debug, Clone, PartialEq)]
pub struct Pile {
    pub stack_type: StackType,
    /// 一番下のカードが置かれる位置。
    pub anchor: Position,
    /// 1 枚ごとの縦のずらし幅 (場札以外は 0)。
    pub fan_offset: f32,
    /// 下から上の順。最後の要素が一番上！
    pub cards: Vec<Entity>,
}

impl Pile {
    pub fn new(stack_type: StackType, anchor: Position, fan_offset: f32) -> Self {
        Self { stack_type, anchor, fan_offset, cards: Vec::new() }
    }

    pub fn top(&self) -> Option<Entity> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.cards.iter().position(|e| *e == entity)
    }

    /// `index` 番目のカードの表示位置。
    pub fn card_position(&self, index: usize) -> Position {
        Position::new(self.anchor.x, self.anchor.y + self.fan_offset * index as f32)
    }

    /// 次に積まれるカードが来る位置。ドロップ判定で使うよ。
    pub fn next_card_position(&self) -> Position {
        self.card_position(self.cards.len())
    }
}
