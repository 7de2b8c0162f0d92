// src/components/card.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// カードのスート（マーク）だよ！❤️♦️♣️♠️
///
/// 並び順はデッキを作る順番でもあるので、勝手に入れ替えないでね。
/// (カードのエンティティ ID は `ALL_SUITS` × `ALL_RANKS` の順で振られる)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "hearts")]
    Heart,
    #[serde(rename = "diamonds")]
    Diamond,
    #[serde(rename = "clubs")]
    Club,
    #[serde(rename = "spades")]
    Spade,
}

impl Suit {
    /// セーブデータで使う名前。
    pub fn name(self) -> &'static str {
        match self {
            Suit::Heart => "hearts",
            Suit::Diamond => "diamonds",
            Suit::Club => "clubs",
            Suit::Spade => "spades",
        }
    }

    /// `name()` の逆。知らない名前なら `None`。
    pub fn from_name(name: &str) -> Option<Suit> {
        ALL_SUITS.iter().copied().find(|suit| suit.name() == name)
    }
}

/// カードのランク。A = 1 から K = 13 まで。
///
/// `PartialOrd`/`Ord` は値の大小そのまま！
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "Ace")]
    Ace = 1,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "Jack")]
    Jack,
    #[serde(rename = "Queen")]
    Queen,
    #[serde(rename = "King")]
    King,
}

impl Rank {
    /// 1..=13 の数値。
    pub fn value(self) -> u8 {
        self as u8
    }

    /// セーブデータで使う名前 ("Ace", "2", ..., "King")。
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    pub fn from_name(name: &str) -> Option<Rank> {
        ALL_RANKS.iter().copied().find(|rank| rank.name() == name)
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

/// カード 1 枚を表すコンポーネントだよ！🃏
///
/// `suit` と `rank` はカードの正体なので作った後は変えない。
/// 変わるのは `is_face_up` (表か裏か) だけ！
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub is_face_up: bool,
}

impl Card {
    /// 裏向きのカードを作る。
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, is_face_up: false }
    }

    /// 表向きのカードを作る。テストでよく使う。
    pub fn face_up(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, is_face_up: true }
    }
}

impl Component for Card {}
