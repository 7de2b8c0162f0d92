// src/logic/deck.rs

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::components::card::{Card, ALL_RANKS, ALL_SUITS};

/// 標準的な 52 枚のデッキを作るよ！🃏
///
/// 並びは `ALL_SUITS` × `ALL_RANKS` の順で、全部裏向き。
/// `Board` はこの順番でカードのエンティティを作るので、ID もこの順になる。
pub fn create_standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(ALL_SUITS.len() * ALL_RANKS.len());
    for &suit in ALL_SUITS.iter() {
        for &rank in ALL_RANKS.iter() {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// 渡された乱数でデッキをシャッフルする。
pub fn shuffle_deck<T, R: Rng + ?Sized>(deck: &mut [T], rng: &mut R) {
    deck.shuffle(rng);
}

/// シードを指定してシャッフルする。同じシードなら毎回同じ並びになるよ。
pub fn shuffle_deck_seeded<T>(deck: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    shuffle_deck(deck, &mut rng);
}

/// OS (wasm ならブラウザ) の乱数でシャッフルする。
pub fn shuffle_deck_random<T>(deck: &mut [T]) {
    let mut rng = thread_rng();
    shuffle_deck(deck, &mut rng);
}
