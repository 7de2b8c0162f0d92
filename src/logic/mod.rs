// src/logic/mod.rs
//! 盤面を読むだけのロジック (ルール判定・自動移動・得点・デッキ) をまとめるよ。

pub mod auto_move;
pub mod deck;
pub mod rules;
pub mod scoring;
