// src/logic/rules/mod.rs
//! ソリティアのルール判定をまとめるよ！🃏✅
//!
//! どの関数も盤面を読むだけで、何も書き換えない。
//! 「置けない」はよくあることなので、エラーじゃなくて `false` で返すよ。

pub mod common;
pub mod foundation;
pub mod move_validation;
pub mod stock_waste;
pub mod tableau;
pub mod win_condition;


pub use common::*;
pub use foundation::*;
pub use move_validation::*;
pub use stock_waste::*;
pub use tableau::*;
pub use win_condition::*;
