// src/components/mod.rs
//! カードやパイルを表すデータ部品たち。

pub mod card;
pub mod dragging_info;
pub mod game_state;
pub mod position;
pub mod stack;

pub use card::{Card, Rank, Suit};
pub use dragging_info::DraggingInfo;
pub use game_state::GameStatus;
pub use position::Position;
pub use stack::{Pile, StackInfo, StackType};
