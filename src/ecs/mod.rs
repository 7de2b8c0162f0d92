// src/ecs/mod.rs
//! カードの実体を管理する小さな ECS (Entity-Component-System) だよ。

pub mod component;
pub mod entity;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use world::World;
