// src/ecs/world.rs

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use log::trace;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// 全エンティティと、型ごとのコンポーネントストレージを持つ入れ物だよ。
///
/// ストレージは `TypeId` をキーにした `HashMap<Entity, T>` を `Box<dyn Any>` で
/// 型消去して持ってる。取り出す時に `downcast` で元の型に戻すんだ。
/// 山札の並びみたいな「順番」の情報はここには置かないよ。それは `Board` の仕事！
pub struct World {
    /// 生きてるエンティティの集合。
    entities: HashSet<Entity>,
    /// 次に発行する ID。
    next_entity_id: usize,
    /// `TypeId` → `HashMap<Entity, T>` (型消去済み)。
    component_stores: HashMap<TypeId, Box<dyn Any>>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// 空の World を作る。
    pub fn new() -> Self {
        World {
            entities: HashSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを発行する。ID は 0 からの連番。
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        trace!("World: created entity {}", entity.0);
        entity
    }

    /// そのエンティティが生きてるか。
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// 生きてるエンティティの数。
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// コンポーネント型 `T` のストレージを用意する。
    /// 2 回呼んでも既存のストレージはそのまま残るよ。
    pub fn register_component<T: Component>(&mut self) {
        self.component_stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                trace!("World: registering component {}", std::any::type_name::<T>());
                Box::new(HashMap::<Entity, T>::new())
            });
    }

    /// エンティティにコンポーネントを付ける (既にあれば上書き)。
    ///
    /// 死んでるエンティティには付けずに `false` を返す。
    /// ストレージが未登録ならここで登録しちゃう。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        if !self.is_entity_alive(entity) {
            return false;
        }
        self.register_component::<T>();
        match self.storage_mut::<T>() {
            Some(storage) => {
                storage.insert(entity, component);
                true
            }
            None => false,
        }
    }

    /// 読み取り専用でコンポーネントを取る。
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(&entity))
    }

    /// 書き込み可能でコンポーネントを取る。
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.storage_mut::<T>().and_then(|storage| storage.get_mut(&entity))
    }

    /// `T` を持ってる生存エンティティを ID 順で全部返す。
    ///
    /// `HashMap` の順番はバラバラなので、呼び出し側が毎回同じ結果を
    /// 得られるようにソートしてから返すよ。
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .storage::<T>()
            .map(|storage| {
                storage
                    .keys()
                    .copied()
                    .filter(|entity| self.is_entity_alive(*entity))
                    .collect()
            })
            .unwrap_or_default();
        entities.sort();
        entities
    }

    fn storage<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<HashMap<Entity, T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<HashMap<Entity, T>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Marker(u8);
    impl Component for Marker {}

    #[derive(Debug, Clone, PartialEq)]
    struct Label(&'static str);
    impl Component for Label {}

    #[test]
    fn new_world_is_empty() {
        let world = World::new();
        assert_eq!(world.entity_count(), 0);
        assert!(world.get_all_entities_with_component::<Marker>().is_empty());
    }

    #[test]
    fn create_entity_hands_out_sequential_ids() {
        let mut world = World::new();
        assert_eq!(world.create_entity(), Entity(0));
        assert_eq!(world.create_entity(), Entity(1));
        assert_eq!(world.entity_count(), 2);
        assert!(world.is_entity_alive(Entity(1)));
        assert!(!world.is_entity_alive(Entity(2)));
    }

    #[test]
    fn add_get_and_overwrite_component() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.add_component(e, Marker(1)));
        assert_eq!(world.get_component::<Marker>(e), Some(&Marker(1)));

        assert!(world.add_component(e, Marker(9)));
        assert_eq!(world.get_component::<Marker>(e), Some(&Marker(9)));

        if let Some(m) = world.get_component_mut::<Marker>(e) {
            m.0 = 3;
        }
        assert_eq!(world.get_component::<Marker>(e), Some(&Marker(3)));
        // 別の型は独立してる
        assert!(world.get_component::<Label>(e).is_none());
    }

    #[test]
    fn add_component_to_dead_entity_is_ignored() {
        let mut world = World::new();
        assert!(!world.add_component(Entity(5), Marker(1)));
        assert!(world.get_component::<Marker>(Entity(5)).is_none());
    }

    #[test]
    fn entities_with_component_are_sorted() {
        let mut world = World::new();
        let ids: Vec<Entity> = (0..5).map(|_| world.create_entity()).collect();
        for e in ids.iter().rev().filter(|e| e.0 != 2) {
            world.add_component(*e, Marker(e.0 as u8));
        }
        assert_eq!(
            world.get_all_entities_with_component::<Marker>(),
            vec![Entity(0), Entity(1), Entity(3), Entity(4)]
        );
    }
}
