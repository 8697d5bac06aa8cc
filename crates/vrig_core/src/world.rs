//! World container for entities
//!
//! The World owns every entity in the scene and is what scripts read and
//! write transforms through.

use slotmap::{new_key_type, SlotMap};
use vrig_input::SceneAccess;
use vrig_math::Mat4;

use crate::Entity;

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Uses generational indexing: once an entity is removed, old keys
    /// return None instead of pointing at whatever reuses the slot.
    pub struct EntityKey;
}

/// The scene graph containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        if let Some(name) = entity.name.as_deref() {
            if self.get_by_name(name).is_some() {
                log::warn!("Duplicate entity name '{}': lookups return the first match", name);
            }
        }
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it if it existed
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find an entity by name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    /// Keys of entities with pending changes
    pub fn dirty_entities(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.entities
            .iter()
            .filter(|(_, e)| e.is_dirty())
            .map(|(k, _)| k)
    }

    /// Clear dirty flags on every entity
    pub fn clear_all_dirty(&mut self) {
        for (_, entity) in self.entities.iter_mut() {
            entity.clear_dirty();
        }
    }
}

impl SceneAccess for World {
    type Handle = EntityKey;

    fn find_entity(&self, name: &str) -> Option<EntityKey> {
        self.get_by_name(name).map(|(k, _)| k)
    }

    fn local_transform(&self, entity: EntityKey) -> Option<Mat4> {
        self.entities.get(entity).map(|e| e.local_transform())
    }

    fn set_local_transform(&mut self, entity: EntityKey, transform: Mat4) -> bool {
        match self.entities.get_mut(entity) {
            Some(e) => {
                e.set_local_transform(transform);
                true
            }
            None => false,
        }
    }
}
