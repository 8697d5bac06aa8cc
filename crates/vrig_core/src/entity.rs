//! Entity and EntityTemplate types
//!
//! An Entity is a named scene node with a local transform, a set of
//! component types and an optional collision shape.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use vrig_math::{ops, Mat4, Vec3};
use vrig_physics::{BodyType, CollisionShape};

use crate::component::{ComponentSet, ComponentType};

bitflags! {
    /// Flags indicating which parts of an entity have changed
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Local transform has changed
        const TRANSFORM = 1 << 0;
        /// Component set or collision shape has changed
        const COMPONENTS = 1 << 1;
        /// All flags set
        const ALL = Self::TRANSFORM.bits() | Self::COMPONENTS.bits();
    }
}

/// A node in the scene
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    local_transform: Mat4,
    components: ComponentSet,
    collision_shape: Option<CollisionShape>,
    dirty: DirtyFlags,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Create an unnamed entity at the origin
    pub fn new() -> Self {
        Self {
            name: None,
            local_transform: Mat4::IDENTITY,
            components: ComponentSet::empty(),
            collision_shape: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the starting local transform
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    /// Add a component type
    pub fn with_component(mut self, component: ComponentType) -> Self {
        self.components |= component.into();
        self
    }

    /// Attach a collision shape on a rigid body of the given type
    pub fn with_collision_shape(mut self, shape: CollisionShape, body: BodyType) -> Self {
        self.set_collision_shape(shape, body);
        self
    }

    #[inline]
    pub fn local_transform(&self) -> Mat4 {
        self.local_transform
    }

    #[inline]
    pub fn local_translation(&self) -> Vec3 {
        self.local_transform.translation()
    }

    /// Set the local transform and mark it as dirty
    pub fn set_local_transform(&mut self, transform: Mat4) {
        self.local_transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the local translation, keeping the rotation basis
    pub fn set_local_translation(&mut self, translation: Vec3) {
        self.local_transform.set_translation(translation);
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    #[inline]
    pub fn components(&self) -> ComponentSet {
        self.components
    }

    pub fn has_component(&self, component: ComponentType) -> bool {
        self.components.has(component)
    }

    pub fn add_component(&mut self, component: ComponentType) {
        self.components |= component.into();
        self.mark_dirty(DirtyFlags::COMPONENTS);
    }

    pub fn remove_component(&mut self, component: ComponentType) {
        self.components.remove(component.into());
        self.mark_dirty(DirtyFlags::COMPONENTS);
    }

    pub fn collision_shape(&self) -> Option<&CollisionShape> {
        self.collision_shape.as_ref()
    }

    /// Attach a collision shape, replacing any previous one and its body
    pub fn set_collision_shape(&mut self, shape: CollisionShape, body: BodyType) {
        self.components.remove(ComponentSet::DYNAMIC_BODY | ComponentSet::STATIC_BODY);
        self.components |= match body {
            BodyType::Dynamic => ComponentSet::DYNAMIC_BODY,
            BodyType::Static => ComponentSet::STATIC_BODY,
        };
        self.collision_shape = Some(shape);
        self.mark_dirty(DirtyFlags::COMPONENTS);
    }

    /// Body type carrying the collision shape, if any
    pub fn body_type(&self) -> Option<BodyType> {
        if self.components.contains(ComponentSet::DYNAMIC_BODY) {
            Some(BodyType::Dynamic)
        } else if self.components.contains(ComponentSet::STATIC_BODY) {
            Some(BodyType::Static)
        } else {
            None
        }
    }

    // --- Dirty tracking methods ---

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}

/// A serializable entity template
///
/// Transforms are written as a position plus Euler XYZ rotation in
/// radians, which reads better in scene files than a raw matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Optional name for this entity (for lookup)
    #[serde(default)]
    pub name: Option<String>,
    /// Local position [x, y, z]
    #[serde(default)]
    pub position: [f32; 3],
    /// Local Euler rotation [x, y, z] in radians
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Component types attached at creation
    #[serde(default)]
    pub components: Vec<ComponentType>,
    /// Collision shape and the body carrying it
    #[serde(default)]
    pub collider: Option<(CollisionShape, BodyType)>,
}

impl EntityTemplate {
    /// Create an unnamed template at the origin
    pub fn new() -> Self {
        Self {
            name: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            components: Vec::new(),
            collider: None,
        }
    }

    /// Set the name of this template
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = [x, y, z];
        self
    }

    pub fn with_component(mut self, component: ComponentType) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_collider(mut self, shape: CollisionShape, body: BodyType) -> Self {
        self.collider = Some((shape, body));
        self
    }

    /// Local transform described by this template
    pub fn transform(&self) -> Mat4 {
        ops::mul(
            &ops::translation(Vec3::from(self.position)),
            &ops::rotation(Vec3::from(self.rotation)),
        )
    }

    /// Convert this template to an Entity
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::new().with_transform(self.transform());
        if let Some(ref name) = self.name {
            entity = entity.with_name(name.clone());
        }
        for component in &self.components {
            entity = entity.with_component(*component);
        }
        if let Some((shape, body)) = self.collider {
            entity = entity.with_collision_shape(shape, body);
        }
        entity
    }
}

impl Default for EntityTemplate {
    fn default() -> Self {
        Self::new()
    }
}
