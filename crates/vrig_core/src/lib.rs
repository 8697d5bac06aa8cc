//! Core types for the vrig host engine
//!
//! This crate provides the host side that the locomotion controller talks to:
//!
//! - [`ComponentType`] / [`ComponentSet`] - Component type codes shared with the host
//! - [`Entity`] - A named scene node with a local transform and components
//! - [`World`] - Container for all entities, addressable by name
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`EntityTemplate`] / [`Scene`] - Loadable/saveable scene description
//! - [`Script`] / [`ScriptHost`] - Lifecycle callbacks and their dispatcher

mod component;
mod entity;
mod world;
mod scene;
mod script;

pub use component::{ComponentSet, ComponentType};
pub use entity::{DirtyFlags, Entity, EntityTemplate};
pub use world::{EntityKey, World};
pub use scene::{Scene, SceneLoadError, SceneSaveError};
pub use script::{Script, ScriptError, ScriptHost, ScriptKey};

// Re-export commonly used types for convenience
pub use vrig_math::{Mat4, Vec3, Vec4};
pub use vrig_physics::{BodyType, CollisionShape, Geometry};
pub use vrig_input::{InputEvent, LocomotionController, LocomotionSettings};
