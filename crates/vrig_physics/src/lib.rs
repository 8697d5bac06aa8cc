//! Collision geometry descriptors for vrig
//!
//! The host engine owns the physics simulation. This crate only describes
//! collision volumes to it:
//! - Geometry descriptors (sphere, capsule, box)
//! - Collision shape descriptors (geometry + local transform + trigger flag)
//! - Body type selecting the rigid body component the shape attaches to

pub mod geometry;
pub mod collision_shape;

// Re-export commonly used types
pub use geometry::{BoxGeometry, CapsuleGeometry, Geometry, GeometryType, SphereGeometry};
pub use collision_shape::{BodyType, CollisionShape};
