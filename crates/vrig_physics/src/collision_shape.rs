//! Collision shape descriptors
//!
//! A collision shape pairs a [`Geometry`] with a local transform relative
//! to its owning body and a trigger flag.

use serde::{Serialize, Deserialize};
use vrig_math::Mat4;

use crate::geometry::{BoxGeometry, CapsuleGeometry, Geometry, GeometryType, SphereGeometry};

/// Which rigid body component a collision shape is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Simulated body, moved by the physics subsystem
    #[default]
    Dynamic,
    /// Immovable body (floors, walls)
    Static,
}

/// Collision shape handed to the physics subsystem at entity creation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    geometry: Geometry,
    /// Offset of the shape relative to its body
    #[serde(default = "identity")]
    pub local_transform: Mat4,
    /// Trigger shapes report overlaps but do not collide
    #[serde(default)]
    pub is_trigger: bool,
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

impl Default for CollisionShape {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}

impl CollisionShape {
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            local_transform: Mat4::IDENTITY,
            is_trigger: false,
        }
    }

    /// Builder: set the local transform
    pub fn with_local_transform(mut self, transform: Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    /// Builder: mark as trigger
    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }

    /// Replace the geometry, tag and payload together
    pub fn set_geometry(&mut self, geometry: impl Into<Geometry>) {
        self.geometry = geometry.into();
    }

    /// Sphere payload, or `None` if the shape holds another geometry
    pub fn sphere(&self) -> Option<&SphereGeometry> {
        let sphere = self.geometry.as_sphere();
        if sphere.is_none() {
            log::warn!("Sphere geometry requested from a {:?} shape", self.geometry_type());
        }
        sphere
    }

    /// Capsule payload, or `None` if the shape holds another geometry
    pub fn capsule(&self) -> Option<&CapsuleGeometry> {
        let capsule = self.geometry.as_capsule();
        if capsule.is_none() {
            log::warn!("Capsule geometry requested from a {:?} shape", self.geometry_type());
        }
        capsule
    }

    /// Box payload, or `None` if the shape holds another geometry
    pub fn cuboid(&self) -> Option<&BoxGeometry> {
        let cuboid = self.geometry.as_box();
        if cuboid.is_none() {
            log::warn!("Box geometry requested from a {:?} shape", self.geometry_type());
        }
        cuboid
    }
}
