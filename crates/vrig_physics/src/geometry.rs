//! Collision geometry descriptors
//!
//! A closed set of shapes. The tag and payload cannot disagree because
//! the tag is derived from the enum variant. The host reserves tag 1 for
//! a plane shape it never supports, so there is no plane variant.

use serde::{Serialize, Deserialize};
use vrig_math::Vec3;

/// Default sphere radius
pub const DEFAULT_SPHERE_RADIUS: f32 = 0.5;
/// Default capsule half height
pub const DEFAULT_CAPSULE_HALF_HEIGHT: f32 = 0.5;
/// Default capsule radius
pub const DEFAULT_CAPSULE_RADIUS: f32 = 1.0;
/// Default box half extent on each axis
pub const DEFAULT_BOX_HALF_EXTENT: f32 = 0.5;

/// Shape tag with the host's numeric values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GeometryType {
    Sphere = 0,
    Capsule = 2,
    Box = 3,
}

impl GeometryType {
    /// Look up a tag by its host value. The reserved plane tag is rejected.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Sphere),
            2 => Some(Self::Capsule),
            3 => Some(Self::Box),
            _ => None,
        }
    }

    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// A sphere centered on the shape origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereGeometry {
    pub radius: f32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self { radius: DEFAULT_SPHERE_RADIUS }
    }
}

/// A capsule: a cylinder of `2 * half_height` capped by hemispheres
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapsuleGeometry {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for CapsuleGeometry {
    fn default() -> Self {
        Self {
            half_height: DEFAULT_CAPSULE_HALF_HEIGHT,
            radius: DEFAULT_CAPSULE_RADIUS,
        }
    }
}

/// An axis-aligned box given by its half extents
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub half_extent: Vec3,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            half_extent: Vec3::new(
                DEFAULT_BOX_HALF_EXTENT,
                DEFAULT_BOX_HALF_EXTENT,
                DEFAULT_BOX_HALF_EXTENT,
            ),
        }
    }
}

/// Collision geometry handed to the physics subsystem
///
/// Constructors take `impl Into<Option<f32>>`: pass `None` to get the
/// default for a parameter, or a value to keep it as-is. No validation is
/// performed, so zero or negative sizes go through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere(SphereGeometry),
    Capsule(CapsuleGeometry),
    Box(BoxGeometry),
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Sphere(SphereGeometry::default())
    }
}

impl Geometry {
    /// Sphere geometry (radius defaults to 0.5)
    pub fn sphere(radius: impl Into<Option<f32>>) -> Self {
        Geometry::Sphere(SphereGeometry {
            radius: radius.into().unwrap_or(DEFAULT_SPHERE_RADIUS),
        })
    }

    /// Capsule geometry (half height defaults to 0.5, radius to 1.0)
    pub fn capsule(half_height: impl Into<Option<f32>>, radius: impl Into<Option<f32>>) -> Self {
        Geometry::Capsule(CapsuleGeometry {
            half_height: half_height.into().unwrap_or(DEFAULT_CAPSULE_HALF_HEIGHT),
            radius: radius.into().unwrap_or(DEFAULT_CAPSULE_RADIUS),
        })
    }

    /// Box geometry from per-axis half extents (each defaults to 0.5)
    pub fn cuboid(
        x: impl Into<Option<f32>>,
        y: impl Into<Option<f32>>,
        z: impl Into<Option<f32>>,
    ) -> Self {
        let or_default = |v: Option<f32>| v.unwrap_or(DEFAULT_BOX_HALF_EXTENT);
        Geometry::Box(BoxGeometry {
            half_extent: Vec3::new(or_default(x.into()), or_default(y.into()), or_default(z.into())),
        })
    }

    /// The shape tag of this geometry
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Sphere(_) => GeometryType::Sphere,
            Geometry::Capsule(_) => GeometryType::Capsule,
            Geometry::Box(_) => GeometryType::Box,
        }
    }

    pub fn as_sphere(&self) -> Option<&SphereGeometry> {
        match self {
            Geometry::Sphere(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_capsule(&self) -> Option<&CapsuleGeometry> {
        match self {
            Geometry::Capsule(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxGeometry> {
        match self {
            Geometry::Box(b) => Some(b),
            _ => None,
        }
    }
}

impl From<SphereGeometry> for Geometry {
    fn from(s: SphereGeometry) -> Self {
        Geometry::Sphere(s)
    }
}

impl From<CapsuleGeometry> for Geometry {
    fn from(c: CapsuleGeometry) -> Self {
        Geometry::Capsule(c)
    }
}

impl From<BoxGeometry> for Geometry {
    fn from(b: BoxGeometry) -> Self {
        Geometry::Box(b)
    }
}
