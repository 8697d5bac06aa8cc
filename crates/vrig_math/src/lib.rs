//! Vector and matrix value types for the vrig VR rig
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - 2/3/4 component vectors
//! - [`Mat3`], [`Mat4`] - column matrices (`c0..c2` / `c0..c3`)
//! - [`MathType`], [`MathValue`] - arity tags and a tagged value for
//!   call sites that accept "any math value"
//!
//! The value types carry no arithmetic. Products, cross products and
//! normalization live in [`ops`], the math operations collaborator.

mod vec2;
mod vec3;
mod vec4;
mod mat3;
mod mat4;
mod value;
pub mod ops;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use value::{MathType, MathValue};
