//! 4D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::{MathValue, Vec3};

/// 4D Vector with x, y, z, w components
///
/// With w = 0 the vector is a direction and ignores the translation
/// column of a [`Mat4`](crate::Mat4); with w = 1 it is a point.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Build from a component list, missing trailing components become 0
    #[inline]
    pub fn from_components(values: &[f32]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2), at(3))
    }

    /// Extend a Vec3 with an explicit w component
    #[inline]
    pub const fn extend(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Build from any math value
    ///
    /// - Vec4: copied, `w` is ignored
    /// - Vec3: extended with `w` (absent means 0)
    /// - anything else: [`Vec4::ZERO`]
    pub fn from_value(value: &MathValue, w: Option<f32>) -> Self {
        match value {
            MathValue::Vec4(v) => *v,
            MathValue::Vec3(v) => Self::extend(*v, w.unwrap_or(0.0)),
            _ => Self::ZERO,
        }
    }

    /// Extract the xyz components
    #[inline]
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Components as an array
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<Vec3> for Vec4 {
    /// Direction extension (w = 0)
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::extend(v, 0.0)
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {} {}]", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat4, Vec2};

    #[test]
    fn test_new() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.w, 4.0);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Vec4::default(), Vec4::ZERO);
        assert_eq!(Vec4::from_components(&[]), Vec4::ZERO);
    }

    #[test]
    fn test_extend() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Vec4::extend(v, 5.0), Vec4::new(1.0, 2.0, 3.0, 5.0));
        assert_eq!(Vec4::from(v), Vec4::new(1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_from_value_vec3_defaults_w() {
        let v3 = MathValue::Vec3(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec4::from_value(&v3, None), Vec4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(Vec4::from_value(&v3, Some(-1.0)), Vec4::new(1.0, 2.0, 3.0, -1.0));
    }

    #[test]
    fn test_from_value_vec4_is_copy() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Vec4::from_value(&MathValue::Vec4(v), Some(9.0)), v);
    }

    #[test]
    fn test_from_value_unsupported_shape_is_zero() {
        assert_eq!(Vec4::from_value(&MathValue::Vec2(Vec2::new(1.0, 1.0)), Some(1.0)), Vec4::ZERO);
        assert_eq!(Vec4::from_value(&MathValue::Mat4(Mat4::IDENTITY), None), Vec4::ZERO);
    }

    #[test]
    fn test_xyz() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 0.0).to_string(), "[1 2 3 0]");
    }
}
