//! Arity tags and tagged math values

use serde::{Serialize, Deserialize};
use std::fmt;

use crate::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Arity tag of a math value, numbered as the host numbers them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MathType {
    Vec2 = 1,
    Vec3 = 2,
    Vec4 = 3,
    Mat3 = 4,
    Mat4 = 5,
}

impl MathType {
    /// Look up a tag by its host value
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Vec2),
            2 => Some(Self::Vec3),
            3 => Some(Self::Vec4),
            4 => Some(Self::Mat3),
            5 => Some(Self::Mat4),
            _ => None,
        }
    }

    /// Host value of this tag
    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// Any one of the five math value types
///
/// Lets a single call site accept whatever the caller has on hand, the
/// way `Vec3::from_value` and `Vec4::from_value` do.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MathValue {
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl MathValue {
    pub fn math_type(&self) -> MathType {
        match self {
            MathValue::Vec2(_) => MathType::Vec2,
            MathValue::Vec3(_) => MathType::Vec3,
            MathValue::Vec4(_) => MathType::Vec4,
            MathValue::Mat3(_) => MathType::Mat3,
            MathValue::Mat4(_) => MathType::Mat4,
        }
    }
}

impl From<Vec2> for MathValue {
    fn from(v: Vec2) -> Self {
        MathValue::Vec2(v)
    }
}

impl From<Vec3> for MathValue {
    fn from(v: Vec3) -> Self {
        MathValue::Vec3(v)
    }
}

impl From<Vec4> for MathValue {
    fn from(v: Vec4) -> Self {
        MathValue::Vec4(v)
    }
}

impl From<Mat3> for MathValue {
    fn from(m: Mat3) -> Self {
        MathValue::Mat3(m)
    }
}

impl From<Mat4> for MathValue {
    fn from(m: Mat4) -> Self {
        MathValue::Mat4(m)
    }
}

impl fmt::Display for MathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathValue::Vec2(v) => v.fmt(f),
            MathValue::Vec3(v) => v.fmt(f),
            MathValue::Vec4(v) => v.fmt(f),
            MathValue::Mat3(m) => m.fmt(f),
            MathValue::Mat4(m) => m.fmt(f),
        }
    }
}
