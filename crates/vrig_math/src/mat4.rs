//! 4x4 column matrix
//!
//! A Mat4 whose `c0..c2` columns hold a rotation basis and whose `c3`
//! column holds a translation is the affine transform exchanged with the
//! host engine. Layout is column-major, matching what the host expects.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::{Vec3, Vec4};

/// 4x4 matrix stored as four column vectors
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    pub c0: Vec4,
    pub c1: Vec4,
    pub c2: Vec4,
    pub c3: Vec4,
}

impl Mat4 {
    pub const ZERO: Self = Self {
        c0: Vec4::ZERO,
        c1: Vec4::ZERO,
        c2: Vec4::ZERO,
        c3: Vec4::ZERO,
    };

    pub const IDENTITY: Self = Self {
        c0: Vec4::X,
        c1: Vec4::Y,
        c2: Vec4::Z,
        c3: Vec4::W,
    };

    #[inline]
    pub const fn new(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { c0, c1, c2, c3 }
    }

    /// Build from a column list, missing columns are zero-filled
    pub fn from_columns(columns: &[Vec4]) -> Self {
        let at = |i: usize| columns.get(i).copied().unwrap_or(Vec4::ZERO);
        Self::new(at(0), at(1), at(2), at(3))
    }

    /// Build from a column-major `[[f32; 4]; 4]` array
    pub fn from_cols_array(m: [[f32; 4]; 4]) -> Self {
        Self::new(m[0].into(), m[1].into(), m[2].into(), m[3].into())
    }

    /// Column-major array form
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        [
            self.c0.to_array(),
            self.c1.to_array(),
            self.c2.to_array(),
            self.c3.to_array(),
        ]
    }

    /// Columns in order c0..c3
    #[inline]
    pub fn columns(&self) -> [Vec4; 4] {
        [self.c0, self.c1, self.c2, self.c3]
    }

    /// Translation part (xyz of `c3`)
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.c3.xyz()
    }

    /// Overwrite the translation part, keeping `c3.w`
    #[inline]
    pub fn set_translation(&mut self, t: Vec3) {
        self.c3.x = t.x;
        self.c3.y = t.y;
        self.c3.z = t.z;
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.c0)?;
        writeln!(f, "{}", self.c1)?;
        writeln!(f, "{}", self.c2)?;
        write!(f, "{}", self.c3)
    }
}
