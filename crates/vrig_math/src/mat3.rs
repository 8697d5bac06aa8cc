//! 3x3 column matrix

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::Vec3;

/// 3x3 matrix stored as three column vectors
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    pub c0: Vec3,
    pub c1: Vec3,
    pub c2: Vec3,
}

impl Mat3 {
    pub const ZERO: Self = Self { c0: Vec3::ZERO, c1: Vec3::ZERO, c2: Vec3::ZERO };
    pub const IDENTITY: Self = Self { c0: Vec3::X, c1: Vec3::Y, c2: Vec3::Z };

    #[inline]
    pub const fn new(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { c0, c1, c2 }
    }

    /// Build from a column list, missing columns are zero-filled
    pub fn from_columns(columns: &[Vec3]) -> Self {
        let at = |i: usize| columns.get(i).copied().unwrap_or(Vec3::ZERO);
        Self::new(at(0), at(1), at(2))
    }

    /// Columns in order c0..c2
    #[inline]
    pub fn columns(&self) -> [Vec3; 3] {
        [self.c0, self.c1, self.c2]
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.c0)?;
        writeln!(f, "{}", self.c1)?;
        write!(f, "{}", self.c2)
    }
}
