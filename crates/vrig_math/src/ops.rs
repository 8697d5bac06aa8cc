//! Math operations collaborator
//!
//! The value types in this crate are plain data. Everything that
//! computes lives here as free functions with standard Euclidean
//! semantics: right-handed cross product, column-major matrix products.

use crate::{Mat4, Vec3, Vec4};

/// Identity matrix
#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: &Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m.c0.x * v.x + m.c1.x * v.y + m.c2.x * v.z + m.c3.x * v.w,
        m.c0.y * v.x + m.c1.y * v.y + m.c2.y * v.z + m.c3.y * v.w,
        m.c0.z * v.x + m.c1.z * v.y + m.c2.z * v.z + m.c3.z * v.w,
        m.c0.w * v.x + m.c1.w * v.y + m.c2.w * v.z + m.c3.w * v.w,
    )
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    Mat4::new(
        transform(a, b.c0),
        transform(a, b.c1),
        transform(a, b.c2),
        transform(a, b.c3),
    )
}

/// Component-wise sum of two matrices
pub fn add(a: &Mat4, b: &Mat4) -> Mat4 {
    zip_columns(a, b, |x, y| x + y)
}

/// Component-wise difference of two matrices
pub fn subtract(a: &Mat4, b: &Mat4) -> Mat4 {
    zip_columns(a, b, |x, y| x - y)
}

fn zip_columns(a: &Mat4, b: &Mat4, f: impl Fn(f32, f32) -> f32) -> Mat4 {
    let (a, b) = (a.to_cols_array(), b.to_cols_array());
    let mut out = [[0.0f32; 4]; 4];
    for (col, (ca, cb)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        for (dst, (x, y)) in col.iter_mut().zip(ca.iter().zip(cb.iter())) {
            *dst = f(*x, *y);
        }
    }
    Mat4::from_cols_array(out)
}

/// Transpose a matrix
pub fn transpose(m: &Mat4) -> Mat4 {
    let a = m.to_cols_array();
    Mat4::from_cols_array([
        [a[0][0], a[1][0], a[2][0], a[3][0]],
        [a[0][1], a[1][1], a[2][1], a[3][1]],
        [a[0][2], a[1][2], a[2][2], a[3][2]],
        [a[0][3], a[1][3], a[2][3], a[3][3]],
    ])
}

/// Invert a matrix by Gauss-Jordan elimination with partial pivoting
///
/// Returns `None` when the matrix is singular.
#[allow(clippy::needless_range_loop)]
pub fn inverse(m: &Mat4) -> Option<Mat4> {
    // Work row-major: rows[r][c] is row r of column c
    let cols = m.to_cols_array();
    let mut rows = [[0.0f32; 4]; 4];
    let mut inv = [[0.0f32; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            rows[r][c] = cols[c][r];
        }
        inv[r][r] = 1.0;
    }

    for col in 0..4 {
        let pivot = (col..4)
            .max_by(|&a, &b| rows[a][col].abs().total_cmp(&rows[b][col].abs()))
            .unwrap_or(col);
        if rows[pivot][col].abs() < 1e-8 {
            return None;
        }
        rows.swap(col, pivot);
        inv.swap(col, pivot);

        let scale = 1.0 / rows[col][col];
        for c in 0..4 {
            rows[col][c] *= scale;
            inv[col][c] *= scale;
        }

        for r in 0..4 {
            if r == col {
                continue;
            }
            let factor = rows[r][col];
            if factor == 0.0 {
                continue;
            }
            for c in 0..4 {
                rows[r][c] -= factor * rows[col][c];
                inv[r][c] -= factor * inv[col][c];
            }
        }
    }

    let mut out = [[0.0f32; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            out[c][r] = inv[r][c];
        }
    }
    Some(Mat4::from_cols_array(out))
}

/// Right-handed cross product
#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Dot product
#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Euclidean length
#[inline]
pub fn length(v: Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Normalize to unit length
///
/// The zero vector stays zero.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    if len > 0.0 {
        Vec3::new(v.x / len, v.y / len, v.z / len)
    } else {
        Vec3::ZERO
    }
}

/// Create a rotation matrix in the plane spanned by two axes.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Axis indices (0=X, 1=Y, 2=Z); positive angles turn `p1` toward `p2`
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = Mat4::IDENTITY.to_cols_array();
    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    Mat4::from_cols_array(m)
}

/// Euler rotation, applied as Rx * Ry * Rz (angles in radians)
pub fn rotation(euler: Vec3) -> Mat4 {
    let rx = plane_rotation(euler.x, 1, 2);
    let ry = plane_rotation(euler.y, 2, 0);
    let rz = plane_rotation(euler.z, 0, 1);
    mul(&mul(&rx, &ry), &rz)
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.set_translation(t);
    m
}

/// Non-uniform scale matrix
pub fn scale(s: Vec3) -> Mat4 {
    Mat4::new(
        Vec4::new(s.x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, s.y, 0.0, 0.0),
        Vec4::new(0.0, 0.0, s.z, 0.0),
        Vec4::W,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat_approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.columns().iter().zip(b.columns().iter()).all(|(x, y)| vec_approx_eq(*x, *y))
    }

    #[test]
    fn test_transform_identity() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!(vec_approx_eq(transform(&identity(), v), v));
    }

    #[test]
    fn test_direction_ignores_translation() {
        let m = translation(Vec3::new(5.0, 6.0, 7.0));
        assert!(vec_approx_eq(transform(&m, Vec4::X), Vec4::X));
        let p = transform(&m, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(vec_approx_eq(p, Vec4::new(6.0, 6.0, 7.0, 1.0)));
    }

    #[test]
    fn test_cross_is_right_handed() {
        assert_eq!(cross(Vec3::X, Vec3::Y), Vec3::Z);
        assert_eq!(cross(Vec3::Y, Vec3::Z), Vec3::X);
        assert_eq!(cross(Vec3::Z, Vec3::X), Vec3::Y);
        assert_eq!(cross(Vec3::X, Vec3::X), Vec3::ZERO);
    }

    #[test]
    fn test_normalize() {
        let n = normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!(approx_eq(n.x, 0.6));
        assert!(approx_eq(n.z, 0.8));
        assert!(approx_eq(length(n), 1.0));
        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_plane_rotation_xy() {
        let m = plane_rotation(FRAC_PI_2, 0, 1);
        let result = transform(&m, Vec4::X);
        assert!(vec_approx_eq(result, Vec4::Y), "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_yaw_turns_z_toward_x() {
        let m = rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let result = transform(&m, Vec4::Z);
        assert!(vec_approx_eq(result, Vec4::X), "Z should become X, got {:?}", result);
        let result = transform(&m, Vec4::X);
        assert!(vec_approx_eq(result, Vec4::new(0.0, 0.0, -1.0, 0.0)),
            "X should become -Z, got {:?}", result);
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation(Vec3::new(0.3, 0.5, -0.2));
        assert!(mat_approx_eq(&mul(&identity(), &a), &a));
        assert!(mat_approx_eq(&mul(&a, &identity()), &a));
    }

    #[test]
    fn test_add_subtract() {
        let a = scale(Vec3::new(2.0, 3.0, 4.0));
        let sum = add(&a, &identity());
        assert_eq!(sum.c0.x, 3.0);
        assert_eq!(sum.c3.w, 2.0);
        assert!(mat_approx_eq(&subtract(&sum, &identity()), &a));
    }

    #[test]
    fn test_inverse_of_affine() {
        let m = mul(
            &translation(Vec3::new(1.0, -2.0, 3.0)),
            &rotation(Vec3::new(0.4, 1.1, -0.7)),
        );
        let inv = inverse(&m).expect("affine transform should be invertible");
        assert!(mat_approx_eq(&mul(&inv, &m), &identity()));
        assert!(mat_approx_eq(&mul(&m, &inv), &identity()));
    }

    #[test]
    fn test_inverse_of_rotation_is_transpose() {
        let r = rotation(Vec3::new(0.2, -0.9, 1.3));
        let inv = inverse(&r).expect("rotation should be invertible");
        assert!(mat_approx_eq(&inv, &transpose(&r)));
    }

    #[test]
    fn test_inverse_singular() {
        assert!(inverse(&Mat4::ZERO).is_none());
        assert!(inverse(&scale(Vec3::new(1.0, 0.0, 1.0))).is_none());
    }
}
