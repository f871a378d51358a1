use std::ops::Mul;

use super::Vector3;

/// A 3x3 row-major rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
}

impl Matrix {
    /// Create a new matrix from its three rows.
    pub fn from_rows(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Matrix {
            m00: a.x,
            m01: a.y,
            m02: a.z,
            m10: b.x,
            m11: b.y,
            m12: b.z,
            m20: c.x,
            m21: c.y,
            m22: c.z,
        }
    }

    /// Rotation about the X axis, given the sine and cosine of the angle.
    #[rustfmt::skip]
    pub fn pitch(sin: f64, cos: f64) -> Self {
        Self::from_rows(
            Vector3::new(1., 0., 0.),
            Vector3::new(0., cos, -sin),
            Vector3::new(0., sin, cos),
        )
    }

    /// Rotation about the Y axis that maps -Z onto `forward`.
    ///
    /// **Note:** `forward` is expected to be normalized and to lie in the XZ plane.
    #[rustfmt::skip]
    pub fn yaw(forward: Vector3) -> Self {
        let back = -forward;
        Self::from_rows(
            Vector3::new(back.z, 0., back.x),
            Vector3::new(0., 1., 0.),
            Vector3::new(-back.x, 0., back.z),
        )
    }

    /// Get the rowed components of this matrix.
    #[rustfmt::skip]
    pub fn rowed_components(self) -> [[f64; 3]; 3] {
        [
            [self.m00, self.m01, self.m02],
            [self.m10, self.m11, self.m12],
            [self.m20, self.m21, self.m22],
        ]
    }

    pub fn row(self, i: usize) -> Vector3 {
        self.rowed_components()[i].into()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::from_rows(
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
            Vector3::new(0., 0., 1.),
        )
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let a = self.rowed_components();
        let b = rhs.rowed_components();
        let mut o = [[0.; 3]; 3];

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    o[i][j] += a[i][k] * b[k][j];
                }
            }
        }

        Self::from_rows(o[0].into(), o[1].into(), o[2].into())
    }
}

impl Mul<Vector3> for Matrix {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        Vector3::new(self.row(0).dot(rhs), self.row(1).dot(rhs), self.row(2).dot(rhs))
    }
}
