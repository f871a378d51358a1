use std::f64::consts::FRAC_PI_2;

use crate::math::{Matrix, Ray, Vector3};

/// Below this length the view direction is considered vertical and yaw is skipped.
const VERTICAL_EPSILON: f64 = 1e-6;

/// A Camera object. Represents a viewable area that a scene can be rendered to.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub width: u32,
    pub height: u32,

    /// Field of view in radians, measured vertically.
    pub fov: f64,

    pub look_from: Vector3,
    pub look_to: Vector3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov: FRAC_PI_2,
            look_from: Vector3::zero(),
            look_to: Vector3::new(0., 0., -1.),
        }
    }
}

impl Camera {
    /// The rotation taking camera space (looking down -Z, +Y up) into world space.
    ///
    /// Pitch is corrected first from the view direction's Y component, then yaw is applied from
    /// what remains in the XZ plane. Looking straight up or down only pitches.
    pub fn orientation(&self) -> Matrix {
        let dir = (self.look_to - self.look_from).normalize();
        let sin = dir.y;
        let cos = (1. - sin * sin).max(0.).sqrt();
        let pitch = Matrix::pitch(sin, cos);

        let flat = Vector3::new(dir.x, 0., dir.z).normalize();
        if flat.magnitude() < VERTICAL_EPSILON {
            return pitch;
        }

        Matrix::yaw(flat) * pitch
    }

    /// Create a ray generator for this camera.
    pub fn rays(&self) -> CameraRays {
        let half_height = (self.height / 2).max(1) as f64;
        CameraRays {
            origin: self.look_from,
            orientation: self.orientation(),
            scale: (self.fov / 2.).tan() / half_height,
            center_x: (self.width as f64 - 1.) / 2.,
            center_y: (self.height as f64 - 1.) / 2.,
        }
    }
}

/// Maps pixel coordinates to world-space rays for a fixed camera.
#[derive(Clone, Debug)]
pub struct CameraRays {
    origin: Vector3,
    orientation: Matrix,
    scale: f64,
    center_x: f64,
    center_y: f64,
}

impl CameraRays {
    /// The ray through pixel (`x`, `y`), where top-left of the image is (0, 0).
    pub fn ray_at(&self, x: u32, y: u32) -> Ray {
        let dx = (x as f64 - self.center_x) * self.scale;
        let dy = (y as f64 - self.center_y) * self.scale;
        let direction = self.orientation * Vector3::new(dx, -dy, -1.);
        Ray::new(self.origin, direction.normalize())
    }
}
