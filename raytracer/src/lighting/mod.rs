mod point;

use crate::math::Vector3;

pub use point::*;

/// The result of a light's influence on a ray intersection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightShading {
    pub diffuse: Vector3,
    pub specular: Vector3,
}

impl LightShading {
    pub fn new(diffuse: Vector3, specular: Vector3) -> Self {
        Self { diffuse, specular }
    }

    pub fn total(&self) -> Vector3 {
        self.diffuse + self.specular
    }
}
