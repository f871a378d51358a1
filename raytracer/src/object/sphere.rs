use crate::{
    material::MaterialId,
    math::{Ray, Vector3},
};

use super::{Hit, Intersect, SceneObject, SURFACE_BIAS};

/// Slack allowed when deciding whether the ray line passes within the radius.
const GRAZE_TOLERANCE: f64 = 1e-6;

/// Hits closer than this along the ray are treated as the surface the ray left from.
const MIN_DISTANCE: f64 = 1e-4;

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let dir = ray.direction.normalize();
        let center = self.center - ray.origin;

        // closest approach of the ray line to the center
        let closest = dir * (dir.dot(center) / dir.dot(dir));
        let miss = (closest - center).magnitude();
        if miss > self.radius + GRAZE_TOLERANCE {
            return None;
        }

        let half_chord = (self.radius * self.radius - miss * miss).max(0.).sqrt();
        let near = closest - dir * half_chord;
        let far = closest + dir * half_chord;

        // from the inside, the normal faces the center
        let orientation = if center.magnitude() < self.radius { -1. } else { 1. };

        [near, far]
            .iter()
            .find(|p| p.dot(dir) > MIN_DISTANCE)
            .map(|&p| {
                let normal = (p - center).normalize() * orientation;
                Hit::new(
                    p + ray.origin + normal * SURFACE_BIAS,
                    normal,
                    p.magnitude(),
                )
            })
    }
}

impl SceneObject for Sphere {
    fn material(&self) -> MaterialId {
        self.material
    }
}
