mod sphere;
mod triangle;

use crate::{
    material::MaterialId,
    math::{Ray, Vector3},
};

pub use sphere::*;
pub use triangle::*;

/// How far a hit position is pushed off the surface along its normal.
pub const SURFACE_BIAS: f64 = 1e-5;

/// The result of a ray intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// The struck point, already nudged off the surface by [`SURFACE_BIAS`].
    pub position: Vector3,

    /// The unit surface normal at the struck point.
    pub normal: Vector3,

    /// Distance from the ray origin, measured along the normalized ray direction.
    pub distance: f64,
}

impl Hit {
    pub fn new(position: Vector3, normal: Vector3, distance: f64) -> Self {
        Self {
            position,
            normal,
            distance,
        }
    }
}

/// A trait that represents any type that can be intersected by a Ray.
pub trait Intersect {
    /// Find the intersection, if any, between the ray provided and this shape.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

/// A trait that represents any type that is a scene object, and can thus be viewed in the final render.
pub trait SceneObject: Intersect + Send + Sync {
    /// Grab a handle to this scene object's material.
    fn material(&self) -> MaterialId;
}

/// A borrowed scene primitive, as returned by the nearest-hit query.
#[derive(Clone, Copy, Debug)]
pub enum PrimitiveRef<'a> {
    Triangle(&'a Triangle),
    Sphere(&'a Sphere),
}

impl<'a> PrimitiveRef<'a> {
    pub fn material(self) -> MaterialId {
        match self {
            Self::Triangle(triangle) => triangle.material(),
            Self::Sphere(sphere) => sphere.material(),
        }
    }

    /// Whether this primitive encloses a volume. Only volumes change the medium a ray travels in.
    pub fn is_volume(self) -> bool {
        matches!(self, Self::Sphere(_))
    }

    /// The surface normal at `hit`, blended from vertex normals where the primitive has them.
    ///
    /// The result is not renormalized.
    pub fn surface_normal(self, hit: &Hit) -> Vector3 {
        match self {
            Self::Sphere(_) => hit.normal,
            Self::Triangle(triangle) => match triangle.normals {
                None => hit.normal,
                Some([a, b, c]) => {
                    let w = triangle.barycentric(hit.position);
                    a * w[0] + b * w[1] + c * w[2]
                }
            },
        }
    }

    /// The unit normal used for lighting at `hit`.
    pub fn shading_normal(self, hit: &Hit) -> Vector3 {
        self.surface_normal(hit).normalize()
    }
}
