use log::debug;

use crate::{
    lighting,
    material::MaterialStore,
    math::{reflect, refract, Ray, Vector3},
    object::{Hit, Intersect, PrimitiveRef, Sphere, Triangle},
};

/// Secondary and shadow rays start this far off the surface so they do not hit it again.
pub const RAY_OFFSET: f64 = 1e-4;

/// Which side of a refractive surface a ray segment travels on.
///
/// Crossing the surface of a sphere flips the state. Triangles are treated as infinitely thin
/// interfaces and leave it unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Medium {
    Outside,
    Inside,
}

impl Medium {
    pub fn toggled(self) -> Self {
        match self {
            Self::Outside => Self::Inside,
            Self::Inside => Self::Outside,
        }
    }

    /// The medium on the far side of `primitive`'s surface.
    pub fn crossing(self, primitive: PrimitiveRef<'_>) -> Self {
        if primitive.is_volume() {
            self.toggled()
        } else {
            self
        }
    }
}

/// A scene, which contains lists of primitives, lights, and the materials they use.
///
/// Triangles are stored before spheres, which fixes the order of the nearest-hit scan.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub triangles: Vec<Triangle>,
    pub spheres: Vec<Sphere>,
    pub lights: Vec<lighting::Point>,
    pub materials: MaterialStore,
}

impl Scene {
    pub fn new(materials: MaterialStore) -> Self {
        Self {
            materials,
            ..Default::default()
        }
    }

    pub fn log_summary(&self) {
        debug!(
            "scene: {} triangles, {} spheres, {} lights, {} materials",
            self.triangles.len(),
            self.spheres.len(),
            self.lights.len(),
            self.materials.len()
        );
    }

    /// Find the nearest primitive struck by a ray.
    ///
    /// Every triangle and then every sphere is tested; on an exact tie in distance the one
    /// scanned first wins.
    pub fn cast_ray(&self, ray: &Ray) -> Option<(PrimitiveRef<'_>, Hit)> {
        let triangles = self
            .triangles
            .iter()
            .filter_map(|t| t.intersect(ray).map(|hit| (PrimitiveRef::Triangle(t), hit)));
        let spheres = self
            .spheres
            .iter()
            .filter_map(|s| s.intersect(ray).map(|hit| (PrimitiveRef::Sphere(s), hit)));

        triangles
            .chain(spheres)
            .fold(None, |nearest, (primitive, hit)| match nearest {
                Some((_, best)) if best.distance <= hit.distance => nearest,
                _ => Some((primitive, hit)),
            })
    }

    /// Trace out a ray, getting the radiance arriving along it.
    ///
    /// `depth` is the number of bounces still allowed; at zero only local lighting is computed.
    /// The result is linear and unbounded; tone mapping happens when the frame is assembled.
    pub fn trace_ray(&self, ray: &Ray, depth: u32, medium: Medium) -> Vector3 {
        let (primitive, hit) = match self.cast_ray(ray) {
            Some(r) => r,
            None => return Vector3::zero(),
        };

        let material = self.materials.get(primitive.material());
        let normal = primitive.shading_normal(&hit);

        // local lighting
        let mut color = material.ambient + material.emission;
        let mut local = Vector3::zero();
        for light in self.lights.iter() {
            local += light
                .shading(ray, hit.position, normal, material, self)
                .total();
        }
        color += local * material.local_weight();

        if depth == 0 {
            return color;
        }

        let inward = hit.position - normal * RAY_OFFSET;
        let outward = hit.position + normal * RAY_OFFSET;

        match medium {
            Medium::Inside => {
                // keep going through the solid, leaving it where the surface allows
                if let Some(dir) = refract(ray.direction, normal, material.refraction_index) {
                    color += self.trace_ray(
                        &Ray::new(inward, dir),
                        depth - 1,
                        medium.crossing(primitive),
                    );
                }
            }
            Medium::Outside => {
                if material.reflection_weight() != 0. {
                    let reflected = Ray::new(outward, reflect(ray.direction, normal));
                    color += self.trace_ray(&reflected, depth - 1, medium)
                        * material.reflection_weight();
                }

                if material.transmission_weight() != 0. {
                    let eta = 1. / material.refraction_index;
                    if let Some(dir) = refract(ray.direction, normal, eta) {
                        color += self.trace_ray(
                            &Ray::new(inward, dir),
                            depth - 1,
                            medium.crossing(primitive),
                        ) * material.transmission_weight();
                    }
                }
            }
        }

        color
    }
}
