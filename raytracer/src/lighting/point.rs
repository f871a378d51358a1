use crate::{
    material::Material,
    math::{reflect, Ray, Vector3},
    scene::{Scene, RAY_OFFSET},
};

use super::LightShading;

/// Blockers this close to the light's own distance do not cast a shadow.
pub const SHADOW_TOLERANCE: f64 = 1e-3;

/// A point light, which is a light that emits in all directions from a specified position.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// The position in space of this light.
    pub position: Vector3,

    /// The RGB intensity of this light.
    pub intensity: Vector3,
}

impl Point {
    pub fn new(position: Vector3, intensity: Vector3) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Whether this light reaches `position` on a surface with the given `normal`.
    ///
    /// The shadow ray travels from the light toward the point, nudged off the surface, and only
    /// blockers clearly in front of the point count.
    pub fn illuminates(&self, position: Vector3, normal: Vector3, scene: &Scene) -> bool {
        let shadow_ray = Ray::between(self.position, position + normal * RAY_OFFSET);

        match scene.cast_ray(&shadow_ray) {
            None => true,
            Some((_, blocker)) => {
                blocker.distance > (position - self.position).magnitude() - SHADOW_TOLERANCE
            }
        }
    }

    /// Diffuse and specular light arriving at `position`, seen along `ray`.
    pub fn shading(
        &self,
        ray: &Ray,
        position: Vector3,
        normal: Vector3,
        material: &Material,
        scene: &Scene,
    ) -> LightShading {
        if !self.illuminates(position, normal, scene) {
            return LightShading::default();
        }

        let to_light = (self.position - position).normalize();
        let diffuse = material.diffuse * self.intensity * normal.dot(to_light).max(0.);

        let reflected = reflect(-to_light, normal);
        let to_eye = (ray.origin - position).normalize();
        let highlight = reflected
            .dot(to_eye)
            .max(0.)
            .powf(material.specular_exponent);
        let specular = material.specular * self.intensity * highlight;

        LightShading::new(diffuse, specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        material::{MaterialId, MaterialStore},
        object::{Sphere, Triangle},
    };

    fn floor(material: MaterialId) -> [Triangle; 2] {
        let (a, b, c, d) = (
            Vector3::new(-10., 0., -10.),
            Vector3::new(10., 0., -10.),
            Vector3::new(10., 0., 10.),
            Vector3::new(-10., 0., 10.),
        );
        [
            Triangle::flat([a, b, c], material),
            Triangle::flat([a, c, d], material),
        ]
    }

    fn up() -> Vector3 {
        Vector3::new(0., 1., 0.)
    }

    fn white() -> Material {
        Material {
            diffuse: Vector3::new(1., 1., 1.),
            specular: Vector3::new(1., 1., 1.),
            specular_exponent: 1.,
            ..Material::named("white")
        }
    }

    #[test]
    fn test_unblocked_light_shades() {
        let mut scene = Scene::new(MaterialStore::new());
        let id = scene.materials.insert(white());
        scene.triangles.extend(floor(id));

        let light = Point::new(Vector3::new(2., 2., -3.), Vector3::new(1., 1., 1.));
        let normal = up();
        let position = Vector3::new(2., 1e-5, -3.);
        assert!(light.illuminates(position, normal, &scene));

        let ray = Ray::new(Vector3::new(2., 2., -3.), Vector3::new(0., -1., 0.));
        let shading = light.shading(&ray, position, normal, scene.materials.get(id), &scene);
        assert!((shading.diffuse.x - 1.).abs() < 1e-9);
        // eye sits right at the light, so the highlight is at full strength
        assert!((shading.specular.y - 1.).abs() < 1e-9);
    }

    #[test]
    fn test_blocker_casts_shadow() {
        let mut scene = Scene::new(MaterialStore::new());
        let id = scene.materials.insert(white());
        scene.triangles.extend(floor(id));
        scene.spheres.push(Sphere::new(Vector3::new(2., 2., -3.), 0.5, id));

        let light = Point::new(Vector3::new(2., 4., -3.), Vector3::new(1., 1., 1.));
        let position = Vector3::new(2., 1e-5, -3.);
        assert!(!light.illuminates(position, up(), &scene));

        let ray = Ray::new(Vector3::new(3., 3., 0.), Vector3::new(-1., -1., 0.));
        let shading = light.shading(&ray, position, up(), scene.materials.get(id), &scene);
        assert_eq!(shading, LightShading::default());
    }

    #[test]
    fn test_blocker_behind_light_is_ignored() {
        let mut scene = Scene::new(MaterialStore::new());
        let id = scene.materials.insert(white());
        scene.triangles.extend(floor(id));
        // sphere above the light: the shadow ray starts at the light and never meets it
        scene.spheres.push(Sphere::new(Vector3::new(0., 6., 0.), 0.5, id));

        let light = Point::new(Vector3::new(0., 4., 0.), Vector3::new(1., 1., 1.));
        assert!(light.illuminates(Vector3::new(1., 1e-5, -2.), up(), &scene));
    }

    #[test]
    fn test_light_below_surface_gives_no_diffuse() {
        let scene = Scene::new(MaterialStore::new());
        let light = Point::new(Vector3::new(0., -2., 0.), Vector3::new(1., 1., 1.));
        let ray = Ray::new(Vector3::new(0., 2., 0.), Vector3::new(0., -1., 0.));
        let shading = light.shading(&ray, Vector3::zero(), up(), &white(), &scene);
        assert_eq!(shading.diffuse, Vector3::zero());
    }
}
