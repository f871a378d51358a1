use crate::{
    material::MaterialId,
    math::{Ray, Vector3},
};

use super::{Hit, Intersect, SceneObject, SURFACE_BIAS};

/// Determinants smaller than this mean the ray runs parallel to the triangle.
const PARALLEL_EPSILON: f64 = 1e-6;

/// Ray parameters at or below this are behind the origin or on the surface it left from.
const MIN_T: f64 = 1e-6;

/// A triangle, optionally carrying one normal per vertex for smooth shading.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vector3; 3],

    /// Per-vertex normals. `None` means the triangle is shaded flat with its geometric normal.
    pub normals: Option<[Vector3; 3]>,

    pub material: MaterialId,
}

impl Triangle {
    /// Create a triangle from vertices and vertex normals.
    ///
    /// An all-zero first normal marks the triangle as having no stored normals.
    pub fn new(vertices: [Vector3; 3], normals: [Vector3; 3], material: MaterialId) -> Self {
        let normals = if normals[0] == Vector3::zero() {
            None
        } else {
            Some(normals)
        };

        Self {
            vertices,
            normals,
            material,
        }
    }

    /// Create a triangle that is shaded with its geometric normal.
    pub fn flat(vertices: [Vector3; 3], material: MaterialId) -> Self {
        Self {
            vertices,
            normals: None,
            material,
        }
    }

    pub fn vertex(&self, i: usize) -> Vector3 {
        self.vertices[i]
    }

    /// Barycentric weights of a point lying in the triangle's plane.
    ///
    /// Each vertex is projected onto its opposite edge, and the point's position along the
    /// vertex-to-foot segment gives that vertex's weight. Weights are not renormalized, so the
    /// point must actually lie in the plane for them to sum to one.
    pub fn barycentric(&self, point: Vector3) -> [f64; 3] {
        let [a, b, c] = self.vertices;

        let a_foot = b + (c - b) * ((a - b).dot(c - b) / (c - b).dot(c - b));
        let a_weight = 1. - (a_foot - a).dot(point - a) / (a_foot - a).dot(a_foot - a);

        let b_foot = c + (a - c) * ((b - c).dot(a - c) / (a - c).dot(a - c));
        let b_weight = 1. - (b_foot - b).dot(point - b) / (b_foot - b).dot(b_foot - b);

        [a_weight, b_weight, 1. - a_weight - b_weight]
    }
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1. / a;
        let s = ray.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t <= MIN_T {
            return None;
        }

        // redo the crossing along the normalized direction so distances match spheres
        let dir = ray.direction.normalize();
        let perp = edge1.cross(edge2).normalize();
        let a0 = perp.dot(s);
        let a1 = perp.dot(s + dir);
        let len = -a0 / (a1 - a0);
        let position = ray.origin + dir * len;

        let normal = if perp.dot(ray.direction) < 0. { perp } else { -perp };
        let distance = (ray.origin - position).magnitude();

        Some(Hit::new(position + normal * SURFACE_BIAS, normal, distance))
    }
}

impl SceneObject for Triangle {
    fn material(&self) -> MaterialId {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Triangle {
        Triangle::flat(
            [
                Vector3::new(-1., -1., -3.),
                Vector3::new(1., -1., -3.),
                Vector3::new(0., 1., -3.),
            ],
            MaterialId::default(),
        )
    }

    fn centroid(t: &Triangle) -> Vector3 {
        (t.vertex(0) + t.vertex(1) + t.vertex(2)) / 3.
    }

    #[test]
    fn test_hit_through_centroid() {
        let t = triangle();
        let c = centroid(&t);
        let hit = t.intersect(&Ray::new(c + Vector3::new(0., 0., 4.), Vector3::new(0., 0., -1.)));
        let hit = hit.unwrap();
        assert!((hit.distance - 4.).abs() < 1e-9);
        assert!((hit.normal - Vector3::new(0., 0., 1.)).magnitude() < 1e-12);
        assert!((hit.position.z - (-3. + SURFACE_BIAS)).abs() < 1e-12);
    }

    #[test]
    fn test_normal_faces_the_ray_from_behind() {
        let t = triangle();
        let c = centroid(&t);
        let hit = t
            .intersect(&Ray::new(c - Vector3::new(0., 0., 2.), Vector3::new(0., 0., 1.)))
            .unwrap();
        assert!((hit.normal - Vector3::new(0., 0., -1.)).magnitude() < 1e-12);
        assert!((hit.distance - 2.).abs() < 1e-9);
    }

    #[test]
    fn test_distance_ignores_direction_length() {
        let t = triangle();
        let c = centroid(&t);
        let hit = t
            .intersect(&Ray::new(c + Vector3::new(0., 0., 4.), Vector3::new(0., 0., -10.)))
            .unwrap();
        assert!((hit.distance - 4.).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_never_hits() {
        let t = triangle();
        let ray = Ray::new(Vector3::new(-5., 0., -3.), Vector3::new(1., 0., 0.));
        assert!(t.intersect(&ray).is_none());
    }

    #[test]
    fn test_outside_and_behind() {
        let t = triangle();
        let outside = Ray::new(Vector3::new(3., 3., 0.), Vector3::new(0., 0., -1.));
        assert!(t.intersect(&outside).is_none());

        let behind = Ray::new(Vector3::new(0., 0., 0.), Vector3::new(0., 0., 1.));
        assert!(t.intersect(&behind).is_none());
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let t = triangle();
        let expected = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        for (i, e) in expected.iter().enumerate() {
            let w = t.barycentric(t.vertex(i));
            for k in 0..3 {
                assert!((w[k] - e[k]).abs() < 1e-12, "vertex {}: {:?}", i, w);
            }
        }
    }

    #[test]
    fn test_barycentric_centroid_sums_to_one() {
        let t = triangle();
        let w = t.barycentric(centroid(&t));
        for weight in w {
            assert!((weight - 1. / 3.).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_first_normal_means_flat() {
        let vertices = triangle().vertices;
        let t = Triangle::new(vertices, [Vector3::zero(); 3], MaterialId::default());
        assert!(t.normals.is_none());

        let n = Vector3::new(0., 0., 1.);
        let t = Triangle::new(vertices, [n; 3], MaterialId::default());
        assert_eq!(t.normals, Some([n; 3]));
    }
}
