mod matrix;
mod ray;
mod vector;

pub use matrix::*;
pub use ray::*;
pub use vector::*;

/// Mirror `ray` about `normal`.
///
/// Neither vector needs to be normalized; the result has the magnitude of `ray`.
pub fn reflect(ray: Vector3, normal: Vector3) -> Vector3 {
    let projection = normal * (normal.dot(ray) / normal.dot(normal));
    ray - projection * 2.
}

/// Bend `ray` through a surface with the given `normal`, where `eta` is the ratio of the
/// incident to the transmitted refraction index.
///
/// The ray is split into its component along the normal and its tangential component, and the
/// tangential part is rescaled so the outgoing angle obeys Snell's law. Returns `None` on total
/// internal reflection. Inputs need not be normalized; the result is.
pub fn refract(ray: Vector3, normal: Vector3, eta: f64) -> Option<Vector3> {
    let cos = -ray.dot(normal) / ray.magnitude() / normal.magnitude();
    let sin = (1. - cos * cos).max(0.).sqrt();
    if sin * eta - 1. > -1e-6 {
        return None;
    }

    let projection = normal * (normal.dot(ray) / normal.dot(normal));
    let tangent = ray - projection;
    let coefficient = eta * cos / (1. - sin * sin * eta * eta).sqrt();
    Some((projection + tangent * coefficient).normalize())
}
