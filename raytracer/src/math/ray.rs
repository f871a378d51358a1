use super::Vector3;

/// A ray with an origin and a direction.
///
/// The direction is not required to be normalized; intersection routines
/// normalize it where they need arc-length distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Instantiate a new Ray.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Build a ray from `from` passing through `to`. The direction keeps the full length.
    pub fn between(from: Vector3, to: Vector3) -> Self {
        Self::new(from, to - from)
    }
}
