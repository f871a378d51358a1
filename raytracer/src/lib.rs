//! A recursive ray tracer for scenes made of triangles and spheres lit by point lights.
//!
//! Rays are traced against every primitive, shaded with Phong-style local lighting and shadow
//! rays, and followed through mirror reflections and refractions up to a fixed depth.

pub mod camera;
pub mod lighting;
pub mod material;
pub mod math;
pub mod object;
pub mod render;
pub mod scene;
