use std::collections::HashMap;

use crate::math::Vector3;

/// A 24-bit color, RGB.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Instantiate a new Color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray level, used for depth maps.
    pub fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Instantiate a new Color from 3 f64s, expected to be in the range 0-1.
    pub fn newf(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: (r.clamp(0., 1.) * 255.0) as u8,
            g: (g.clamp(0., 1.) * 255.0) as u8,
            b: (b.clamp(0., 1.) * 255.0) as u8,
        }
    }

    /// Instantiate a Color from a Vector3 whose components are in -1..1. Useful for checking normals.
    pub fn from_normal(n: Vector3) -> Self {
        Self::newf(n.x / 2. + 0.5, n.y / 2. + 0.5, n.z / 2. + 0.5)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

/// A Phong-style surface description.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,

    pub ambient: Vector3,
    pub diffuse: Vector3,
    pub specular: Vector3,

    /// Light emitted by the surface itself, added regardless of lighting.
    pub emission: Vector3,

    /// The power the specular highlight is raised to.
    pub specular_exponent: f64,

    /// The index of refraction of this material.
    pub refraction_index: f64,

    /// Weights for the local lighting, mirror reflection, and transmitted contributions, in that
    /// order.
    pub albedo: [f64; 3],
}

impl Material {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn local_weight(&self) -> f64 {
        self.albedo[0]
    }

    pub fn reflection_weight(&self) -> f64 {
        self.albedo[1]
    }

    pub fn transmission_weight(&self) -> f64 {
        self.albedo[2]
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vector3::zero(),
            diffuse: Vector3::zero(),
            specular: Vector3::zero(),
            emission: Vector3::zero(),
            specular_exponent: 0.,
            refraction_index: 1.,
            albedo: [1., 0., 0.],
        }
    }
}

/// A handle to a material inside a [`MaterialStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

/// Owns every material in a scene. Primitives refer to materials by [`MaterialId`].
///
/// Slot zero always holds the default material, which unknown names resolve to.
#[derive(Debug, Clone)]
pub struct MaterialStore {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
}

impl Default for MaterialStore {
    fn default() -> Self {
        Self {
            materials: vec![Material::default()],
            by_name: HashMap::new(),
        }
    }
}

impl MaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material, replacing any earlier material with the same name.
    pub fn insert(&mut self, material: Material) -> MaterialId {
        if let Some(&id) = self.by_name.get(&material.name) {
            self.materials[id.0] = material;
            return id;
        }

        let id = MaterialId(self.materials.len());
        self.by_name.insert(material.name.clone(), id);
        self.materials.push(material);
        id
    }

    pub fn id(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Material> {
        self.id(name).map(|id| self.get(id))
    }

    pub fn default_id(&self) -> MaterialId {
        MaterialId(0)
    }

    /// Resolve a handle. Handles only come from this store, so they are always in range.
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Number of named materials.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_lookup() {
        let mut store = MaterialStore::new();
        assert!(store.is_empty());

        let glass = store.insert(Material {
            refraction_index: 1.5,
            ..Material::named("glass")
        });
        let red = store.insert(Material {
            diffuse: Vector3::new(1., 0., 0.),
            ..Material::named("red")
        });

        assert_eq!(store.len(), 2);
        assert_ne!(glass, red);
        assert_ne!(glass, store.default_id());
        assert_eq!(store.id("glass"), Some(glass));
        assert_eq!(store.get(red).diffuse, Vector3::new(1., 0., 0.));
        assert!(store.by_name("missing").is_none());
        assert_eq!(store.get(store.default_id()).albedo, [1., 0., 0.]);
    }

    #[test]
    fn test_store_redefinition_keeps_handle() {
        let mut store = MaterialStore::new();
        let first = store.insert(Material::named("m"));
        let second = store.insert(Material {
            specular_exponent: 8.,
            ..Material::named("m")
        });
        assert_eq!(first, second);
        assert_eq!(store.get(first).specular_exponent, 8.);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_color_from_normal() {
        assert_eq!(Color::from_normal(Vector3::new(-1., 0., 1.)), Color::new(0, 127, 255));
    }
}
