//! Builds a [`Scene`] from a Wavefront OBJ file and the MTL libraries it names.
//!
//! Geometry and materials go through `tobj`. On top of plain OBJ two extra directives are read:
//!
//! ```text
//! S x y z radius       # a sphere, using the current `usemtl` material
//! P x y z r g b        # a point light with the given intensity
//! ```
//!
//! MTL files may also carry `Ke r g b` (emission) and `al local reflect transmit` (albedo).

use std::{fs, io, path::Path};

use log::{debug, info, warn};
use raytracer::{
    lighting::Point,
    material::{Material, MaterialId, MaterialStore},
    math::Vector3,
    object::{Sphere, Triangle},
    scene::Scene,
};
use thiserror::Error;

use crate::lines;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scene: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load obj: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("line {line}: malformed `{directive}` directive")]
    Malformed { line: usize, directive: &'static str },

    #[error("material {material}: malformed `{key}` value `{value}`")]
    MaterialParam {
        material: String,
        key: &'static str,
        value: String,
    },
}

/// Load every triangle, sphere, light, and material described by the OBJ file at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, LoadError> {
    let path = path.as_ref();

    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
    )?;
    let text = fs::read_to_string(path)?;

    let mut store = MaterialStore::new();
    let ids = materials?
        .iter()
        .map(|m| convert_material(m).map(|m| store.insert(m)))
        .collect::<Result<Vec<_>, _>>()?;

    let triangle_count: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
    let mut smooth = smooth_triangles(&text);
    if smooth.len() != triangle_count {
        warn!(
            "counted {} triangles but {} were loaded, shading all of them flat",
            smooth.len(),
            triangle_count
        );
        smooth.clear();
    }
    let mut smooth = smooth.into_iter();

    let mut scene = Scene::new(store);
    for model in models.iter() {
        let material = match model.mesh.material_id.and_then(|i| ids.get(i)) {
            Some(&id) => id,
            None => {
                debug!("mesh {} has no material, using the default", model.name);
                scene.materials.default_id()
            }
        };
        append_mesh(&mut scene, &model.mesh, material, &mut smooth);
    }

    scan_directives(&mut scene, &text)?;

    info!(
        "loaded {}: {} triangles, {} spheres, {} lights, {} materials",
        path.display(),
        scene.triangles.len(),
        scene.spheres.len(),
        scene.lights.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Lift a tobj float triple into a vector.
fn color<T: Into<f64> + Copy>(c: [T; 3]) -> Vector3 {
    Vector3::new(c[0].into(), c[1].into(), c[2].into())
}

fn triple(material: &str, key: &'static str, value: &str) -> Result<[f64; 3], LoadError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    match lines::numbers(&tokens, 3) {
        Some(v) => Ok([v[0], v[1], v[2]]),
        None => Err(LoadError::MaterialParam {
            material: material.to_owned(),
            key,
            value: value.to_owned(),
        }),
    }
}

fn convert_material(m: &tobj::Material) -> Result<Material, LoadError> {
    let mut material = Material {
        ambient: color(m.ambient),
        diffuse: color(m.diffuse),
        specular: color(m.specular),
        specular_exponent: m.shininess.into(),
        ..Material::named(m.name.clone())
    };

    // a missing Ni reads as zero
    let ni: f64 = m.optical_density.into();
    if ni > 0. {
        material.refraction_index = ni;
    }

    if let Some(ke) = m.unknown_param.get("Ke") {
        material.emission = triple(&m.name, "Ke", ke)?.into();
    }
    if let Some(al) = m.unknown_param.get("al") {
        material.albedo = triple(&m.name, "al", al)?;
    }

    Ok(material)
}

/// Whether each triangle of the file keeps its vertex normals, in file order.
///
/// Polygons are split into a fan around their first corner, the same way tobj triangulates them.
/// A triangle is smooth only when all three of its corners name a normal.
fn smooth_triangles(text: &str) -> Vec<bool> {
    let mut smooth = Vec::new();

    for (line, tokens) in lines::directives(text) {
        if let ["f", corners @ ..] = tokens.as_slice() {
            let has_normal: Vec<bool> = corners
                .iter()
                .map(|c| c.split('/').nth(2).map_or(false, |n| !n.is_empty()))
                .collect();
            if has_normal.contains(&true) && has_normal.contains(&false) {
                warn!("line {}: face has only some vertex normals, shading it flat", line);
            }

            for i in 1..corners.len().saturating_sub(1) {
                smooth.push(has_normal[0] && has_normal[i] && has_normal[i + 1]);
            }
        }
    }

    smooth
}

/// Append the triangles of `mesh`, taking one smooth flag per triangle from `smooth`.
fn append_mesh(
    scene: &mut Scene,
    mesh: &tobj::Mesh,
    material: MaterialId,
    smooth: &mut impl Iterator<Item = bool>,
) {
    let positions: Vec<Vector3> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| color([p[0], p[1], p[2]]))
        .collect();
    let normals: Vec<Vector3> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| color([n[0], n[1], n[2]]))
        .collect();
    let indexed = mesh.normal_indices.len() == mesh.indices.len();

    for (face, corners) in mesh.indices.chunks_exact(3).enumerate() {
        let vertices = [
            positions[corners[0] as usize],
            positions[corners[1] as usize],
            positions[corners[2] as usize],
        ];

        // tobj fills in missing normal indices, so those are taken from the face itself
        let triangle = if smooth.next().unwrap_or(false) && indexed {
            let n = &mesh.normal_indices[face * 3..face * 3 + 3];
            Triangle::new(
                vertices,
                [normals[n[0] as usize], normals[n[1] as usize], normals[n[2] as usize]],
                material,
            )
        } else {
            Triangle::flat(vertices, material)
        };

        scene.triangles.push(triangle);
    }
}

/// Read the sphere and light directives tobj does not know about.
fn scan_directives(scene: &mut Scene, text: &str) -> Result<(), LoadError> {
    let mut material = scene.materials.default_id();

    for (line, tokens) in lines::directives(text) {
        match tokens.as_slice() {
            ["usemtl", name, ..] => {
                material = match scene.materials.id(name) {
                    Some(id) => id,
                    None => {
                        warn!("line {}: unknown material {}, using the default", line, name);
                        scene.materials.default_id()
                    }
                };
            }
            ["S", values @ ..] => {
                let v = lines::numbers(values, 4)
                    .ok_or(LoadError::Malformed { line, directive: "S" })?;
                scene
                    .spheres
                    .push(Sphere::new(Vector3::new(v[0], v[1], v[2]), v[3], material));
            }
            ["P", values @ ..] => {
                let v = lines::numbers(values, 6)
                    .ok_or(LoadError::Malformed { line, directive: "P" })?;
                scene.lights.push(Point::new(
                    Vector3::new(v[0], v[1], v[2]),
                    Vector3::new(v[3], v[4], v[5]),
                ));
            }
            _ => (),
        }
    }

    Ok(())
}
