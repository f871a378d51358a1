use raytracer::{
    camera::Camera,
    lighting::Point,
    material::{Color, Material, MaterialStore},
    math::Vector3,
    object::{Sphere, Triangle},
    render::{render, RenderMode, RenderOptions},
    scene::{Medium, Scene},
};

/// One sphere in front of the camera, lit from above.
fn lit_sphere(albedo: [f64; 3]) -> Scene {
    let mut materials = MaterialStore::new();
    let id = materials.insert(Material {
        diffuse: Vector3::new(0.8, 0.8, 0.8),
        specular: Vector3::new(0.2, 0.2, 0.2),
        specular_exponent: 10.,
        refraction_index: 1.5,
        albedo,
        ..Material::named("sphere")
    });

    let mut scene = Scene::new(materials);
    scene.spheres.push(Sphere::new(Vector3::new(0., 0., -5.), 1., id));
    scene
        .lights
        .push(Point::new(Vector3::new(0., 5., 0.), Vector3::new(1., 1., 1.)));
    scene
}

/// A 3x3 view down -Z; only the center pixel's ray meets the unit sphere at z = -5.
fn camera() -> Camera {
    Camera {
        width: 3,
        height: 3,
        ..Default::default()
    }
}

fn options(mode: RenderMode, depth: u32) -> RenderOptions {
    RenderOptions { mode, depth }
}

const EDGES: [(u32, u32); 8] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (2, 1),
    (0, 2),
    (1, 2),
    (2, 2),
];

#[test]
fn test_full_mode_center_lit_rest_black() {
    let frame = render(&lit_sphere([1., 0., 0.]), &camera(), &options(RenderMode::Full, 0)).unwrap();

    assert_eq!(frame.pixels.len(), 9);
    assert_ne!(frame.pixel(1, 1), Color::black());
    for (x, y) in EDGES {
        assert_eq!(frame.pixel(x, y), Color::black(), "pixel {},{}", x, y);
    }
}

#[test]
fn test_depth_mode_misses_are_white() {
    let frame = render(&lit_sphere([1., 0., 0.]), &camera(), &options(RenderMode::Depth, 0)).unwrap();

    // the only hit is also the farthest one
    assert_eq!(frame.pixel(1, 1), Color::gray(255));
    for (x, y) in EDGES {
        assert_eq!(frame.pixel(x, y), Color::white(), "pixel {},{}", x, y);
    }
}

#[test]
fn test_depth_mode_scales_by_farthest_hit() {
    let mut scene = lit_sphere([1., 0., 0.]);
    let id = scene.materials.default_id();
    // a big backdrop sphere, seen by every pixel, behind the small one
    scene.spheres.push(Sphere::new(Vector3::new(0., 0., -60.), 50., id));

    let frame = render(&scene, &camera(), &options(RenderMode::Depth, 0)).unwrap();
    let (center, edge, corner) = (frame.pixel(1, 1), frame.pixel(1, 0), frame.pixel(0, 0));

    assert_eq!(center.r, center.g);
    assert!(center.r < edge.r);
    assert!(edge.r < corner.r);
    // the corners are the farthest hits
    assert!(corner.r >= 254);
}

#[test]
fn test_normal_mode() {
    let frame = render(&lit_sphere([1., 0., 0.]), &camera(), &options(RenderMode::Normal, 0)).unwrap();

    // the center hit faces straight back at the camera
    assert_eq!(frame.pixel(1, 1), Color::new(127, 127, 255));
    for (x, y) in EDGES {
        assert_eq!(frame.pixel(x, y), Color::black());
    }
}

#[test]
fn test_normal_mode_blends_vertex_normals() {
    let mut scene = Scene::default();
    let id = scene.materials.default_id();
    scene.triangles.push(Triangle::new(
        [
            Vector3::new(-1., -1., -2.),
            Vector3::new(1., -1., -2.),
            Vector3::new(0., 1., -2.),
        ],
        [
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
            Vector3::new(0., 0., 1.),
        ],
        id,
    ));

    let frame = render(&scene, &camera(), &options(RenderMode::Normal, 0)).unwrap();

    // the center ray hits at weights (0.25, 0.25, 0.5); the blend (0.25, 0.25, 0.5) is used as is
    assert_eq!(frame.pixel(1, 1), Color::new(159, 159, 191));
    assert_eq!(frame.pixel(0, 0), Color::black());
}

#[test]
fn test_opaque_scene_ignores_depth() {
    let scene = lit_sphere([1., 0., 0.]);
    let shallow = render(&scene, &camera(), &options(RenderMode::Full, 0)).unwrap();
    let deep = render(&scene, &camera(), &options(RenderMode::Full, 5)).unwrap();
    assert_eq!(shallow, deep);
}

#[test]
fn test_mirror_shows_environment_not_diffuse() {
    let mut scene = lit_sphere([0., 1., 0.]);
    let lamp = scene.materials.insert(Material {
        emission: Vector3::new(1., 0., 0.),
        ..Material::named("lamp")
    });
    // behind the camera, so only its reflection can be seen
    scene.spheres.push(Sphere::new(Vector3::new(0., 0., 3.), 1., lamp));

    let center = camera().rays().ray_at(1, 1);
    let radiance = scene.trace_ray(&center, 2, Medium::Outside);
    assert!((radiance - Vector3::new(1., 0., 0.)).magnitude() < 1e-9);

    // without bounces the mirror has no light of its own
    assert_eq!(scene.trace_ray(&center, 0, Medium::Outside), Vector3::zero());

    let frame = render(&scene, &camera(), &options(RenderMode::Full, 2)).unwrap();
    assert_eq!(frame.pixel(1, 1), Color::new(255, 0, 0));
}
