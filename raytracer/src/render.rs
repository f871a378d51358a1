use std::{path::Path, str::FromStr, time::Instant};

use log::{debug, info};
use thiserror::Error;

use crate::{
    camera::Camera,
    material::Color,
    math::{Ray, Vector3},
    scene::{Medium, Scene},
};

/// Gamma applied after tone mapping.
pub const GAMMA: f64 = 2.2;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render an empty {0}x{1} image")]
    EmptyImage(u32, u32),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// What each pixel of the frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fully shaded, tone mapped color.
    Full,

    /// Distance to the nearest hit, as gray levels. Misses are white.
    Depth,

    /// The surface normal at the nearest hit, mapped to RGB. Misses are black.
    Normal,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Full
    }
}

impl FromStr for RenderMode {
    type Err = std::convert::Infallible;

    /// Anything that is not `depth` or `normal` renders in full.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "depth" => Self::Depth,
            "normal" => Self::Normal,
            _ => Self::Full,
        })
    }
}

/// Render options. Defaults are provided.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,

    /// The maximum number of bounces a ray can reflect/refract from an initial ray.
    pub depth: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Full,
            depth: 1,
        }
    }
}

/// A finished image, stored row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn to_image(&self) -> image::RgbImage {
        let mut imgbuf: image::RgbImage = image::ImageBuffer::new(self.width, self.height);

        for (i, color) in self.pixels.iter().enumerate() {
            imgbuf.put_pixel(
                i as u32 % self.width,
                i as u32 / self.width,
                (*color).into(),
            );
        }

        imgbuf
    }

    /// Write the frame out as a PNG.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Compress a radiance channel into 0..1 against the brightest channel in the image, then gamma
/// correct it.
pub fn tone_map(c: f64, max_intensity: f64) -> f64 {
    let mapped = if max_intensity > 0. {
        c * (1. + c / (max_intensity * max_intensity)) / (1. + c)
    } else {
        c
    };
    mapped.powf(1. / GAMMA)
}

/// Render `scene` as seen through `camera`.
///
/// Each mode runs in two passes: the first traces every pixel and tracks the image-wide maximum
/// the mode normalizes against, the second turns the raw values into 8-bit colors.
pub fn render(scene: &Scene, camera: &Camera, options: &RenderOptions) -> Result<Frame, RenderError> {
    let (vw, vh) = (camera.width, camera.height);
    if vw == 0 || vh == 0 {
        return Err(RenderError::EmptyImage(vw, vh));
    }

    info!(
        "rendering {}x{} in {:?} mode, depth {}",
        vw, vh, options.mode, options.depth
    );
    scene.log_summary();
    let now = Instant::now();

    let pixels = match options.mode {
        RenderMode::Full => render_full(scene, camera, options.depth),
        RenderMode::Depth => render_depth(scene, camera),
        RenderMode::Normal => render_normal(scene, camera),
    };

    info!("render finished in {}s", now.elapsed().as_secs_f32());

    Ok(Frame {
        width: vw,
        height: vh,
        pixels,
    })
}

/// Trace `f` over every pixel, top-left first.
fn trace_pixels<T, F>(camera: &Camera, f: F) -> Vec<T>
where
    F: Fn(&Ray) -> T,
{
    let rays = camera.rays();
    let vw = camera.width;

    (0..(vw * camera.height))
        .map(|i| f(&rays.ray_at(i % vw, i / vw)))
        .collect()
}

fn render_full(scene: &Scene, camera: &Camera, depth: u32) -> Vec<Color> {
    let radiance: Vec<Vector3> =
        trace_pixels(camera, |ray| scene.trace_ray(ray, depth, Medium::Outside));

    let max_intensity = radiance
        .iter()
        .map(|c| c.max_component())
        .fold(0., f64::max);
    debug!("max intensity {}", max_intensity);

    radiance
        .into_iter()
        .map(|c| {
            let c = c.map(|v| tone_map(v, max_intensity));
            Color::new(
                (c.x * 255.) as u8,
                (c.y * 255.) as u8,
                (c.z * 255.) as u8,
            )
        })
        .collect()
}

fn render_depth(scene: &Scene, camera: &Camera) -> Vec<Color> {
    let depths: Vec<Option<f64>> =
        trace_pixels(camera, |ray| scene.cast_ray(ray).map(|(_, hit)| hit.distance));

    let max_depth = depths.iter().flatten().copied().fold(0., f64::max);
    debug!("max depth {}", max_depth);

    depths
        .into_iter()
        .map(|d| match d {
            None => Color::white(),
            Some(d) => Color::gray((d / max_depth * 255.) as u8),
        })
        .collect()
}

fn render_normal(scene: &Scene, camera: &Camera) -> Vec<Color> {
    trace_pixels(camera, |ray| match scene.cast_ray(ray) {
        None => Color::black(),
        Some((primitive, hit)) => Color::from_normal(primitive.surface_normal(&hit)),
    })
}
