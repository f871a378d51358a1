use std::{path::Path, str::FromStr, time::Instant};

use clap::{App, Arg, ArgMatches};
use log::{error, info, LevelFilter};
use raytracer::render::{self, RenderError, RenderMode};
use thiserror::Error;

use crate::{
    config::{Config, ConfigError},
    loader::LoadError,
};

mod config;
mod lines;
mod loader;
mod logger;

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("missing argument {0}")]
    MissingArgument(&'static str),

    #[error("invalid value `{1}` for --{0}")]
    InvalidArgument(&'static str, String),
}

fn main() {
    let matches = App::new("objtrace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders OBJ scenes with spheres and point lights by recursive ray tracing")
        .arg(
            Arg::with_name("SCENE")
                .help("The .obj scene file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("The .png file to write")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("CONFIG")
                .help("Camera and render settings")
                .required(false)
                .index(3),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .help("Image width in pixels, overrides the config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .help("Image height in pixels, overrides the config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("depth")
                .long("depth")
                .help("Maximum number of bounces, overrides the config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("mode")
                .long("mode")
                .help("What to render, overrides the config")
                .possible_values(&["full", "depth", "normal"])
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .help("Logging verbosity")
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
        .get_matches();

    let level = matches
        .value_of("log-level")
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::Info);
    logger::init_logger(level);

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), AppError> {
    let scene_path = required(matches, "SCENE")?;
    let output = required(matches, "OUTPUT")?;

    let mut config = match matches.value_of("CONFIG") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(width) = flag(matches, "width")? {
        config.camera.width = width;
    }
    if let Some(height) = flag(matches, "height")? {
        config.camera.height = height;
    }
    if let Some(depth) = flag(matches, "depth")? {
        config.render.depth = depth;
    }
    if let Some(mode) = flag::<RenderMode>(matches, "mode")? {
        config.render.mode = mode;
    }

    let now = Instant::now();
    let scene = loader::load_scene(Path::new(scene_path))?;
    info!("scene constructed in {}s", now.elapsed().as_secs_f32());

    let frame = render::render(&scene, &config.camera, &config.render)?;
    frame.save(output)?;
    info!("wrote {} in {}s", output, now.elapsed().as_secs_f32());

    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &'static str) -> Result<&'a str, AppError> {
    matches.value_of(name).ok_or(AppError::MissingArgument(name))
}

/// Parse an optional command line flag.
fn flag<T: FromStr>(matches: &ArgMatches, name: &'static str) -> Result<Option<T>, AppError> {
    matches
        .value_of(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_| AppError::InvalidArgument(name, raw.to_owned()))
        })
        .transpose()
}
