//! The optional render configuration file.
//!
//! Each line is `<section> <key> <values...>`; a `#` token starts a comment. Recognized keys:
//!
//! ```text
//! camera w 640
//! camera h 480
//! camera fov 1.5708
//! camera from 0 0 0
//! camera to 0 0 -1
//! render mode full     # full, depth or normal
//! render depth 1
//! ```
//!
//! Unknown sections and keys are skipped.

use std::{fs, io, path::Path, str::FromStr};

use log::debug;
use raytracer::{
    camera::Camera,
    math::Vector3,
    render::{RenderMode, RenderOptions},
};
use thiserror::Error;

use crate::lines;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: missing value for `{key}`")]
    MissingValue { line: usize, key: String },

    #[error("line {line}: malformed value `{value}` for `{key}`")]
    Malformed {
        line: usize,
        key: String,
        value: String,
    },
}

/// Everything the config file can set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub camera: Camera,
    pub render: RenderOptions,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::parse(&fs::read_to_string(path)?)?;
        debug!("config: {:?}", config);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (line, tokens) in lines::directives(text) {
            match tokens.as_slice() {
                ["camera", key, rest @ ..] => config.set_camera(line, key, rest)?,
                ["render", key, rest @ ..] => config.set_render(line, key, rest)?,
                _ => (),
            }
        }

        Ok(config)
    }

    fn set_camera(&mut self, line: usize, key: &str, values: &[&str]) -> Result<(), ConfigError> {
        let camera = &mut self.camera;
        match key {
            "w" => camera.width = value(line, key, values)?,
            "h" => camera.height = value(line, key, values)?,
            "fov" => camera.fov = value(line, key, values)?,
            "from" => camera.look_from = vector(line, key, values)?,
            "to" => camera.look_to = vector(line, key, values)?,
            _ => (),
        }
        Ok(())
    }

    fn set_render(&mut self, line: usize, key: &str, values: &[&str]) -> Result<(), ConfigError> {
        match key {
            "mode" => {
                let raw = values.first().ok_or_else(|| missing(line, key))?;
                self.render.mode = RenderMode::from_str(raw).unwrap_or_default();
            }
            "depth" => self.render.depth = value(line, key, values)?,
            _ => (),
        }
        Ok(())
    }
}

fn missing(line: usize, key: &str) -> ConfigError {
    ConfigError::MissingValue {
        line,
        key: key.to_owned(),
    }
}

fn value<T: FromStr>(line: usize, key: &str, values: &[&str]) -> Result<T, ConfigError> {
    let raw = values.first().ok_or_else(|| missing(line, key))?;
    raw.parse().map_err(|_| ConfigError::Malformed {
        line,
        key: key.to_owned(),
        value: raw.to_string(),
    })
}

fn vector(line: usize, key: &str, values: &[&str]) -> Result<Vector3, ConfigError> {
    if values.len() < 3 {
        return Err(missing(line, key));
    }

    Ok(Vector3::new(
        value(line, key, &values[0..])?,
        value(line, key, &values[1..])?,
        value(line, key, &values[2..])?,
    ))
}
