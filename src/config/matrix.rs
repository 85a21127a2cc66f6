//! Configuration file parser for system matrix construction

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detector::Rounding;
use crate::error::Result;
use crate::system_matrix::{SystemMatrix, SystemMatrixBuilder};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Number of pixels along each side of the square image
    pub pixels: usize,

    /// Number of sensors per projection. Defaults to enough sensors to cover
    /// the diagonal of the pixel grid.
    #[serde(default)]
    pub sensors: Option<usize>,

    /// Projection angles in degrees. Their order determines the order of the
    /// sensor blocks in the matrix.
    #[serde(default)]
    pub angles: Vec<f64>,

    #[serde(default)]
    pub rounding: Rounding,
}

impl Config {
    pub fn builder(&self) -> SystemMatrixBuilder {
        SystemMatrixBuilder::new(self.pixels)
            .maybe_sensors(self.sensors)
            .rounding(self.rounding)
    }

    pub fn build(&self) -> Result<SystemMatrix> {
        self.builder().build_degrees(&self.angles)
    }
}

impl std::str::FromStr for Config {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> Result<Self> { Ok(toml::from_str(s)?) }
}

pub fn read_config_file(path: impl AsRef<Path>) -> Result<Config> {
    fs::read_to_string(path)?.parse()
}
