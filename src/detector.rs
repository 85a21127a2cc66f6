//! The linear array of sensors onto which each projection falls.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Coordinatef64, SensorBin};

/// How a projected coordinate lying exactly half-way between two sensors is
/// assigned to one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Ties go to the even neighbour: 2.5 -> 2, 3.5 -> 4
    #[default]
    HalfEven,
    /// Ties go away from zero: 2.5 -> 3, 3.5 -> 4
    HalfAway,
}

impl Rounding {
    #[inline]
    pub fn round(self, x: f64) -> f64 {
        match self {
            Rounding::HalfEven => x.round_ties_even(),
            Rounding::HalfAway => x.round(),
        }
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::HalfEven => f.write_str("half-even"),
            Rounding::HalfAway => f.write_str("half-away"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detector {
    n_sensors: usize,
    rounding: Rounding,
}

impl Detector {

    pub fn new(n_sensors: usize, rounding: Rounding) -> Result<Self> {
        if n_sensors == 0 { return Err(Error::invalid("sensors", "detector must have at least one sensor")) }
        Ok(Self { n_sensors, rounding })
    }

    pub fn n_sensors(&self) -> usize { self.n_sensors }
    pub fn rounding (&self) -> Rounding { self.rounding }

    /// Sensor which sits at projected coordinate zero
    pub fn offset(&self) -> usize { self.n_sensors / 2 }

    /// The sensor hit by a ray at projected coordinate `p`. `None` if the ray
    /// misses the detector.
    #[inline]
    pub fn bin(&self, p: Coordinatef64) -> Option<SensorBin> {
        // Round *after* shifting: with ties-to-even, shifting by an odd offset
        // changes which neighbour wins.
        let b = self.rounding.round(p + self.offset() as f64);
        if b >= 0.0 && b < self.n_sensors as f64 { Some(b as SensorBin) }
        else                                     { None }
    }
}
