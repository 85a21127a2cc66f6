//! The size and granularity of the square pixel grid whose image is being
//! projected.
//!
//! Pixel centres sit on `n` evenly-spaced coordinates running from
//! `-(n div 2)` to `n div 2` inclusive along each axis, so the grid is
//! symmetric about the origin for both odd and even `n`.

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::index::index1_to_2;
use crate::types::{Coordinatef64, PixelIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pub n: usize,
}

impl PixelGrid {

    pub fn new(n: usize) -> Result<Self> {
        if n == 0 { return Err(Error::invalid("pixels", "grid must have at least one pixel per side")) }
        Ok(Self { n })
    }

    pub fn n_pixels(&self) -> usize { self.n * self.n }

    /// Largest coordinate along either axis
    pub fn half_width(&self) -> Coordinatef64 { (self.n / 2) as Coordinatef64 }

    fn step(&self) -> Coordinatef64 {
        if self.n > 1 { 2.0 * self.half_width() / (self.n - 1) as Coordinatef64 }
        else          { 0.0 }
    }

    /// Coordinates of the pixel centres along one axis
    pub fn coordinates(&self) -> Array1<Coordinatef64> {
        let h = self.half_width();
        Array1::linspace(-h, h, self.n)
    }

    /// Coordinate of the `i`th pixel centre along one axis
    pub fn coordinate(&self, i: usize) -> Coordinatef64 {
        -self.half_width() + self.step() * i as Coordinatef64
    }

    /// Find centre of pixel with given 1D index
    pub fn pixel_centre(&self, i: PixelIndex) -> (Coordinatef64, Coordinatef64) {
        let [row, col] = index1_to_2(i, self.n);
        (self.coordinate(row), self.coordinate(col))
    }

    /// Smallest number of sensors guaranteed to catch the projection of every
    /// pixel, at any angle: the length of the grid's diagonal.
    pub fn default_sensor_count(&self) -> usize {
        (std::f64::consts::SQRT_2 * self.n as f64).ceil() as usize
    }
}
