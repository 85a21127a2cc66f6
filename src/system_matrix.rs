//! Construction of the system matrix of a parallel-beam projection.
//!
//! For each projection angle, every pixel centre of the square grid is
//! projected onto the line of sensors:
//!
//! ```text
//! p   = x cos(angle) + y sin(angle)
//! bin = round(p + n_sensors div 2)
//! ```
//!
//! A pixel whose `bin` lies on the detector contributes a weight of 1 to row
//! `angle_index * n_sensors + bin`, column `pixel_index` of the matrix. Pixels
//! projecting beyond either end of the detector are dropped: they model rays
//! that miss the physical sensor array.
//!
//! Angles are independent of each other, so they are processed in parallel;
//! the resulting triplets are merged into a single CSR matrix afterwards.

use ndarray::Array1;
#[cfg(not(feature = "serial"))]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::detector::{Detector, Rounding};
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::index::{index2_to_1, system_matrix_row};
use crate::sparse::{CsrMatrix, Triplets};
use crate::types::{Angle, Coordinatef64, Triplet, Weightf32, deg, deg_, radian_};

/// Every pixel which reaches the detector contributes this much to its sensor
pub const PIXEL_WEIGHT: Weightf32 = 1.0;

// ----- Builder --------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub struct SystemMatrixBuilder {
    pixels: usize,
    sensors: Option<usize>,
    rounding: Rounding,
}

impl SystemMatrixBuilder {

    /// Matrix for an image of `pixels x pixels` pixels, with the default
    /// number of sensors and rounding convention.
    pub fn new(pixels: usize) -> Self {
        Self { pixels, sensors: None, rounding: Rounding::default() }
    }

    pub fn sensors(self, n_sensors: usize) -> Self { self.maybe_sensors(Some(n_sensors)) }

    /// `None` selects enough sensors to cover the grid's diagonal
    pub fn maybe_sensors(mut self, n_sensors: Option<usize>) -> Self {
        self.sensors = n_sensors;
        self
    }

    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn build_degrees(&self, degrees: &[f64]) -> Result<SystemMatrix> {
        let angles: Vec<Angle> = degrees.iter().copied().map(deg).collect();
        self.build(&angles)
    }

    pub fn build(&self, angles: &[Angle]) -> Result<SystemMatrix> {
        // ----- Validate everything before doing any work ------------------
        let grid = PixelGrid::new(self.pixels)?;
        let n_sensors = self.sensors.unwrap_or_else(|| grid.default_sensor_count());
        let detector = Detector::new(n_sensors, self.rounding)?;
        if let Some((i, a)) = angles.iter().enumerate().find(|(_, a)| !radian_(**a).is_finite()) {
            return Err(Error::invalid("angles", format!("angle #{i} ({:?} rad) is not finite", radian_(*a))))
        }

        let shape = (angles.len() * n_sensors, grid.n_pixels());
        info!(pixels = grid.n, sensors = n_sensors, angles = angles.len(),
              rounding = %self.rounding, "building system matrix");

        // ----- Generate triplets, one independent list per angle ----------
        let coordinates = grid.coordinates();

        #[cfg    (feature = "serial") ] let iter = angles.    iter();
        #[cfg(not(feature = "serial"))] let iter = angles.par_iter();

        let per_angle: Vec<Vec<Triplet>> = iter
            .enumerate()
            .map(|(angle_index, &angle)| projection_triplets(&coordinates, &detector, angle_index, angle))
            .collect();

        // ----- Merge in angle order and compress --------------------------
        let mut triplets = Triplets::with_capacity(shape, per_angle.iter().map(Vec::len).sum());
        for projection in per_angle { triplets.extend_unchecked(projection); }
        let csr = CsrMatrix::from(triplets);

        info!(rows = shape.0, cols = shape.1, nnz = csr.nnz(), "system matrix built");
        Ok(SystemMatrix { csr, grid, detector, n_angles: angles.len() })
    }
}

/// Build the system matrix for a `pixels x pixels` image, projected at each of
/// `degrees`, onto `sensors` sensors (enough to cover the grid's diagonal, if
/// `None`).
pub fn system_matrix(pixels: usize, degrees: &[f64], sensors: Option<usize>) -> Result<SystemMatrix> {
    SystemMatrixBuilder::new(pixels)
        .maybe_sensors(sensors)
        .build_degrees(degrees)
}

/// The (row, column, weight) triplets contributed by the projection at
/// position `angle_index` in the angle list.
pub fn projection_triplets(
    coordinates: &Array1<Coordinatef64>,
    detector   : &Detector,
    angle_index: usize,
    angle      : Angle,
) -> Vec<Triplet> {
    let n = coordinates.len();
    let n_sensors = detector.n_sensors();
    let (cos, sin) = units::cos_sin(angle);

    let mut triplets = Vec::with_capacity(n * n);
    for (row, &x) in coordinates.iter().enumerate() {
        for (col, &y) in coordinates.iter().enumerate() {
            if let Some(bin) = detector.bin(x * cos + y * sin) {
                triplets.push((
                    system_matrix_row(angle_index, bin, n_sensors),
                    index2_to_1([row, col], n),
                    PIXEL_WEIGHT,
                ));
            }
        }
    }
    debug!(angle_index, degrees = deg_(angle), kept = triplets.len(),
           dropped = n * n - triplets.len(), "projection");
    triplets
}

// ----- The matrix, together with the geometry it describes ------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct SystemMatrix {
    pub(crate) csr: CsrMatrix,
    pub(crate) grid: PixelGrid,
    pub(crate) detector: Detector,
    pub(crate) n_angles: usize,
}

impl SystemMatrix {
    /// (`n_angles * n_sensors`, `pixels * pixels`)
    pub fn shape(&self) -> (usize, usize) { self.csr.shape() }
    pub fn nnz  (&self) -> usize { self.csr.nnz() }

    pub fn grid     (&self) -> PixelGrid { self.grid }
    pub fn detector (&self) -> Detector  { self.detector }
    pub fn n_sensors(&self) -> usize     { self.detector.n_sensors() }
    pub fn n_angles (&self) -> usize     { self.n_angles }

    pub fn csr(&self) -> &CsrMatrix { &self.csr }
    pub fn into_csr(self) -> CsrMatrix { self.csr }
}

impl std::ops::Deref for SystemMatrix {
    type Target = CsrMatrix;
    fn deref(&self) -> &CsrMatrix { &self.csr }
}
