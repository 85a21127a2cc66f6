pub use units::todo::{Weightf32, Intensityf32, Coordinatef64};

#[allow(non_camel_case_types)] pub type Index1_u = usize;
#[allow(non_camel_case_types)] pub type Index2_u = [usize; 2];

/// Row-major position of a pixel in an `M x M` grid
pub type PixelIndex = Index1_u;
/// Position of a detector element within one projection
pub type SensorBin  = usize;

/// One (row, column, weight) entry of a sparse matrix, prior to compression
pub type Triplet = (Index1_u, Index1_u, Weightf32);

pub use units::{Angle, deg, deg_, rad, radian_};
