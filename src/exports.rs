pub use crate::error::{Error, Result};
pub use crate::detector::{Detector, Rounding};
pub use crate::grid::PixelGrid;
pub use crate::sparse::{CsrMatrix, Triplets};
pub use crate::system_matrix::{SystemMatrix, SystemMatrixBuilder, system_matrix};
pub use crate::projector::{ImageData, Sinogram};
pub use crate::types::{Angle, deg, rad};
