//! Forward and backward projections through a `SystemMatrix`.
//!
//! + `forward_project`: image (`pixels x pixels`) -> sinogram
//!   (`n_angles x n_sensors`)
//!
//! + `back_project`: sinogram -> image, using the transpose of the matrix
//!
//! These are the two products a reconstruction algorithm needs; the system
//! matrix itself is never transposed or densified.

use ndarray::{Array1, Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::system_matrix::SystemMatrix;
use crate::types::Intensityf32;

pub type ImageData = Array2<Intensityf32>;
pub type Sinogram  = Array2<Intensityf32>;

impl SystemMatrix {

    pub fn image_shape   (&self) -> (usize, usize) { (self.grid.n, self.grid.n) }
    pub fn sinogram_shape(&self) -> (usize, usize) { (self.n_angles, self.n_sensors()) }

    /// Sensor readings produced by `image`: one row per angle, one column per
    /// sensor.
    pub fn forward_project(&self, image: ArrayView2<Intensityf32>) -> Result<Sinogram> {
        check_shape(self.image_shape(), image.dim())?;
        let flat: Array1<Intensityf32> = image.iter().copied().collect();
        let readings = self.csr.dot(flat.view())?;
        Ok(readings.into_shape(self.sinogram_shape())?)
    }

    /// Smear each sensor reading back over the pixels which project onto that
    /// sensor.
    pub fn back_project(&self, sinogram: ArrayView2<Intensityf32>) -> Result<ImageData> {
        check_shape(self.sinogram_shape(), sinogram.dim())?;
        let flat: Array1<Intensityf32> = sinogram.iter().copied().collect();
        let image = self.csr.transpose_dot(flat.view())?;
        Ok(image.into_shape(self.image_shape())?)
    }
}

fn check_shape(expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected == found { Ok(()) }
    else { Err(Error::DimensionMismatch { expected: vec![expected.0, expected.1],
                                          found   : vec![   found.0,    found.1] }) }
}

#[cfg(test)]
mod test_projector {
    use super::*;
    use crate::system_matrix::system_matrix;
    use ndarray::{array, Array2};
    use pretty_assertions::assert_eq;
    use float_eq::assert_float_eq;

    // Pixel values 0..9, row-major
    fn counting_image() -> ImageData {
        Array2::from_shape_fn((3, 3), |(r, c)| (3 * r + c) as f32)
    }

    #[test]
    fn forward_projection_sums_rows_and_columns() {
        let m = system_matrix(3, &[0.0, 90.0], Some(5)).unwrap();
        let sinogram = m.forward_project(counting_image().view()).unwrap();
        assert_eq!(sinogram, array![[0.0,  3.0, 12.0, 21.0, 0.0],   // row sums
                                    [0.0,  9.0, 12.0, 15.0, 0.0]]); // column sums
    }

    #[test]
    fn back_projection_smears_along_rays() {
        let m = system_matrix(3, &[0.0], Some(5)).unwrap();
        let image = m.back_project(array![[9.0, 1.0, 2.0, 3.0, 9.0]].view()).unwrap();
        assert_eq!(image, array![[1.0, 1.0, 1.0],
                                 [2.0, 2.0, 2.0],
                                 [3.0, 3.0, 3.0]]);
    }

    #[test]
    fn projections_are_adjoint() {
        let m = system_matrix(7, &[0.0, 17.0, 45.0, 133.0], None).unwrap();
        let x = Array2::from_shape_fn(m.image_shape(),    |(r, c)| ((r * 31 + c * 7) % 11) as f32);
        let y = Array2::from_shape_fn(m.sinogram_shape(), |(a, s)| ((a * 13 + s * 5) %  9) as f32);
        let ax  = m.forward_project(x.view()).unwrap();
        let aty = m.back_project   (y.view()).unwrap();
        let lhs: f32 = (&ax  * &y).sum();
        let rhs: f32 = (&aty * &x).sum();
        assert_float_eq!(lhs, rhs, rmax <= 1e-6);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        let m = system_matrix(3, &[0.0], Some(5)).unwrap();
        assert!(matches!(m.forward_project(Array2::<f32>::zeros((3, 4)).view()),
                         Err(Error::DimensionMismatch { .. })));
        assert!(matches!(m.back_project(Array2::<f32>::zeros((2, 5)).view()),
                         Err(Error::DimensionMismatch { .. })));
    }
}
