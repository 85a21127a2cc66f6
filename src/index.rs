// --------------------------------------------------------------------------------
//                  Conversion between 1d and 2d pixel indices
//
// Pixels are stored row-major: `[row, col]` in an `n x n` grid lives at
// `row * n + col`.

use std::ops::{Add, Div, Mul, Rem};

pub fn index2_to_1<T>([row, col]: [T; 2], n: T) -> T
where
    T: Mul<Output = T> + Add<Output = T>
{
    row * n + col
}

pub fn index1_to_2<T>(i: T, n: T) -> [T; 2]
where
    T: Div<Output = T> +
    Rem<Output = T> +
    Copy
{
    [i / n, i % n]
}

/// Row of the system matrix which holds `bin` of the projection at position
/// `angle_index` in the angle list.
#[inline]
pub fn system_matrix_row(angle_index: usize, bin: usize, n_sensors: usize) -> usize {
    angle_index * n_sensors + bin
}
