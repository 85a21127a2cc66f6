use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use sinomat::{system_matrix, SystemMatrix, SystemMatrixBuilder, Rounding};

// Sensor hit by each pixel in the projection at `angle_index`
fn bins(m: &SystemMatrix, angle_index: usize) -> Vec<Option<usize>> {
    let n_sensors = m.n_sensors();
    let block = angle_index * n_sensors .. (angle_index + 1) * n_sensors;
    let mut bins = vec![None; m.shape().1];
    for (row, col, _) in m.iter().filter(|(row, _, _)| block.contains(row)) {
        bins[col] = Some(row - block.start);
    }
    bins
}

// --------------------------------------------------------------------------------
#[test]
fn three_pixels_five_sensors() {
    let m = system_matrix(3, &[0.0], Some(5)).unwrap();
    assert_eq!(m.shape(), (5, 9));
    assert_eq!(m.nnz(), 9);
    let hits: Vec<usize> = (0..5).map(|sensor| m.row(sensor).count()).collect();
    assert_eq!(hits, vec![0, 3, 3, 3, 0]);
}

#[test]
fn no_angles() {
    let m = system_matrix(4, &[], None).unwrap();
    assert_eq!(m.shape(), (0, 16));
    assert_eq!(m.nnz(), 0);
}

// At 0°, a pixel's projection is its row coordinate. With M = Np:
// + odd M: coordinates are whole numbers -(M div 2) ..= M div 2, all of which land
//   on the detector.
// + M = 4: coordinates -2, -2/3, 2/3, 2 land on sensors 0, 1, 3, 4; sensor 4
//   does not exist, so a whole row of pixels is lost.
#[rstest(/**/ n, expected_nnz,
         case(1,  1),
         case(3,  9),
         case(5, 25),
         case(4, 12),
)]
fn zero_degrees_with_as_many_sensors_as_pixels(n: usize, expected_nnz: usize) {
    let m = system_matrix(n, &[0.0], Some(n)).unwrap();
    assert_eq!(m.nnz(), expected_nnz);
}

#[test]
fn opposite_directions_mirror_each_other() {
    let m = system_matrix(5, &[0.0, 180.0], None).unwrap();
    let centre = m.detector().offset() as isize;
    let forward  = bins(&m, 0);
    let backward = bins(&m, 1);
    for (pixel, (f, b)) in forward.iter().zip(backward.iter()).enumerate() {
        let (f, b) = (f.unwrap() as isize, b.unwrap() as isize);
        assert_eq!(f - centre, centre - b, "pixel {pixel}");
    }
    let hit = |bins: &[Option<usize>]| bins.iter().flatten().copied().collect::<HashSet<_>>();
    let mirrored: HashSet<_> = hit(&forward[..]).into_iter().map(|s| (2 * centre - s as isize) as usize).collect();
    assert_eq!(mirrored, hit(&backward[..]));
}

#[test]
fn too_few_sensors_drop_corners() {
    let (n, angles) = (5, [45.0]);
    let full    = system_matrix(n, &angles, None).unwrap();
    let cropped = system_matrix(n, &angles, Some(5)).unwrap();
    assert_eq!(full.nnz(), n * n);
    assert!(cropped.nnz() < n * n);
    // Both ends of the diagonal at 45° miss the cropped detector
    let corners = [0, n * n - 1];
    for (pixel, bin) in bins(&cropped, 0).into_iter().enumerate() {
        if corners.contains(&pixel) { assert_eq!(bin, None, "pixel {pixel}") }
    }
}

#[test]
fn default_sensors_can_miss_corners_of_even_grids() {
    // Corner coordinates of an even grid are ±M/2, not ±(M-1)/2, so the
    // diagonal at 45° overshoots the default detector by one sensor.
    let m = system_matrix(4, &[45.0], None).unwrap();
    assert_eq!(m.n_sensors(), 6);
    assert!(m.nnz() < 16);
}

#[test]
fn repeated_angles_repeat_blocks() {
    let m = system_matrix(3, &[30.0, 30.0], None).unwrap();
    assert_eq!(bins(&m, 0), bins(&m, 1));
    assert_eq!(m.nnz(), 18);
}

#[test]
fn deterministic() {
    let angles: Vec<f64> = (0..36).map(|i| i as f64 * 10.0 - 90.0).collect();
    let builder = SystemMatrixBuilder::new(21).sensors(27);
    let a = builder.build_degrees(&angles).unwrap();
    let b = builder.build_degrees(&angles).unwrap();
    assert_eq!(a, b);
    let bits = |m: &SystemMatrix| m.iter().map(|(r, c, w)| (r, c, w.to_bits())).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn reference_example() {
    // M = 195, angles -90, 0, 90, 180, Np = 275: the whole grid fits on the
    // detector at these angles.
    let m = system_matrix(195, &[-90.0, 0.0, 90.0, 180.0], Some(275)).unwrap();
    assert_eq!(m.shape(), (4 * 275, 195 * 195));
    assert_eq!(m.nnz(), 4 * 195 * 195);
}

#[test]
fn rounding_conventions_agree_away_from_ties() {
    let angles = [0.0, 90.0, 180.0];
    let even = SystemMatrixBuilder::new(5).rounding(Rounding::HalfEven).build_degrees(&angles).unwrap();
    let away = SystemMatrixBuilder::new(5).rounding(Rounding::HalfAway).build_degrees(&angles).unwrap();
    assert_eq!(even.csr(), away.csr());
}

// --------------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shape_and_occupancy(
        n       in 1..25_usize,
        sensors in prop::option::of(1..40_usize),
        angles  in prop::collection::vec(-360.0..360.0_f64, 0..6),
    ) {
        let m = system_matrix(n, &angles, sensors).unwrap();
        let n_sensors = sensors.unwrap_or(m.grid().default_sensor_count());
        prop_assert_eq!(m.shape(), (angles.len() * n_sensors, n * n));
        prop_assert!(m.nnz() <= angles.len() * n * n);

        // Every weight is exactly one, and no pixel appears twice in any
        // projection
        let mut seen = HashSet::new();
        for (row, col, weight) in m.iter() {
            prop_assert_eq!(weight, 1.0);
            prop_assert!(seen.insert((row / n_sensors, col)));
        }
    }

    #[test]
    fn default_sensors_catch_every_pixel_of_odd_grids(
        half   in 0..15_usize,
        angles in prop::collection::vec(-360.0..360.0_f64, 1..6),
    ) {
        let n = 2 * half + 1;
        let m = system_matrix(n, &angles, None).unwrap();
        prop_assert_eq!(m.nnz(), angles.len() * n * n);
    }
}
