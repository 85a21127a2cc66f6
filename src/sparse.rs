//! Sparse storage of the system matrix.
//!
//! Entries are first collected as (row, column, weight) triplets, in any
//! order and with repeats allowed. Compressing them into a `CsrMatrix` sorts
//! them into row-major order and *sums* the weights of entries which share
//! the same (row, column): repeated contributions accumulate, they never
//! overwrite each other.

use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Error, Result};
use crate::types::{Index1_u, Triplet, Weightf32};

// ----- Coordinate (COO) format -------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triplets {
    shape: (usize, usize),
    entries: Vec<Triplet>,
}

impl Triplets {

    pub fn new(shape: (usize, usize)) -> Self { Self { shape, entries: vec![] } }

    pub fn with_capacity(shape: (usize, usize), capacity: usize) -> Self {
        Self { shape, entries: Vec::with_capacity(capacity) }
    }

    pub fn shape(&self) -> (usize, usize) { self.shape }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn push(&mut self, row: Index1_u, col: Index1_u, weight: Weightf32) -> Result<()> {
        let (n_rows, n_cols) = self.shape;
        if row >= n_rows || col >= n_cols {
            return Err(Error::IndexOutOfBounds { row, col, n_rows, n_cols })
        }
        self.entries.push((row, col, weight));
        Ok(())
    }

    /// Append entries which are already known to lie within the shape.
    pub(crate) fn extend_unchecked(&mut self, entries: impl IntoIterator<Item = Triplet>) {
        let start = self.entries.len();
        self.entries.extend(entries);
        debug_assert!(self.entries[start..].iter().all(|&(r, c, _)| r < self.shape.0 && c < self.shape.1));
    }

    pub fn iter(&self) -> std::slice::Iter<Triplet> { self.entries.iter() }
}

impl<'a> IntoIterator for &'a Triplets {
    type Item = Triplet;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, Self::Item>>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().cloned()
    }
}

// ----- Compressed Sparse Row (CSR) format --------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    /// Entries of row `r` live in `row_ptr[r]..row_ptr[r+1]`
    row_ptr: Vec<usize>,
    col_idx: Vec<Index1_u>,
    values : Vec<Weightf32>,
}

impl From<Triplets> for CsrMatrix {
    fn from(triplets: Triplets) -> Self { Self::from_triplets(&triplets) }
}

impl CsrMatrix {

    pub fn zeros((n_rows, n_cols): (usize, usize)) -> Self {
        Self { n_rows, n_cols, row_ptr: vec![0; n_rows + 1], col_idx: vec![], values: vec![] }
    }

    /// Compress `triplets`, summing the weights of any entries with identical
    /// coordinates.
    pub fn from_triplets(triplets: &Triplets) -> Self {
        let (n_rows, n_cols) = triplets.shape();

        // Counting sort on rows: find where each row starts ...
        let mut starts = vec![0; n_rows + 1];
        for &(row, _, _) in triplets.iter() { starts[row + 1] += 1; }
        for r in 0..n_rows { starts[r + 1] += starts[r]; }

        // ... and drop every entry into its row's slot, preserving input order
        let mut next = starts.clone();
        let mut by_row = vec![(0, 0.0); triplets.len()];
        for &(row, col, weight) in triplets.iter() {
            by_row[next[row]] = (col, weight);
            next[row] += 1;
        }

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(triplets.len());
        let mut values  = Vec::with_capacity(triplets.len());
        row_ptr.push(0);
        for r in 0..n_rows {
            let row = &mut by_row[starts[r]..starts[r + 1]];
            row.sort_by_key(|&(col, _)| col);
            let merged = row.iter().copied().coalesce(|(c1, w1), (c2, w2)| {
                if c1 == c2 { Ok((c1, w1 + w2)) }
                else        { Err(((c1, w1), (c2, w2))) }
            });
            for (col, weight) in merged {
                col_idx.push(col);
                values .push(weight);
            }
            row_ptr.push(col_idx.len());
        }
        Self { n_rows, n_cols, row_ptr, col_idx, values }
    }

    pub fn shape (&self) -> (usize, usize) { (self.n_rows, self.n_cols) }
    pub fn n_rows(&self) -> usize { self.n_rows }
    pub fn n_cols(&self) -> usize { self.n_cols }

    /// Number of stored (structurally non-zero) entries
    pub fn nnz(&self) -> usize { self.values.len() }

    /// Column indices and weights of the stored entries in `row`
    pub fn row(&self, row: Index1_u) -> impl Iterator<Item = (Index1_u, Weightf32)> + '_ {
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[span.clone()].iter().copied()
            .zip(self.values[span].iter().copied())
    }

    /// Value at (`row`, `col`); zero if nothing is stored there or if the
    /// position lies outside the matrix.
    pub fn get(&self, row: Index1_u, col: Index1_u) -> Weightf32 {
        if row >= self.n_rows || col >= self.n_cols { return 0.0 }
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        match self.col_idx[span.clone()].binary_search(&col) {
            Ok(k) => self.values[span.start + k],
            Err(_) => 0.0,
        }
    }

    /// All stored entries, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Triplet> + '_ {
        (0..self.n_rows)
            .flat_map(move |r| self.row(r).map(move |(c, w)| (r, c, w)))
    }

    /// Matrix-vector product `A x`
    pub fn dot(&self, x: ArrayView1<Weightf32>) -> Result<Array1<Weightf32>> {
        check_len(self.n_cols, x.len())?;
        Ok((0..self.n_rows)
           .map(|r| self.row(r).map(|(c, w)| w * x[c]).sum::<Weightf32>())
           .collect())
    }

    /// Transposed matrix-vector product `Aᵀ y`, without building `Aᵀ`
    pub fn transpose_dot(&self, y: ArrayView1<Weightf32>) -> Result<Array1<Weightf32>> {
        check_len(self.n_rows, y.len())?;
        let mut out = Array1::zeros(self.n_cols);
        for (r, &yr) in y.iter().enumerate() {
            if yr == 0.0 { continue }
            for (c, w) in self.row(r) { out[c] += w * yr }
        }
        Ok(out)
    }

    pub fn to_dense(&self) -> Array2<Weightf32> {
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));
        for (r, c, w) in self.iter() { dense[[r, c]] = w }
        dense
    }
}

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected == found { Ok(()) }
    else { Err(Error::DimensionMismatch { expected: vec![expected], found: vec![found] }) }
}
