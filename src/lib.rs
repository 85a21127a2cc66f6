mod exports;
pub use exports::*;

pub mod error;
pub mod types;
pub mod index;
pub mod grid;
pub mod detector;
pub mod sparse;
pub mod system_matrix;
pub mod projector;
pub mod config;
pub mod utils;
