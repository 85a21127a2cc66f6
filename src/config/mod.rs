pub mod matrix;
pub use matrix::{Config, read_config_file};
