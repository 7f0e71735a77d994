//! Small ndarray-like containers used for features and labels.
//!
//! `Array2` is a row-major matrix and `Array1` a plain vector wrapper. They
//! keep the crate's public API free of backend types; conversion into
//! `ndarray` happens only at the linfa boundary in `models::utils`.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
