//! Core compute primitives.
//!
//! The training design matrix handed to the decision tree lives here.

mod matrix;

pub use matrix::Matrix;
