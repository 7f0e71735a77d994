//! Command line driver for the Titanic evaluation: configuration handling,
//! the evaluation pipeline and prediction output.
pub mod config;
pub mod pipeline;
pub mod util;
