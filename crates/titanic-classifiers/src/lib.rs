//! titanic-classifiers: baseline and library-backed classifiers plus the
//! error-estimation tooling used to evaluate them on the Titanic dataset.
//!
//! The crate provides two hand-written baselines (majority vote and random),
//! thin wrappers around linfa's decision tree and nearest-neighbour search,
//! a deterministic train/test splitter, repeated holdout and stratified
//! cross-validation estimators, hyperparameter sweeps and a learning curve,
//! CSV input/output and plotly/maud reporting.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
