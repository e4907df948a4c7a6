#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the emx environment-matrix runner
//!
//! This crate provides the shared data model: the parsed matrix document,
//! resolved environment specifications, merge semantics, and the report
//! types produced by a run.

pub mod matrix;
pub mod report;

pub use matrix::{
    DocumentModel, EnvironmentSettings, EnvironmentSpec, MergeStrategy, COLLECTION_FIELDS,
};
pub use report::{EnvFailure, EnvReport, EnvStatus, RunReport};
