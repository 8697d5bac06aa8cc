//! vrig - head-relative VR locomotion
//!
//! The library side of the root package only carries the application
//! configuration; the engine pieces live in the `vrig_*` crates.

pub mod config;
