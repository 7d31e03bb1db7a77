//! Core business logic module
//!
//! # Submodules
//!
//! - [`build_config`] - Build request and job count resolution
//! - [`builder`] - Build orchestration logic
//! - [`clean`] - Build directory removal
//! - [`doctor`] - Toolchain checks
//! - [`global_config`] - User configuration file

pub mod build_config;
pub mod builder;
pub mod clean;
pub mod doctor;
pub mod global_config;
