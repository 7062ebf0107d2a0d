//! # Domain Models
//!
//! Pure configuration and registry types for the wiring layer.
//! Keep it lean: no I/O and no construction logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod registry;
