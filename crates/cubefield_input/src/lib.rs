//! Input handling for cubefield
//!
//! Provides the fly-camera [`CameraController`] and the [`CameraControl`]
//! trait it drives. The render crate's camera implements the trait, so
//! this crate stays free of any rendering dependency.

pub mod camera_controller;

pub use camera_controller::{CameraControl, CameraController};
