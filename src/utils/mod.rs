//! Utility functions for the unwrapping pipeline
//!
//! - Reflect padding and cropping for FFT boundary handling

pub mod padding;

pub use padding::*;
