//! Paint model for flat-colored geometry.
//!
//! Every drawable carries a single opaque RGB color; there is no alpha, no
//! gradients and no lighting.

pub mod color;

pub use color::Color;
