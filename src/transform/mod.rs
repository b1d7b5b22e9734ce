//! Transform primitives shared by the coordinate-space layer.

pub mod matrix;
