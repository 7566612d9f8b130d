//! Core value types shared by the layer model and the layout engine.

mod colour;

pub use colour::Colour;
