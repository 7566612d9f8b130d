//! The layer tree strata reads from.
//!
//! Decoding a design file is somebody else's job: anything that can expose
//! named, positioned layers with a colour sampler implements [`Layer`], and a
//! document of top-level layers implements [`LayerDocument`]. The
//! [`manifest`] module provides one such implementation backed by a YAML or
//! JSON description plus optional raster files.

pub mod manifest;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Colour;

pub use manifest::{LayerManifest, ManifestLayer};

/// Whether a layer is a plain raster layer or a group of other layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Normal,
    Folder,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Normal => write!(f, "normal"),
            LayerKind::Folder => write!(f, "folder"),
        }
    }
}

/// Pixel bounds of a layer in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge. Widened so edge arithmetic on any
    /// pair of `i32` bounds can't overflow.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// A single node of an external layer tree.
pub trait Layer: fmt::Debug {
    /// The display name as typed by the designer.
    fn name(&self) -> &str;

    fn bounds(&self) -> Bounds;

    fn kind(&self) -> LayerKind;

    /// Number of direct children.
    fn child_count(&self) -> usize;

    /// Child at `index`, or `None` if the tree has no such child.
    fn child(&self, index: usize) -> Option<&dyn Layer>;

    /// Sample one pixel of the layer's raster, relative to its top-left
    /// corner. Returns `None` outside the raster.
    fn sample(&self, x: u32, y: u32) -> Option<Colour>;
}

/// Top-level access to a layered document.
///
/// Layer 0 is the page body; layer 1, when named `configuration`, holds
/// conversion settings.
pub trait LayerDocument {
    fn layer_count(&self) -> usize;

    fn layer(&self, index: usize) -> Option<&dyn Layer>;
}
