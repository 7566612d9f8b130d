//! Layer manifests: a layer tree described in YAML or JSON.
//!
//! ```yaml
//! layers:
//!   - name: "<body>"
//!     width: 800
//!     height: 600
//!     fill: "#ffffff"
//!     children:
//!       - name: header
//!         width: 800
//!         height: 120
//!         image: header.png
//!   - name: configuration
//!     children:
//!       - name: 'title="Landing page"'
//! ```
//!
//! A layer with children and no pixels of its own (`fill` or `image`) is a
//! folder; everything else is a normal layer. `kind` overrides both. Raster
//! paths are resolved relative to the manifest's directory and decoded
//! eagerly, so sampling never touches the filesystem.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::types::Colour;

use super::{Bounds, Layer, LayerDocument, LayerKind};

/// On-disk shape of a manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

/// On-disk shape of one layer entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerDef {
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    /// Solid fill colour (`#RRGGBB`).
    #[serde(default)]
    pub fill: Option<String>,
    /// Raster file, relative to the manifest.
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub kind: Option<LayerKind>,
    #[serde(default)]
    pub children: Vec<LayerDef>,
}

/// Pixel content of a manifest layer.
#[derive(Debug, Clone)]
enum Raster {
    Empty,
    Solid(Colour),
    Image(RgbaImage),
}

/// A loaded manifest layer.
#[derive(Debug, Clone)]
pub struct ManifestLayer {
    name: String,
    bounds: Bounds,
    kind: LayerKind,
    raster: Raster,
    children: Vec<ManifestLayer>,
}

impl ManifestLayer {
    /// Create a normal layer with a solid fill.
    pub fn solid(name: impl Into<String>, bounds: Bounds, fill: Colour) -> Self {
        Self {
            name: name.into(),
            bounds,
            kind: LayerKind::Normal,
            raster: Raster::Solid(fill),
            children: Vec::new(),
        }
    }

    /// Create a folder layer with no pixels of its own.
    pub fn folder(name: impl Into<String>, bounds: Bounds, children: Vec<ManifestLayer>) -> Self {
        Self {
            name: name.into(),
            bounds,
            kind: LayerKind::Folder,
            raster: Raster::Empty,
            children,
        }
    }

    /// Create a normal layer backed by a decoded raster.
    pub fn raster(name: impl Into<String>, bounds: Bounds, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            bounds,
            kind: LayerKind::Normal,
            raster: Raster::Image(image),
            children: Vec::new(),
        }
    }

    /// Attach children, keeping the current kind.
    pub fn with_children(mut self, children: Vec<ManifestLayer>) -> Self {
        self.children = children;
        self
    }

    fn from_def(def: LayerDef, base_dir: &Path) -> Result<Self> {
        if def.width < 0 || def.height < 0 {
            return Err(StrataError::Parse {
                message: format!(
                    "Layer '{}' has negative size {}x{}",
                    def.name, def.width, def.height
                ),
                help: Some("Layer width and height must be zero or more".to_string()),
            });
        }

        let raster = match (&def.fill, &def.image) {
            (Some(_), Some(_)) => {
                return Err(StrataError::Parse {
                    message: format!("Layer '{}' has both fill and image", def.name),
                    help: Some("Use either `fill` or `image`, not both".to_string()),
                });
            }
            (Some(fill), None) => Raster::Solid(Colour::from_hex(fill)?),
            (None, Some(image)) => Raster::Image(load_raster(&base_dir.join(image))?),
            (None, None) => Raster::Empty,
        };

        let kind = def.kind.unwrap_or(match raster {
            Raster::Empty if !def.children.is_empty() => LayerKind::Folder,
            _ => LayerKind::Normal,
        });

        let children = def
            .children
            .into_iter()
            .map(|child| Self::from_def(child, base_dir))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: def.name,
            bounds: Bounds::new(def.x, def.y, def.width, def.height),
            kind,
            raster,
            children,
        })
    }
}

impl Layer for ManifestLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&dyn Layer> {
        self.children.get(index).map(|c| c as &dyn Layer)
    }

    fn sample(&self, x: u32, y: u32) -> Option<Colour> {
        match &self.raster {
            Raster::Empty => None,
            Raster::Solid(colour) => {
                let inside = i64::from(x) < i64::from(self.bounds.width)
                    && i64::from(y) < i64::from(self.bounds.height);
                inside.then_some(*colour)
            }
            Raster::Image(image) => image.get_pixel_checked(x, y).map(|p| Colour::from(*p)),
        }
    }
}

/// A document loaded from a layer manifest.
#[derive(Debug, Clone, Default)]
pub struct LayerManifest {
    layers: Vec<ManifestLayer>,
}

impl LayerManifest {
    pub fn new(layers: Vec<ManifestLayer>) -> Self {
        Self { layers }
    }

    /// Load a manifest file, choosing YAML or JSON by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StrataError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::parse_json(&content, base_dir),
            _ => Self::parse_yaml(&content, base_dir),
        }
    }

    /// Parse a YAML manifest. Raster paths resolve against `base_dir`.
    pub fn parse_yaml(content: &str, base_dir: &Path) -> Result<Self> {
        let file: ManifestFile = serde_yaml::from_str(content).map_err(|e| StrataError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check the manifest's YAML syntax".to_string()),
        })?;
        Self::from_file(file, base_dir)
    }

    /// Parse a JSON manifest. Raster paths resolve against `base_dir`.
    pub fn parse_json(content: &str, base_dir: &Path) -> Result<Self> {
        let file: ManifestFile = serde_json::from_str(content).map_err(|e| StrataError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check the manifest's JSON syntax".to_string()),
        })?;
        Self::from_file(file, base_dir)
    }

    fn from_file(file: ManifestFile, base_dir: &Path) -> Result<Self> {
        let layers = file
            .layers
            .into_iter()
            .map(|def| ManifestLayer::from_def(def, base_dir))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layers })
    }
}

impl LayerDocument for LayerManifest {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, index: usize) -> Option<&dyn Layer> {
        self.layers.get(index).map(|l| l as &dyn Layer)
    }
}

fn load_raster(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| StrataError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to decode raster: {}", e),
    })?;
    Ok(image.to_rgba8())
}
