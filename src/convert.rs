//! The conversion pipeline.
//!
//! ```text
//! LayerDocument ─▶ TreeBuilder ─▶ LayoutEngine ─▶ HeuristicChain ─▶ Document
//!                  (names, merge)  (per element)   (per element)
//! ```
//!
//! Building and inference are separate passes: layout needs every element's
//! final parent and peer set, and those are only known once the whole tree
//! has been built and merged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::TreeBuilder;
use crate::diagnostics::Diagnostics;
use crate::document::Document;
use crate::error::{Result, StrataError};
use crate::heuristics::HeuristicChain;
use crate::layer::LayerDocument;
use crate::layout::LayoutEngine;
use crate::metadata::MetadataRegistry;
use crate::parser::config::{Configuration, CONFIGURATION_GROUP};

/// File name of the generated page inside the output directory.
pub const OUTPUT_FILE: &str = "index.html";

/// A finished conversion and everything that went wrong on the way.
#[derive(Debug)]
pub struct Conversion<'a> {
    pub document: Document<'a>,
    pub diagnostics: Diagnostics,
}

/// Runs the pipeline with a fixed set of metadata handlers and heuristics.
#[derive(Debug)]
pub struct Converter {
    metadata: MetadataRegistry,
    heuristics: HeuristicChain,
    layout: LayoutEngine,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// A converter with the builtin handlers and heuristics.
    pub fn new() -> Self {
        Self {
            metadata: MetadataRegistry::builtin(),
            heuristics: HeuristicChain::builtin(),
            layout: LayoutEngine::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: MetadataRegistry) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_heuristics(mut self, heuristics: HeuristicChain) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataRegistry {
        &mut self.metadata
    }

    pub fn heuristics_mut(&mut self) -> &mut HeuristicChain {
        &mut self.heuristics
    }

    /// Convert a layered document.
    ///
    /// Layer 0 is the page body. Layer 1, when named `configuration`, holds
    /// settings; any other top-level layer is ignored.
    pub fn convert<'a>(&self, source: &'a dyn LayerDocument) -> Result<Conversion<'a>> {
        let body = source.layer(0).ok_or_else(|| StrataError::Structure {
            message: "document has no layers".to_string(),
            help: Some("The first top-level layer becomes the page body".to_string()),
        })?;

        let mut diagnostics = Diagnostics::new();

        let config = match source.layer(1) {
            Some(group) if group.name() == CONFIGURATION_GROUP => {
                Configuration::from_group(group, &mut diagnostics)
            }
            _ => Configuration::new(),
        };
        for index in 1..source.layer_count() {
            if let Some(layer) = source.layer(index) {
                if index > 1 || layer.name() != CONFIGURATION_GROUP {
                    log::debug!("ignoring top-level layer '{}'", layer.name());
                }
            }
        }

        let mut built = TreeBuilder::new(&self.metadata).build(body, &mut diagnostics)?;

        let root = built.tree.get_mut(built.root).style_mut();
        root.infer("margin", "0px");
        root.infer("padding", "0px");

        for id in built.tree.descendants(built.root) {
            self.layout.infer_style(&mut built.tree, id);
            self.heuristics.apply(&mut built.tree, id, &mut diagnostics);
        }

        log::debug!(
            "converted {} element(s) with {} diagnostic(s)",
            built.tree.len(),
            diagnostics.len()
        );

        Ok(Conversion {
            document: Document::new(built.tree, built.root, built.stylesheet, config),
            diagnostics,
        })
    }
}

/// Render `document` into `output_dir`, creating the directory if needed.
///
/// Returns the path of the written page.
pub fn write_document(document: &Document<'_>, output_dir: &Path) -> Result<PathBuf> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| StrataError::Io {
            path: output_dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let path = output_dir.join(OUTPUT_FILE);
    fs::write(&path, document.render()).map_err(|e| StrataError::Io {
        path: path.clone(),
        message: format!("Failed to write document: {}", e),
    })?;

    log::info!("wrote {}", path.display());
    Ok(path)
}
