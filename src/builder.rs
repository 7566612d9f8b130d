//! Builds the element tree from a layer tree.
//!
//! Layers are visited depth-first. Each one becomes an element whose rule is
//! registered in the stylesheet in visiting order. A folder that wraps a
//! normal layer with the same identifier collapses into that layer:
//!
//! ```text
//! F logo            ->   <div id="logo">   (geometry of L logo)
//!   L logo
//! ```
//!
//! Once a layer's children are all built, each retained child learns its
//! full peer set, which layout later orders into flow.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::element::{Element, ElementId, ElementTree};
use crate::error::{Result, StrataError};
use crate::layer::{Layer, LayerKind};
use crate::metadata::MetadataRegistry;
use crate::parser::{parse_layer_name, ParsedLayerName};

/// Nesting depth past which a layer tree is treated as malformed.
pub const MAX_DEPTH: usize = 256;

/// The result of building: the arena, its root and the stylesheet order.
#[derive(Debug)]
pub struct BuiltTree<'a> {
    pub tree: ElementTree<'a>,
    pub root: ElementId,
    /// Element ids whose rules make up the stylesheet, in construction order.
    pub stylesheet: Vec<ElementId>,
}

/// Turns a layer tree into an [`ElementTree`].
#[derive(Debug)]
pub struct TreeBuilder<'r> {
    metadata: &'r MetadataRegistry,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(metadata: &'r MetadataRegistry) -> Self {
        Self { metadata }
    }

    /// Build the tree rooted at `root`.
    ///
    /// Bad layer names and metadata only produce diagnostics; a missing
    /// child or a tree nested deeper than [`MAX_DEPTH`] is an error.
    pub fn build<'a>(
        &self,
        root: &'a dyn Layer,
        diagnostics: &mut Diagnostics,
    ) -> Result<BuiltTree<'a>> {
        let mut state = BuildState {
            tree: ElementTree::new(),
            stylesheet: Vec::new(),
        };

        let (root_id, _) = self.build_layer(root, 0, &mut state, diagnostics)?;

        log::debug!(
            "built {} element(s) from layer '{}'",
            state.tree.len(),
            root.name()
        );
        Ok(BuiltTree {
            tree: state.tree,
            root: root_id,
            stylesheet: state.stylesheet,
        })
    }

    /// Build one layer and its subtree. Returns the element and the layer's
    /// parsed identifier.
    fn build_layer<'a>(
        &self,
        layer: &'a dyn Layer,
        depth: usize,
        state: &mut BuildState<'a>,
        diagnostics: &mut Diagnostics,
    ) -> Result<(ElementId, String)> {
        if depth > MAX_DEPTH {
            return Err(StrataError::Structure {
                message: format!(
                    "layer '{}' is nested more than {} levels deep",
                    layer.name(),
                    MAX_DEPTH
                ),
                help: Some("The layer tree may contain a cycle".to_string()),
            });
        }

        let parsed = parse_layer_name(layer.name()).unwrap_or_else(|e| {
            diagnostics.push(
                Diagnostic::warning("strata::layer-name", e.to_string())
                    .on_layer(layer.name())
                    .with_help("The layer is kept as an empty element"),
            );
            ParsedLayerName::empty()
        });

        let mut element = Element::new(parsed.tag.as_str(), &parsed.id, layer);
        self.metadata
            .apply(&mut element, &parsed.attributes, diagnostics);

        let id = state.tree.insert(element);
        state.stylesheet.push(id);

        for index in 0..layer.child_count() {
            let child_layer = layer.child(index).ok_or_else(|| StrataError::Structure {
                message: format!(
                    "layer '{}' reports {} children but child {} is missing",
                    layer.name(),
                    layer.child_count(),
                    index
                ),
                help: None,
            })?;

            let (child, child_id) = self.build_layer(child_layer, depth + 1, state, diagnostics)?;
            state.tree.append_child(id, child);

            if is_merge_pair(layer, &parsed.id, child_layer, &child_id) {
                log::debug!("merging layer '{}' into its folder", child_layer.name());
                state.tree.merge(id, child);
            }
        }

        state.tree.link_siblings(id);

        Ok((id, parsed.id))
    }
}

struct BuildState<'a> {
    tree: ElementTree<'a>,
    stylesheet: Vec<ElementId>,
}

/// A folder and a direct normal child sharing a non-empty identifier.
fn is_merge_pair(folder: &dyn Layer, folder_id: &str, child: &dyn Layer, child_id: &str) -> bool {
    folder.kind() == LayerKind::Folder
        && child.kind() == LayerKind::Normal
        && !folder_id.is_empty()
        && folder_id == child_id
}
