//! strata - layered design documents to HTML and CSS
//!
//! A library for turning the layer tree of a layered image document into a
//! styled page. Layer names carry the markup (`<tag>id[ns:key="value"]`),
//! layer geometry and pixels carry the layout.

pub mod builder;
pub mod cli;
pub mod convert;
pub mod diagnostics;
pub mod document;
pub mod element;
pub mod error;
pub mod heuristics;
pub mod layer;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod parser;
pub mod style;
pub mod types;

pub use builder::{BuiltTree, TreeBuilder, MAX_DEPTH};
pub use convert::{write_document, Conversion, Converter, OUTPUT_FILE};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use document::{CommentTemplate, Document, DEFAULT_TITLE};
pub use element::{Element, ElementId, ElementTree};
pub use error::{Result, StrataError};
pub use heuristics::{ClassSelector, ContainFloats, Heuristic, HeuristicChain};
pub use layer::{Bounds, Layer, LayerDocument, LayerKind, LayerManifest, ManifestLayer};
pub use layout::LayoutEngine;
pub use metadata::{AttributeHandler, CssHandler, MetadataHandler, MetadataRegistry};
pub use parser::{parse_layer_name, Configuration, ParsedLayerName};
pub use style::StyleRule;
pub use types::Colour;
