//! Box-model inference from layer geometry.
//!
//! Runs once per element after the tree is final. Every write goes through
//! [`StyleRule::infer`](crate::style::StyleRule::infer), so properties pinned
//! by `css:` metadata are left alone.
//!
//! Flow is the element's peer set ordered by top edge, then left edge. The
//! element before this one in that order is its predecessor ("above" it),
//! the one after is its successor.

use crate::element::{ElementId, ElementTree};
use crate::layer::LayerKind;
use crate::style::{parse_px, px};

/// Derives background, size, margins, padding and floats for elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Infer the style of one element.
    pub fn infer_style(&self, tree: &mut ElementTree<'_>, id: ElementId) {
        self.background(tree, id);
        self.dimensions(tree, id);

        if tree.parent_kind(id) == Some(LayerKind::Normal) {
            self.box_model(tree, id);
        }
    }

    /// Solid background from the layer's top-left pixel.
    fn background(&self, tree: &mut ElementTree<'_>, id: ElementId) {
        let element = tree.get_mut(id);
        match element.layer().sample(0, 0) {
            Some(colour) if !colour.is_transparent() => {
                element.style_mut().infer("background", colour.to_css_rgb());
            }
            _ => log::trace!("{}: no solid background", element.style().selector()),
        }
    }

    /// Explicit width and height, except on the root.
    fn dimensions(&self, tree: &mut ElementTree<'_>, id: ElementId) {
        let element = tree.get_mut(id);
        if element.parent().is_none() {
            return;
        }
        let bounds = element.bounds();
        let style = element.style_mut();
        style.infer("width", px(bounds.width.into()));
        style.infer("height", px(bounds.height.into()));
    }

    /// Centering, parent padding, sibling margins and floats.
    fn box_model(&self, tree: &mut ElementTree<'_>, id: ElementId) {
        let Some(parent) = tree.get(id).parent() else {
            return;
        };
        let pb = tree.get(parent).bounds();
        let b = tree.get(id).bounds();

        if pb.right() - b.right() == i64::from(b.x) - i64::from(pb.x) {
            let style = tree.get_mut(id).style_mut();
            style.infer("margin-left", "auto");
            style.infer("margin-right", "auto");
        }

        let prev = tree.prev_in_flow(id);
        let next = tree.next_in_flow(id);

        let offset = i64::from(b.y) - i64::from(pb.y);
        if prev.is_none() && offset > 0 {
            let parent_style = tree.get_mut(parent).style_mut();
            if parent_style.infer("padding-top", px(offset)) {
                if let Some(height) = parent_style.get("height").and_then(parse_px) {
                    parent_style.infer("height", px(height.saturating_sub(offset).max(0)));
                }
            }
        }

        let Some(next) = next else {
            return;
        };
        let nb = tree.get(next).bounds();

        let gap = i64::from(nb.y) - b.bottom();
        if gap > 0 {
            tree.get_mut(next).style_mut().infer("margin-top", px(gap));
        }

        if nb.y == b.y {
            tree.get_mut(id).style_mut().infer("float", "left");
            tree.get_mut(next).style_mut().infer("float", "left");

            let gap = i64::from(nb.x) - b.right();
            if gap > 0 {
                tree.get_mut(id).style_mut().infer("margin-right", px(gap));
            }
        }
    }
}
