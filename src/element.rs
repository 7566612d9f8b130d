//! Output elements and the arena that owns them.
//!
//! Elements live in an [`ElementTree`] and refer to each other by
//! [`ElementId`]. Children are owned by position in the arena; parent and
//! sibling links are plain ids, so there is nothing to untangle when the
//! tree is dropped and a merge can never create a cycle.

use std::collections::BTreeMap;
use std::fmt;

use crate::layer::{Bounds, Layer, LayerKind};
use crate::style::StyleRule;

/// Index of an element in its [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One output node, derived from a single layer.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    tag: String,
    attributes: BTreeMap<String, String>,
    style: StyleRule,
    layer: &'a dyn Layer,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    siblings: Vec<ElementId>,
    detached: bool,
}

impl<'a> Element<'a> {
    /// Create an element. A non-empty `id` becomes the `id` attribute and the
    /// `#id` selector; otherwise the tag is the selector.
    pub fn new(tag: impl Into<String>, id: &str, layer: &'a dyn Layer) -> Self {
        let tag = tag.into();
        let mut attributes = BTreeMap::new();
        let style = if id.is_empty() {
            StyleRule::new(tag.clone())
        } else {
            attributes.insert("id".to_string(), id.to_string());
            StyleRule::new(format!("#{}", id))
        };

        Self {
            tag,
            attributes,
            style,
            layer,
            parent: None,
            children: Vec::new(),
            siblings: Vec::new(),
            detached: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element id, if it has a non-empty one.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn style(&self) -> &StyleRule {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleRule {
        &mut self.style
    }

    pub fn layer(&self) -> &'a dyn Layer {
        self.layer
    }

    /// Bounds of the layer currently backing this element.
    pub fn bounds(&self) -> Bounds {
        self.layer.bounds()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn siblings(&self) -> &[ElementId] {
        &self.siblings
    }

    /// Whether the element was absorbed into its parent by a merge.
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Arena of elements.
#[derive(Debug, Default)]
pub struct ElementTree<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> ElementTree<'a> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn insert(&mut self, element: Element<'a>) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> &Element<'a> {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element<'a> {
        &mut self.elements[id.0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All ids in creation order, detached ones included.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> {
        (0..self.elements.len()).map(ElementId)
    }

    /// Append `child` to `parent`'s children and point it back at `parent`.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.elements[parent.0].children.push(child);
        self.elements[child.0].parent = Some(parent);
    }

    /// Absorb `child` into `target`.
    ///
    /// The child is detached from its parent first; then its attributes are
    /// copied over the target's (the child's value wins on a shared key), its
    /// children are handed to the target, and the target takes over its
    /// layer. Properties the child pinned move to the target still pinned;
    /// the child's own rule is left empty.
    pub fn merge(&mut self, target: ElementId, child: ElementId) {
        if let Some(parent) = self.elements[child.0].parent.take() {
            self.elements[parent.0].children.retain(|&c| c != child);
        }
        self.elements[child.0].detached = true;

        let attributes = self.elements[child.0].attributes.clone();
        let layer = self.elements[child.0].layer;
        let grandchildren = std::mem::take(&mut self.elements[child.0].children);
        let pinned = self.elements[child.0].style.take_manual();

        let target_element = &mut self.elements[target.0];
        target_element.attributes.extend(attributes);
        target_element.layer = layer;
        for (property, value) in pinned {
            target_element.style.set_manual(property, value);
        }

        for grandchild in grandchildren {
            self.append_child(target, grandchild);
        }
    }

    /// Give every child of `parent` the full set of its peers, itself
    /// included.
    pub fn link_siblings(&mut self, parent: ElementId) {
        let peers = self.elements[parent.0].children.clone();
        for &peer in &peers {
            self.elements[peer.0].siblings = peers.clone();
        }
    }

    /// The element's peers in flow order: top edge first, then left edge,
    /// ties kept in layer order.
    pub fn flow_order(&self, id: ElementId) -> Vec<ElementId> {
        let mut peers = self.elements[id.0].siblings.clone();
        peers.sort_by_key(|&p| {
            let b = self.elements[p.0].bounds();
            (b.y, b.x)
        });
        peers
    }

    /// The peer immediately above this element in flow, if any.
    pub fn prev_in_flow(&self, id: ElementId) -> Option<ElementId> {
        let order = self.flow_order(id);
        let pos = order.iter().position(|&p| p == id)?;
        pos.checked_sub(1).map(|i| order[i])
    }

    /// The peer immediately after this element in flow, if any.
    pub fn next_in_flow(&self, id: ElementId) -> Option<ElementId> {
        let order = self.flow_order(id);
        let pos = order.iter().position(|&p| p == id)?;
        order.get(pos + 1).copied()
    }

    /// Kind of the layer backing the element's parent.
    pub fn parent_kind(&self, id: ElementId) -> Option<LayerKind> {
        self.elements[id.0]
            .parent
            .map(|p| self.elements[p.0].layer.kind())
    }

    /// Attached elements under `root`, depth-first, parents before children.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.elements[id.0].children.iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::ManifestLayer;
    use crate::types::Colour;

    fn layer(name: &str, x: i32, y: i32, w: i32, h: i32) -> ManifestLayer {
        ManifestLayer::solid(name, Bounds::new(x, y, w, h), Colour::WHITE)
    }

    #[test]
    fn test_new_element_selector() {
        let l = layer("box", 0, 0, 1, 1);
        let with_id = Element::new("div", "box", &l);
        assert_eq!(with_id.style().selector(), "#box");
        assert_eq!(with_id.id(), Some("box"));

        let without_id = Element::new("span", "", &l);
        assert_eq!(without_id.style().selector(), "span");
        assert_eq!(without_id.id(), None);
    }

    #[test]
    fn test_merge_moves_layer_and_attributes() {
        let folder = ManifestLayer::folder("logo", Bounds::new(0, 0, 10, 10), vec![]);
        let image = layer("logo", 2, 3, 4, 5);

        let mut tree = ElementTree::new();
        let target = tree.insert(Element::new("div", "logo", &folder));
        let child = tree.insert(Element::new("div", "logo", &image));
        tree.get_mut(target).set_attribute("class", "old");
        tree.get_mut(target).set_attribute("title", "kept");
        tree.get_mut(child).set_attribute("class", "new");
        tree.append_child(target, child);

        tree.merge(target, child);

        let merged = tree.get(target);
        assert!(merged.children().is_empty());
        assert_eq!(merged.attribute("class"), Some("new"));
        assert_eq!(merged.attribute("title"), Some("kept"));
        assert_eq!(merged.bounds(), Bounds::new(2, 3, 4, 5));
        assert_eq!(merged.layer().kind(), LayerKind::Normal);
        assert!(tree.get(child).is_detached());
        assert_eq!(tree.get(child).parent(), None);
    }

    #[test]
    fn test_flow_order() {
        let root = layer("root", 0, 0, 100, 100);
        let low = layer("low", 0, 50, 10, 10);
        let right = layer("right", 60, 0, 10, 10);
        let left = layer("left", 0, 0, 10, 10);

        let mut tree = ElementTree::new();
        let r = tree.insert(Element::new("body", "", &root));
        let a = tree.insert(Element::new("div", "low", &low));
        let b = tree.insert(Element::new("div", "right", &right));
        let c = tree.insert(Element::new("div", "left", &left));
        for id in [a, b, c] {
            tree.append_child(r, id);
        }
        tree.link_siblings(r);

        assert_eq!(tree.flow_order(a), vec![c, b, a]);
        assert_eq!(tree.prev_in_flow(c), None);
        assert_eq!(tree.next_in_flow(c), Some(b));
        assert_eq!(tree.prev_in_flow(a), Some(b));
        assert_eq!(tree.next_in_flow(a), None);
    }

    #[test]
    fn test_descendants_preorder() {
        let l = layer("x", 0, 0, 1, 1);
        let mut tree = ElementTree::new();
        let root = tree.insert(Element::new("body", "", &l));
        let a = tree.insert(Element::new("div", "a", &l));
        let b = tree.insert(Element::new("div", "b", &l));
        let a1 = tree.insert(Element::new("div", "aa", &l));
        tree.append_child(root, a);
        tree.append_child(root, b);
        tree.append_child(a, a1);

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
    }
}
