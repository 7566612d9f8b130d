//! Post-layout heuristics.
//!
//! Heuristics capture layout patterns the box-model pass doesn't know
//! about. Each one sees an element after its layout has been inferred and
//! may adjust its attributes or rules. They run in registration order; one
//! failing heuristic is reported and the rest still run.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::element::{ElementId, ElementTree};
use crate::error::{Result, StrataError};

/// A post-layout rule applied to every element.
///
/// Implementations report faults by returning `Err` and must not panic: the
/// chain turns an error into a diagnostic and moves on, but a panic aborts
/// the whole conversion.
pub trait Heuristic {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    fn change_element(&self, tree: &mut ElementTree<'_>, id: ElementId) -> Result<()>;
}

/// Ordered list of heuristics.
#[derive(Default)]
pub struct HeuristicChain {
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl HeuristicChain {
    /// A chain with no heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default chain: [`ClassSelector`], then [`ContainFloats`].
    pub fn builtin() -> Self {
        let mut chain = Self::new();
        chain.register(ClassSelector).register(ContainFloats);
        chain
    }

    /// Append a heuristic; it runs after every one registered before it.
    pub fn register(&mut self, heuristic: impl Heuristic + 'static) -> &mut Self {
        self.heuristics.push(Box::new(heuristic));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.heuristics.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }

    /// Run every heuristic against one element.
    pub fn apply(&self, tree: &mut ElementTree<'_>, id: ElementId, diagnostics: &mut Diagnostics) {
        for heuristic in &self.heuristics {
            if let Err(e) = heuristic.change_element(tree, id) {
                let layer = tree.get(id).layer().name().to_string();
                diagnostics.push(
                    Diagnostic::warning("strata::heuristic", e.to_string()).on_layer(layer),
                );
            }
        }
    }
}

impl std::fmt::Debug for HeuristicChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicChain")
            .field("heuristics", &self.names())
            .finish()
    }
}

/// Gives id-less elements with a `class` attribute a `tag.class` selector,
/// so their rules don't all land on the bare tag selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassSelector;

impl Heuristic for ClassSelector {
    fn name(&self) -> &str {
        "class-selector"
    }

    fn change_element(&self, tree: &mut ElementTree<'_>, id: ElementId) -> Result<()> {
        let element = tree.get_mut(id);
        if element.id().is_some() {
            return Ok(());
        }
        let Some(class) = element.attribute("class") else {
            return Ok(());
        };
        let Some(first) = class.split_whitespace().next() else {
            return Err(StrataError::Heuristic {
                name: self.name().to_string(),
                message: "class attribute is empty".to_string(),
            });
        };

        let selector = format!("{}.{}", element.tag(), first);
        element.style_mut().set_selector(selector);
        Ok(())
    }
}

/// Floated children don't contribute to their parent's height; give the
/// parent `overflow: hidden` so it still wraps them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainFloats;

impl Heuristic for ContainFloats {
    fn name(&self) -> &str {
        "contain-floats"
    }

    fn change_element(&self, tree: &mut ElementTree<'_>, id: ElementId) -> Result<()> {
        if tree.get(id).style().get("float").is_none() {
            return Ok(());
        }
        if let Some(parent) = tree.get(id).parent() {
            tree.get_mut(parent).style_mut().infer("overflow", "hidden");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::layer::{Bounds, ManifestLayer};
    use crate::types::Colour;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn layer() -> ManifestLayer {
        ManifestLayer::solid("x", Bounds::new(0, 0, 10, 10), Colour::WHITE)
    }

    #[test]
    fn test_builtin_order() {
        assert_eq!(
            HeuristicChain::builtin().names(),
            vec!["class-selector", "contain-floats"]
        );
    }

    #[test]
    fn test_class_selector() {
        let l = layer();
        let mut tree = ElementTree::new();
        let anon = tree.insert(Element::new("span", "", &l));
        tree.get_mut(anon).set_attribute("class", "badge large");
        let named = tree.insert(Element::new("div", "card", &l));
        tree.get_mut(named).set_attribute("class", "badge");

        let mut diagnostics = Diagnostics::new();
        let chain = HeuristicChain::builtin();
        chain.apply(&mut tree, anon, &mut diagnostics);
        chain.apply(&mut tree, named, &mut diagnostics);

        assert_eq!(tree.get(anon).style().selector(), "span.badge");
        assert_eq!(tree.get(named).style().selector(), "#card");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_contain_floats() {
        let l = layer();
        let mut tree = ElementTree::new();
        let parent = tree.insert(Element::new("div", "row", &l));
        let child = tree.insert(Element::new("div", "cell", &l));
        tree.append_child(parent, child);
        tree.get_mut(child).style_mut().set("float", "left");

        let mut diagnostics = Diagnostics::new();
        HeuristicChain::builtin().apply(&mut tree, child, &mut diagnostics);

        assert_eq!(tree.get(parent).style().get("overflow"), Some("hidden"));
    }

    struct Failing;

    impl Heuristic for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn change_element(&self, _tree: &mut ElementTree<'_>, _id: ElementId) -> Result<()> {
            Err(StrataError::Heuristic {
                name: "failing".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    struct Counting(Rc<RefCell<usize>>);

    impl Heuristic for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn change_element(&self, _tree: &mut ElementTree<'_>, _id: ElementId) -> Result<()> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_failure_does_not_stop_chain() {
        let calls = Rc::new(RefCell::new(0));
        let mut chain = HeuristicChain::new();
        chain.register(Failing).register(Counting(Rc::clone(&calls)));

        let l = layer();
        let mut tree = ElementTree::new();
        let id = tree.insert(Element::new("div", "a", &l));
        let mut diagnostics = Diagnostics::new();

        chain.apply(&mut tree, id, &mut diagnostics);

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.contains_code("strata::heuristic"));
    }
}
