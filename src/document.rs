//! Serializes a converted element tree into an XHTML page.
//!
//! The page is a fixed head with an embedded stylesheet, followed by the
//! element tree. Children are written last-first: layer trees list the
//! topmost layer first, while markup wants the backmost element first.

use std::fmt::Write;

use crate::element::{Element, ElementId, ElementTree};
use crate::parser::config::{Configuration, COMMENT_TEMPLATE, TITLE};
use crate::style::StyleRule;

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">";

/// Title used when the configuration doesn't set one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A converted document, ready to render.
#[derive(Debug)]
pub struct Document<'a> {
    tree: ElementTree<'a>,
    root: ElementId,
    stylesheet: Vec<ElementId>,
    config: Configuration,
}

impl<'a> Document<'a> {
    pub fn new(
        tree: ElementTree<'a>,
        root: ElementId,
        stylesheet: Vec<ElementId>,
        config: Configuration,
    ) -> Self {
        Self {
            tree,
            root,
            stylesheet,
            config,
        }
    }

    pub fn tree(&self) -> &ElementTree<'a> {
        &self.tree
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Non-empty rules in construction order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.stylesheet
            .iter()
            .map(|&id| self.tree.get(id).style())
            .filter(|rule| !rule.selector().is_empty() && !rule.is_empty())
    }

    /// The embedded stylesheet.
    pub fn stylesheet(&self) -> String {
        self.rules().map(StyleRule::to_css).collect()
    }

    /// The element tree as markup.
    pub fn body(&self) -> String {
        let template = CommentTemplate::from_config(&self.config);
        let mut out = String::new();
        self.write_element(&mut out, self.root, 0, &template);
        out
    }

    /// The full page.
    pub fn render(&self) -> String {
        let title = self.config.get(TITLE).unwrap_or(DEFAULT_TITLE);

        let mut html = String::new();
        html.push_str(DOCTYPE);
        html.push('\n');
        html.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n");
        html.push_str("<head>\n");
        let _ = writeln!(html, "\t<title>{}</title>", escape(title));
        html.push_str("\t<style type=\"text/css\">\n");
        html.push_str(&self.stylesheet());
        html.push_str("\t</style>\n");
        html.push_str("</head>\n");
        html.push_str(&self.body());
        html.push_str("</html>");
        html
    }

    fn write_element(&self, out: &mut String, id: ElementId, level: usize, template: &CommentTemplate) {
        let element = self.tree.get(id);
        if element.tag().is_empty() {
            return;
        }

        let _ = writeln!(
            out,
            "<{}{}>{}",
            element.tag(),
            attributes(element),
            template.before(element)
        );

        let indent = "\t".repeat(level + 1);
        for &child in element.children().iter().rev() {
            if self.tree.get(child).tag().is_empty() {
                continue;
            }
            out.push_str(&indent);
            self.write_element(out, child, level + 1, template);
        }

        let _ = writeln!(
            out,
            "{}</{}>{}",
            "\t".repeat(level),
            element.tag(),
            template.after(element)
        );
    }
}

/// Annotation written after an element's open and close tags.
///
/// Configured as `before|after`; `tag_name` and `tag_id` are replaced per
/// element. Elements with neither an id nor a class get no annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTemplate {
    before: String,
    after: String,
}

impl CommentTemplate {
    pub fn parse(template: &str) -> Self {
        let (before, after) = template.split_once('|').unwrap_or((template, ""));
        Self {
            before: before.to_string(),
            after: after.to_string(),
        }
    }

    pub fn from_config(config: &Configuration) -> Self {
        config
            .get(COMMENT_TEMPLATE)
            .map(Self::parse)
            .unwrap_or_default()
    }

    fn before(&self, element: &Element<'_>) -> String {
        expand(&self.before, element)
    }

    fn after(&self, element: &Element<'_>) -> String {
        expand(&self.after, element)
    }
}

fn expand(fragment: &str, element: &Element<'_>) -> String {
    let tag_id = match (element.id(), element.attribute("class")) {
        (Some(id), _) => format!("#{}", id),
        (None, Some(class)) if !class.is_empty() => format!(".{}", class),
        _ => return String::new(),
    };
    fragment
        .replace("tag_name", element.tag())
        .replace("tag_id", &tag_id)
}

fn attributes(element: &Element<'_>) -> String {
    let mut out = String::new();
    for (key, value) in element.attributes() {
        let _ = write!(out, " {}=\"{}\"", key, escape(value));
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
