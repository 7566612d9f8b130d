//! End-to-end conversion tests.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use strata::layer::{Bounds, LayerManifest, ManifestLayer};
use strata::types::Colour;
use strata::{Converter, Document, ElementId};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn solid(name: &str, x: i32, y: i32, w: i32, h: i32) -> ManifestLayer {
    ManifestLayer::solid(name, Bounds::new(x, y, w, h), Colour::rgb(255, 0, 0))
}

fn summary(doc: &Document<'_>) -> Vec<String> {
    doc.rules()
        .map(|rule| {
            let props: Vec<String> = rule
                .properties()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            format!("{} {{ {} }}", rule.selector(), props.join("; "))
        })
        .collect()
}

fn child(doc: &Document<'_>, index: usize) -> ElementId {
    doc.tree().get(doc.root()).children()[index]
}

#[test]
fn test_hero_box() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 100, 200)
        .with_children(vec![solid("box[attr:class=\"hero\"]", 0, 10, 100, 50)])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;
    let hero = doc.tree().get(child(doc, 0));

    assert!(conversion.diagnostics.is_empty());
    assert_eq!(hero.tag(), "div");
    assert_eq!(hero.id(), Some("box"));
    assert_eq!(hero.attribute("class"), Some("hero"));
    assert_eq!(hero.style().get("width"), Some("100px"));
    assert_eq!(hero.style().get("height"), Some("50px"));
    assert_eq!(hero.style().get("background"), Some("rgb(255,0,0)"));
    assert_eq!(
        doc.tree().get(doc.root()).style().get("padding-top"),
        Some("10px")
    );
    assert!(doc.body().contains("\t<div class=\"hero\" id=\"box\">\n\t</div>\n"));
}

#[test]
fn test_side_by_side_boxes_float() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 200, 100).with_children(vec![
        solid("a", 0, 0, 50, 50),
        solid("b", 60, 0, 50, 50),
    ])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;
    let a = doc.tree().get(child(doc, 0)).style();
    let b = doc.tree().get(child(doc, 1)).style();

    assert_eq!(a.get("float"), Some("left"));
    assert_eq!(b.get("float"), Some("left"));
    assert_eq!(a.get("margin-right"), Some("10px"));
    assert_eq!(
        doc.tree().get(doc.root()).style().get("overflow"),
        Some("hidden")
    );
}

#[test]
fn test_malformed_name_is_reported() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 100, 100)
        .with_children(vec![solid("???", 0, 0, 10, 10), solid("ok", 0, 20, 10, 10)])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;
    let bad = doc.tree().get(child(doc, 0));

    assert!(conversion.diagnostics.contains_code("strata::layer-name"));
    assert_eq!(bad.tag(), "");
    assert!(bad.attributes().is_empty());
    assert_eq!(doc.body(), "<body>\n\t<div id=\"ok\">\n\t</div>\n</body>\n");
}

#[test]
fn test_markup_is_reverse_layer_order() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 100, 100).with_children(vec![
        solid("top", 0, 0, 10, 10),
        solid("middle", 0, 20, 10, 10),
        solid("bottom", 0, 40, 10, 10),
    ])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let body = conversion.document.body();

    let bottom = body.find("id=\"bottom\"").unwrap();
    let middle = body.find("id=\"middle\"").unwrap();
    let top = body.find("id=\"top\"").unwrap();
    assert!(bottom < middle && middle < top);
}

#[test]
fn test_each_rule_written_once_in_build_order() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 100, 100).with_children(vec![
        solid("first", 0, 0, 10, 10),
        ManifestLayer::folder("group", Bounds::new(0, 20, 10, 10), vec![]),
        solid("second", 0, 40, 10, 10),
    ])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let css = conversion.document.stylesheet();

    for selector in ["\tbody {", "\t#first {", "\t#group {", "\t#second {"] {
        assert_eq!(css.matches(selector).count(), 1, "{}", selector);
    }
    let first = css.find("#first").unwrap();
    let group = css.find("#group").unwrap();
    let second = css.find("#second").unwrap();
    assert!(css.starts_with("\tbody {"));
    assert!(first < group && group < second);
}

#[test]
fn test_manual_css_survives_inference() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 100, 100).with_children(vec![
        solid("box[css:width=\"auto\", css:margin-left=\"4px\"]", 10, 0, 80, 10),
    ])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;
    let style = doc.tree().get(child(doc, 0)).style();

    assert_eq!(style.get("width"), Some("auto"));
    assert_eq!(style.get("margin-left"), Some("4px"));
    assert_eq!(style.get("margin-right"), Some("auto"));
}

#[test]
fn test_merged_folder_keeps_manual_css() {
    let manifest = LayerManifest::new(vec![solid("<body>", 0, 0, 200, 100).with_children(vec![
        ManifestLayer::folder(
            "logo",
            Bounds::new(0, 0, 200, 100),
            vec![solid("logo[css:width=\"50%\"]", 5, 6, 30, 20)],
        ),
    ])]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;
    let logo = doc.tree().get(child(doc, 0)).style();
    let css = doc.stylesheet();

    assert_eq!(logo.get("width"), Some("50%"));
    assert_eq!(logo.get("height"), Some("20px"));
    assert_eq!(css.matches("#logo {").count(), 1);
    assert!(css.contains("\t\twidth: 50%;\n"));
}

#[test]
fn test_no_configuration_means_no_annotations() {
    let manifest = LayerManifest::new(vec![
        solid("<body>", 0, 0, 100, 100).with_children(vec![solid("box", 0, 0, 10, 10)])
    ]);

    let conversion = Converter::new().convert(&manifest).unwrap();
    let html = conversion.document.render();

    assert!(!html.contains("<!--"));
    assert!(html.contains("<title>Untitled</title>"));
}

#[test]
fn test_landing_fixture() {
    let manifest = LayerManifest::load(&fixture("landing.yaml")).unwrap();
    let conversion = Converter::new().convert(&manifest).unwrap();
    let doc = &conversion.document;

    assert!(conversion.diagnostics.is_empty());

    insta::assert_debug_snapshot!(summary(doc), @r###"
    [
        "body { background: rgb(244,244,244); margin: 0px; padding: 0px; padding-top: 20px }",
        "#footer { background: rgb(34,34,34); height: 60px; margin-left: auto; margin-right: auto; margin-top: 40px; width: 960px }",
        "#features { background: rgb(255,255,255); height: 260px; margin-left: auto; margin-right: auto; margin-top: 100px; overflow: hidden; padding-top: 40px; width: 800px }",
        "#pricing { background: rgb(238,238,238); float: left; height: 200px; width: 300px }",
        "#tour { background: rgb(238,238,238); float: left; height: 200px; margin-right: 70px; width: 300px }",
        "#logo { background: rgb(51,102,204); height: 80px; margin-left: auto; margin-right: auto; width: 200px }",
    ]
    "###);

    assert_eq!(
        doc.body(),
        "<body>\n\
         \t<div class=\"brand\" id=\"logo\" title=\"Home\"><!-- #logo -->\n\
         \t</div><!-- /#logo -->\n\
         \t<div id=\"features\"><!-- #features -->\n\
         \t\t<p id=\"tour\"><!-- #tour -->\n\
         \t\t</p><!-- /#tour -->\n\
         \t\t<p id=\"pricing\"><!-- #pricing -->\n\
         \t\t</p><!-- /#pricing -->\n\
         \t</div><!-- /#features -->\n\
         \t<div class=\"site-footer\" id=\"footer\"><!-- #footer -->\n\
         \t</div><!-- /#footer -->\n\
         </body>\n"
    );

    let html = doc.render();
    assert!(html.contains("\t<title>Landing</title>\n"));
    assert!(html.contains(&doc.stylesheet()));
}
