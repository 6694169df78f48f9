// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-file interactive HTML page.
//!
//! Every `(category, scale)` combination is pre-rendered into its own SVG group. Two radio
//! groups pick the visible one with `:checked` sibling selectors, so the page needs no script.

use std::fmt::Write as _;

use delaymap_encoding::{Mark, ScaleKind};
use kurbo::Rect;

use crate::map::{SOURCE, SOURCE_URL, SUBTITLE, TITLE};
use crate::svg;

/// One pre-rendered selection.
#[derive(Debug)]
pub(crate) struct Variant {
    /// Index into the category list.
    pub(crate) category: usize,
    /// Index into [`ScaleKind::ALL`].
    pub(crate) scale: usize,
    /// Serialized SVG elements for the bubbles and legend.
    pub(crate) body: String,
}

/// Renders the page.
///
/// `base` holds the selection-independent marks in paint order; `view_box` must cover every
/// variant.
pub(crate) fn render_page(
    categories: &[String],
    base: &[&Mark],
    variants: &[Variant],
    view_box: Rect,
) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", svg::escape_xml(TITLE));
    out.push_str("<style>\n");
    out.push_str(STYLE);
    write_selectors(&mut out, variants);
    out.push_str("</style>\n</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", svg::escape_xml(TITLE));
    let _ = writeln!(out, "<h4>{}</h4>", svg::escape_xml(SUBTITLE));

    for (i, _) in categories.iter().enumerate() {
        let checked = if i == 0 { " checked" } else { "" };
        let _ = writeln!(
            out,
            r#"<input type="radio" name="category" id="cat-{i}"{checked}>"#
        );
    }
    for (i, _) in ScaleKind::ALL.iter().enumerate() {
        let checked = if i == 0 { " checked" } else { "" };
        let _ = writeln!(
            out,
            r#"<input type="radio" name="scale" id="scale-{i}"{checked}>"#
        );
    }

    out.push_str("<div class=\"controls\">\n<b>Types of Delay</b>\n");
    for (i, name) in categories.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<label for="cat-{i}" class="cat-{i}">{}</label>"#,
            svg::escape_xml(name)
        );
    }
    out.push_str("<b>Bubble Size</b>\n");
    for (i, kind) in ScaleKind::ALL.iter().enumerate() {
        let _ = writeln!(out, r#"<label for="scale-{i}" class="scale-{i}">{kind}</label>"#);
    }
    out.push_str("</div>\n<div class=\"map\">\n");

    svg::open_svg(&mut out, view_box);
    svg::write_marks(&mut out, base);
    for variant in variants {
        let _ = writeln!(
            out,
            r#"<g class="variant v-{}-{}">"#,
            variant.category, variant.scale
        );
        out.push_str(&variant.body);
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n</div>\n");

    let _ = writeln!(
        out,
        r#"<p class="source">Source: <a href="{SOURCE_URL}">{}</a></p>"#,
        svg::escape_xml(SOURCE)
    );
    out.push_str("</body>\n</html>\n");
    out
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 1em 2em; }
input[type=radio] { display: none; }
.controls { float: left; width: 14em; margin-right: 1em; }
.controls b { display: block; margin: 0.8em 0 0.3em; }
.controls label { display: block; padding: 0.3em 0.5em; margin: 0.2em 0; cursor: pointer;
  background: rgb(251, 201, 127); }
.map { overflow: hidden; }
.map svg { width: 100%; height: auto; max-height: 80vh; }
.variant { display: none; }
.source { clear: both; font-size: 0.8em; }
";

fn write_selectors(out: &mut String, variants: &[Variant]) {
    for variant in variants {
        let _ = writeln!(
            out,
            "#cat-{c}:checked ~ #scale-{s}:checked ~ .map .v-{c}-{s} {{ display: inline; }}",
            c = variant.category,
            s = variant.scale,
        );
    }
    let mut categories: Vec<usize> = variants.iter().map(|v| v.category).collect();
    categories.dedup();
    for c in categories {
        let _ = writeln!(
            out,
            "#cat-{c}:checked ~ .controls .cat-{c} {{ background: lightblue; color: white; }}"
        );
    }
    for s in 0..ScaleKind::ALL.len() {
        let _ = writeln!(
            out,
            "#scale-{s}:checked ~ .controls .scale-{s} {{ background: lightblue; color: white; }}"
        );
    }
}
