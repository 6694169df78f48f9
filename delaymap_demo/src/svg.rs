// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG serialization for retained marks.

use std::fmt::Write as _;

use delaymap_encoding::{
    HeuristicTextMeasurer, Mark, MarkPayload, TextAnchor, TextBaseline, TextMeasurer,
};
use kurbo::Rect;
use peniko::Brush;

/// Serializes `marks` (already in paint order) as one standalone SVG document.
pub(crate) fn document(marks: &[&Mark], frame: Rect) -> String {
    let view_box = union(Some(frame), view_box(marks)).unwrap_or(frame);
    let mut out = String::new();
    open_svg(&mut out, view_box);
    write_marks(&mut out, marks);
    out.push_str("</svg>\n");
    out
}

/// Writes the opening `<svg>` tag.
pub(crate) fn open_svg(out: &mut String, view_box: Rect) {
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let _ = writeln!(
        out,
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    );
}

/// Writes one element per mark.
pub(crate) fn write_marks(out: &mut String, marks: &[&Mark]) {
    for mark in marks {
        match &mark.payload {
            MarkPayload::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.3}""#,
                    center.x, center.y, radius
                );
                write_paint_attr(out, "fill", fill);
                write_stroke(out, stroke, *stroke_width);
                close_with_title(out, "circle", mark.title.as_deref());
            }
            MarkPayload::Path {
                path,
                fill,
                stroke,
                stroke_width,
            } => {
                let _ = write!(out, r#"<path d="{}""#, path.to_svg());
                write_paint_attr(out, "fill", fill);
                write_stroke(out, stroke, *stroke_width);
                close_with_title(out, "path", mark.title.as_deref());
            }
            MarkPayload::Text {
                pos,
                text,
                font_size,
                fill,
                anchor,
                baseline,
            } => {
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}" text-anchor="{}""#,
                    pos.x,
                    pos.y,
                    font_size,
                    baseline_attr(*baseline),
                    anchor_attr(*anchor),
                );
                write_paint_attr(out, "fill", fill);
                out.push('>');
                out.push_str(&escape_xml(text));
                out.push_str("</text>\n");
            }
        }
    }
}

fn close_with_title(out: &mut String, tag: &str, title: Option<&str>) {
    match title {
        Some(title) => {
            let _ = writeln!(out, "><title>{}</title></{tag}>", escape_xml(title));
        }
        None => out.push_str("/>\n"),
    }
}

fn write_stroke(out: &mut String, stroke: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", stroke);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}

fn baseline_attr(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

/// Union of the marks' bounds, padded by a small margin.
pub(crate) fn view_box(marks: &[&Mark]) -> Option<Rect> {
    let mut rect: Option<Rect> = None;
    for mark in marks {
        let b = match &mark.payload {
            MarkPayload::Text {
                pos,
                text,
                font_size,
                anchor,
                baseline,
                ..
            } => {
                let (w, h) = HeuristicTextMeasurer.measure(text, *font_size);
                let (x0, x1) = match anchor {
                    TextAnchor::Start => (pos.x, pos.x + w),
                    TextAnchor::Middle => (pos.x - w / 2.0, pos.x + w / 2.0),
                    TextAnchor::End => (pos.x - w, pos.x),
                };
                let (y0, y1) = match baseline {
                    TextBaseline::Middle => (pos.y - h / 2.0, pos.y + h / 2.0),
                    TextBaseline::Alphabetic => (pos.y - h, pos.y),
                    TextBaseline::Hanging => (pos.y, pos.y + h),
                };
                Some(Rect::new(x0, y0, x1, y1))
            }
            payload => payload.bounds(),
        };
        rect = union(rect, b);
    }
    let pad = 10.0;
    rect.map(|r| Rect::new(r.x0 - pad, r.y0 - pad, r.x1 + pad, r.y1 + pad))
}

pub(crate) fn union(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o:.3}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
