//! SVG output: district fills underneath, border segments on top.
//!
//! Each border segment is pulled back by `gap` at both ends so junctions show
//! as small breaks, which makes the graph's edge structure visible.

use std::fmt::Write;

use anyhow::Result;
use district_borders::{graph_edges, Graph, Point};
use nalgebra::Vector2;

#[derive(Clone, Debug)]
pub struct RenderCfg {
    pub gap: f64,
    pub stroke_width: f64,
    pub stroke: String,
    pub fill: String,
    /// Padding added around the drawing on every side.
    pub margin: f64,
    /// Decimal places for coordinates.
    pub precision: usize,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            gap: 0.25,
            stroke_width: 0.1,
            stroke: "black".to_string(),
            fill: "#eee".to_string(),
            margin: 2.0,
            precision: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min: Vector2<f64>,
    max: Vector2<f64>,
}

impl Bounds {
    fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut it = points.into_iter().map(|p| p.to_vec2());
        let first = it.next()?;
        Some(it.fold(Self { min: first, max: first }, |b, v| Self {
            min: b.min.inf(&v),
            max: b.max.sup(&v),
        }))
    }
}

/// Render `polygons` (filled) and the edges of `graph` (stroked) as an SVG document.
pub fn render_svg(polygons: &[Vec<Point>], graph: &Graph, cfg: &RenderCfg) -> Result<String> {
    let nodes: Vec<Point> = graph.nodes().collect();
    let bounds = Bounds::of(polygons.iter().flatten().chain(nodes.iter())).unwrap_or(Bounds {
        min: Vector2::zeros(),
        max: Vector2::zeros(),
    });
    let origin = bounds.min.add_scalar(-cfg.margin);
    let size = (bounds.max - bounds.min).add_scalar(2.0 * cfg.margin);
    let prec = cfg.precision;

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.prec$} {:.prec$} {:.prec$} {:.prec$}">"#,
        origin.x, origin.y, size.x, size.y
    )?;

    if !polygons.is_empty() {
        write!(out, r#"<path fill="{}" stroke="none" d=""#, cfg.fill)?;
        for poly in polygons.iter().filter(|poly| !poly.is_empty()) {
            for (i, p) in poly.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                write!(out, "{cmd}{:.prec$},{:.prec$} ", p.x as f64, p.y as f64)?;
            }
            write!(out, "Z ")?;
        }
        writeln!(out, r#""/>"#)?;
    }

    write!(
        out,
        r#"<path fill="none" stroke="{}" stroke-width="{:.prec$}" stroke-linecap="butt" d=""#,
        cfg.stroke, cfg.stroke_width
    )?;
    for edge in graph_edges(graph) {
        let (start, end) = shortened(edge.a(), edge.b(), cfg.gap);
        write!(
            out,
            "M{:.prec$},{:.prec$} L{:.prec$},{:.prec$} ",
            start.x, start.y, end.x, end.y
        )?;
    }
    writeln!(out, r#""/>"#)?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

/// Segment `a`–`b` with `gap` removed from both ends.
fn shortened(a: Point, b: Point, gap: f64) -> (Vector2<f64>, Vector2<f64>) {
    let (va, vb) = (a.to_vec2(), b.to_vec2());
    let offset = (vb - va).normalize() * gap;
    (va + offset, vb - offset)
}
