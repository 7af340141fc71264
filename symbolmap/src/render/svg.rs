//! SVG backend.

use std::io::Write;

use serde::{Deserialize, Serialize};
use symbolmap_types::cartesian::CartesianPoint2d;

use crate::color::Color;
use crate::error::SymbolmapError;
use crate::layer::BackgroundLayer;
use crate::render::{DrawOp, Frame, LayerKind, Primitive};

/// Colors and line widths used by [`SvgWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    /// Fill of the whole viewport. Not drawn if transparent.
    pub background: Color,
    /// Fill of the sphere outline.
    pub sphere_fill: Color,
    /// Stroke of the graticule lines.
    pub graticule_stroke: Color,
    /// Land fill.
    pub land_fill: Color,
    /// Border stroke.
    pub border_stroke: Color,
    /// Width of graticule and border lines in pixels.
    pub line_width: f64,
    /// Symbol fill.
    pub symbol_fill: Color,
    /// Symbol outline. Not drawn if transparent.
    pub symbol_stroke: Color,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            sphere_fill: Color::from_hex("#FBFBFB"),
            graticule_stroke: Color::from_hex("#ECECEC"),
            land_fill: Color::from_hex("#C0C0BB"),
            border_stroke: Color::from_hex("#E0E0DC"),
            line_width: 0.5,
            symbol_fill: Color::from_hex("#137B804D"),
            symbol_stroke: Color::TRANSPARENT,
        }
    }
}

/// Serializes [`Frame`]s into standalone SVG documents.
///
/// Operations are written in frame order, wrapped in one `<g>` element per layer.
#[derive(Debug, Clone, Default)]
pub struct SvgWriter {
    style: SvgStyle,
}

impl SvgWriter {
    /// Creates a new writer.
    pub fn new(style: SvgStyle) -> Self {
        Self { style }
    }

    /// Style of the writer.
    pub fn style(&self) -> &SvgStyle {
        &self.style
    }

    /// Renders the frame into an SVG document string.
    pub fn render(&self, frame: &Frame) -> String {
        let size = frame.size();
        let (width, height) = (size.width(), size.height());

        let mut svg = String::with_capacity(frame.ops().len() * 64 + 256);
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        ));

        if !self.style.background.is_transparent() {
            svg.push_str(&format!(
                "  <rect width=\"{width}\" height=\"{height}\" {}/>\n",
                paint("fill", self.style.background)
            ));
        }

        let mut current: Option<LayerKind> = None;
        for op in frame.ops() {
            if current != Some(op.layer) {
                if current.is_some() {
                    svg.push_str("  </g>\n");
                }
                svg.push_str(&format!("  <g {}>\n", self.group_attributes(op.layer)));
                current = Some(op.layer);
            }

            self.write_op(&mut svg, op);
        }

        if current.is_some() {
            svg.push_str("  </g>\n");
        }
        svg.push_str("</svg>\n");

        svg
    }

    /// Renders the frame and writes the document into `writer`.
    pub fn write(&self, frame: &Frame, mut writer: impl Write) -> Result<(), SymbolmapError> {
        writer.write_all(self.render(frame).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn group_attributes(&self, layer: LayerKind) -> String {
        let style = &self.style;
        match layer {
            LayerKind::Background => format!(r#"class="background" stroke-width="{}""#, style.line_width),
            LayerKind::Land => format!(r#"class="land" {}"#, paint("fill", style.land_fill)),
            LayerKind::Borders => format!(
                r#"class="borders" fill="none" {} stroke-width="{}""#,
                paint("stroke", style.border_stroke),
                style.line_width
            ),
            LayerKind::Symbols => {
                let mut attributes = format!(r#"class="symbols" {}"#, paint("fill", style.symbol_fill));
                if !style.symbol_stroke.is_transparent() {
                    attributes.push(' ');
                    attributes.push_str(&paint("stroke", style.symbol_stroke));
                }
                attributes
            }
        }
    }

    fn write_op(&self, svg: &mut String, op: &DrawOp) {
        match &op.primitive {
            Primitive::Path(path) => {
                let extra = match (op.layer, op.key) {
                    (LayerKind::Background, BackgroundLayer::SPHERE_KEY) => {
                        format!(" {}", paint("fill", self.style.sphere_fill))
                    }
                    (LayerKind::Background, _) => {
                        format!(r#" fill="none" {}"#, paint("stroke", self.style.graticule_stroke))
                    }
                    _ => String::new(),
                };
                svg.push_str(&format!("    <path d=\"{}\"{extra}/>\n", path.to_svg_data()));
            }
            Primitive::Circle(circle) => {
                svg.push_str(&format!(
                    "    <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\"/>\n",
                    circle.center.x(),
                    circle.center.y(),
                    circle.radius
                ));
            }
        }
    }
}

fn paint(attribute: &str, color: Color) -> String {
    if color.opacity() < 1.0 {
        format!(
            r#"{attribute}="{}" {attribute}-opacity="{:.3}""#,
            color.to_rgb_hex(),
            color.opacity()
        )
    } else {
        format!(r#"{attribute}="{}""#, color.to_rgb_hex())
    }
}
