//! Backend independent draw operations produced by the layers, and the backends that consume them.

use serde::{Deserialize, Serialize};
use symbolmap_types::cartesian::{Point2d, Size};

use crate::path::Path;

pub mod svg;

pub use svg::{SvgStyle, SvgWriter};

/// Layer a draw operation belongs to.
///
/// The ordering of the variants is the drawing order: operations of a lesser layer are painted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Sphere outline and graticule.
    Background,
    /// Land polygons.
    Land,
    /// Country borders.
    Borders,
    /// Proportional symbols.
    Symbols,
}

/// Circle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the circle.
    pub center: Point2d,
    /// Radius in pixels.
    pub radius: f64,
}

/// Geometric primitive to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Vector path.
    Path(Path),
    /// Circle.
    Circle(Circle),
}

/// Single draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOp {
    /// Layer that produced the operation.
    pub layer: LayerKind,
    /// Index of the input element (feature, record) the operation was produced from.
    pub key: usize,
    /// What to draw.
    pub primitive: Primitive,
}

impl DrawOp {
    /// Creates a path operation.
    pub fn path(layer: LayerKind, key: usize, path: Path) -> Self {
        Self {
            layer,
            key,
            primitive: Primitive::Path(path),
        }
    }

    /// Creates a circle operation.
    pub fn circle(layer: LayerKind, key: usize, center: Point2d, radius: f64) -> Self {
        Self {
            layer,
            key,
            primitive: Primitive::Circle(Circle { center, radius }),
        }
    }
}

/// Result of one render pass: all draw operations in painting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    size: Size,
    ops: Vec<DrawOp>,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(size: Size, ops: Vec<DrawOp>) -> Self {
        Self { size, ops }
    }

    /// Size of the viewport the frame was rendered for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// All operations in painting order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Operations of a single layer.
    pub fn layer_ops(&self, layer: LayerKind) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.layer == layer)
    }

    /// Consumes the frame returning its operations.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}
