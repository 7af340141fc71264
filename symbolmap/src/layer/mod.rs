//! [Layers](Layer) turn one kind of input data into an ordered list of [draw operations](DrawOp).
//!
//! A layer is a pure function of its input and the [`RenderContext`]: it keeps no state between calls, and rendering
//! the same input twice gives the same operations. Every operation carries the index of the input element it was
//! produced from as its `key`, and operations are returned in input order. An element that cannot be drawn at all
//! (e.g. all of its coordinates are invalid) produces no operation.

use crate::projector::GeoProjector;
use crate::render::{DrawOp, LayerKind};
use crate::scale::RadiusScale;

mod background;
mod border;
mod land;
mod symbol;

pub use background::BackgroundLayer;
pub use border::BorderLayer;
pub use land::LandLayer;
pub use symbol::SymbolLayer;

/// Values shared by all layers of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Projector used for every coordinate of the pass.
    pub projector: &'a GeoProjector,
    /// Scale for the symbol radii.
    pub scale: RadiusScale,
}

impl<'a> RenderContext<'a> {
    /// Creates a new context.
    pub fn new(projector: &'a GeoProjector, scale: RadiusScale) -> Self {
        Self { projector, scale }
    }
}

/// Converts input data into draw operations.
pub trait Layer {
    /// Data the layer draws.
    type Input: ?Sized;

    /// Kind of the produced operations.
    const KIND: LayerKind;

    /// Renders the input into draw operations.
    fn render(&self, input: &Self::Input, context: &RenderContext) -> Vec<DrawOp>;
}
