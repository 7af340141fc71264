use crate::graticule::Graticule;
use crate::layer::{Layer, RenderContext};
use crate::path::PathBuilder;
use crate::render::{DrawOp, LayerKind};

/// Draws the outline of the projected sphere and, optionally, a graticule.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundLayer {
    graticule: Option<Graticule>,
}

impl BackgroundLayer {
    /// Key of the sphere outline operation.
    pub const SPHERE_KEY: usize = 0;
    /// Key of the graticule operation.
    pub const GRATICULE_KEY: usize = 1;

    /// Creates a new layer.
    pub fn new(graticule: Option<Graticule>) -> Self {
        Self { graticule }
    }

    /// Graticule drawn over the sphere, if any.
    pub fn graticule(&self) -> Option<&Graticule> {
        self.graticule.as_ref()
    }
}

impl Layer for BackgroundLayer {
    type Input = ();
    const KIND: LayerKind = LayerKind::Background;

    fn render(&self, _input: &(), context: &RenderContext) -> Vec<DrawOp> {
        let mut ops = vec![];

        let sphere = context.projector.sphere_outline();
        if !sphere.is_empty() {
            ops.push(DrawOp::path(Self::KIND, Self::SPHERE_KEY, sphere));
        }

        if let Some(graticule) = &self.graticule {
            let lines = PathBuilder::new(context.projector).build_multi_contour(&graticule.lines());
            if !lines.is_empty() {
                ops.push(DrawOp::path(Self::KIND, Self::GRATICULE_KEY, lines));
            }
        }

        ops
    }
}
