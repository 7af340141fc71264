use crate::data::GeoFeature;
use crate::layer::{Layer, RenderContext};
use crate::path::PathBuilder;
use crate::render::{DrawOp, LayerKind};

/// Draws land features as filled paths, one operation per feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandLayer;

impl Layer for LandLayer {
    type Input = [GeoFeature];
    const KIND: LayerKind = LayerKind::Land;

    fn render(&self, input: &Self::Input, context: &RenderContext) -> Vec<DrawOp> {
        let builder = PathBuilder::new(context.projector);
        let mut ops = Vec::with_capacity(input.len());

        for (key, feature) in input.iter().enumerate() {
            let path = builder.build(feature.geometry());
            if path.is_empty() {
                log::debug!("Land feature {key} has no drawable geometry");
                continue;
            }

            ops.push(DrawOp::path(Self::KIND, key, path));
        }

        ops
    }
}
