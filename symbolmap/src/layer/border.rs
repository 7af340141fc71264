use crate::data::BorderMesh;
use crate::layer::{Layer, RenderContext};
use crate::path::PathBuilder;
use crate::render::{DrawOp, LayerKind};

/// Draws the border mesh as a single stroked path with key `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderLayer;

impl Layer for BorderLayer {
    type Input = BorderMesh;
    const KIND: LayerKind = LayerKind::Borders;

    fn render(&self, input: &Self::Input, context: &RenderContext) -> Vec<DrawOp> {
        let path = PathBuilder::new(context.projector).build_multi_contour(input.geometry());
        if path.is_empty() {
            return vec![];
        }

        vec![DrawOp::path(Self::KIND, 0, path)]
    }
}

#[cfg(test)]
mod tests {
    use symbolmap_types::cartesian::Size;
    use symbolmap_types::impls::{Contour, MultiContour};
    use symbolmap_types::lonlat;

    use super::*;
    use crate::projector::{GeoProjector, ProjectionKind};
    use crate::render::Primitive;
    use crate::scale::RadiusScale;

    #[test]
    fn mesh_is_one_path() {
        let projector = GeoProjector::fit(
            ProjectionKind::Equirectangular,
            lonlat!(0.0, 0.0),
            Size::new(360.0, 180.0),
            0.0,
        );
        let context = RenderContext::new(&projector, RadiusScale::default());
        let mesh = BorderMesh::new(MultiContour::from(vec![
            Contour::open(vec![lonlat!(0.0, 0.0), lonlat!(0.0, 10.0)]),
            Contour::open(vec![lonlat!(20.0, 0.0), lonlat!(20.0, 10.0)]),
        ]));

        let ops = BorderLayer.render(&mesh, &context);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].key, 0);
        let Primitive::Path(path) = &ops[0].primitive else {
            panic!("expected a path");
        };
        assert_eq!(path.to_svg_data(), "M180,90L180,80M200,90L200,80");
    }

    #[test]
    fn empty_mesh_gives_no_ops() {
        let projector = GeoProjector::fit(
            ProjectionKind::NaturalEarth,
            lonlat!(0.0, 0.0),
            Size::new(960.0, 500.0),
            0.0,
        );
        let context = RenderContext::new(&projector, RadiusScale::default());
        assert!(BorderLayer.render(&BorderMesh::default(), &context).is_empty());
    }
}
