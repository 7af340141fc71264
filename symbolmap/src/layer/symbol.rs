use symbolmap_types::geo::GeoPoint;

use crate::data::IncidentRecord;
use crate::layer::{Layer, RenderContext};
use crate::render::{DrawOp, LayerKind};

/// Draws incident records as circles with radius given by the [`RadiusScale`](crate::RadiusScale) of the context.
///
/// Records are drawn in input order, so reordering the records changes only the order of the operations. Invalid
/// records, and records whose position cannot be projected, are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolLayer;

impl Layer for SymbolLayer {
    type Input = [IncidentRecord];
    const KIND: LayerKind = LayerKind::Symbols;

    fn render(&self, input: &Self::Input, context: &RenderContext) -> Vec<DrawOp> {
        let mut ops = Vec::with_capacity(input.len());
        let mut skipped = 0;

        for (key, record) in input.iter().enumerate() {
            if !record.is_valid() {
                skipped += 1;
                continue;
            }

            let position = record.position();
            let Some(center) = context.projector.project(position.lon(), position.lat()) else {
                skipped += 1;
                continue;
            };

            ops.push(DrawOp::circle(
                Self::KIND,
                key,
                center,
                context.scale.radius(record.magnitude()),
            ));
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} incident records that cannot be drawn");
        }

        ops
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use symbolmap_types::cartesian::{CartesianPoint2d, Size};
    use symbolmap_types::lonlat;

    use super::*;
    use crate::data::{IncidentId, IncidentSnapshot};
    use crate::projector::{GeoProjector, ProjectionKind};
    use crate::render::{Circle, Primitive};
    use crate::scale::RadiusScale;

    fn projector() -> GeoProjector {
        GeoProjector::fit(
            ProjectionKind::NaturalEarth,
            lonlat!(0.0, 0.0),
            Size::new(960.0, 500.0),
            0.0,
        )
    }

    fn record(index: usize, lon: f64, lat: f64, magnitude: f64) -> IncidentRecord {
        IncidentRecord::new_unchecked(IncidentId::Index(index), lonlat!(lon, lat), magnitude)
    }

    fn circle(op: &DrawOp) -> Circle {
        match op.primitive {
            Primitive::Circle(circle) => circle,
            Primitive::Path(_) => panic!("expected a circle"),
        }
    }

    #[test]
    fn circles_are_positioned_and_scaled() {
        let projector = projector();
        let snapshot = IncidentSnapshot::new(vec![record(0, -99.13, 19.43, 25.0), record(1, 0.0, 0.0, 100.0)]);
        let context = RenderContext::new(&projector, RadiusScale::from_snapshot(&snapshot, 15.0));

        let ops = SymbolLayer.render(snapshot.records(), &context);
        assert_eq!(ops.len(), 2);

        let first = circle(&ops[0]);
        assert_abs_diff_eq!(first.center.x(), 220.3167, epsilon = 1e-3);
        assert_abs_diff_eq!(first.center.y(), 189.9628, epsilon = 1e-3);
        assert_abs_diff_eq!(first.radius, 7.5, epsilon = 1e-12);

        let second = circle(&ops[1]);
        assert_abs_diff_eq!(second.radius, 15.0, epsilon = 1e-12);
        assert_eq!(ops[1].key, 1);
    }

    #[test]
    fn empty_input_gives_no_ops() {
        let projector = projector();
        let context = RenderContext::new(&projector, RadiusScale::new(100.0, 15.0));
        assert!(SymbolLayer.render(&[], &context).is_empty());
    }

    #[test]
    fn reordering_changes_only_order() {
        let projector = projector();
        let context = RenderContext::new(&projector, RadiusScale::new(50.0, 15.0));
        let records = vec![
            record(0, 10.0, 10.0, 5.0),
            record(1, -40.0, 35.0, 50.0),
            record(2, 120.0, -20.0, 12.0),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward: Vec<Circle> = SymbolLayer.render(&records, &context).iter().map(circle).collect();
        let mut backward: Vec<Circle> = SymbolLayer.render(&reversed, &context).iter().map(circle).collect();
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn invalid_records_are_skipped() {
        let projector = projector();
        let context = RenderContext::new(&projector, RadiusScale::new(10.0, 15.0));
        let records = vec![
            record(0, 19.43, -99.13, 5.0),
            record(1, 10.0, 10.0, -1.0),
            record(2, 10.0, 10.0, 0.0),
        ];

        let ops = SymbolLayer.render(&records, &context);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].key, 2);
        assert_eq!(circle(&ops[0]).radius, 0.0);
    }

    #[test]
    fn degenerate_scale_gives_zero_radii() {
        let projector = projector();
        let records = vec![record(0, 10.0, 10.0, 0.0), record(1, 20.0, 10.0, 0.0)];
        let snapshot = IncidentSnapshot::new(records);
        let context = RenderContext::new(&projector, RadiusScale::from_snapshot(&snapshot, 15.0));

        let ops = SymbolLayer.render(snapshot.records(), &context);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| circle(op).radius == 0.0));
    }
}
