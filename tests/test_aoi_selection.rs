use sarfetch::core::aoi::{mercator_to_wgs84, MapTool, MapView, WEB_MERCATOR_MAX_X};
use sarfetch::types::AsfResult;
use sarfetch::{Aoi, MapEvent, MapPoint, MapSurface, SelectionGeometry};

/// Map surface double recording what it was asked to draw
#[derive(Default)]
struct RecordingSurface {
    rendered: Vec<MapView>,
}

impl MapSurface for RecordingSurface {
    fn render(&mut self, view: &MapView) -> AsfResult<()> {
        self.rendered.push(view.clone());
        Ok(())
    }
}

#[test]
fn test_display_hands_the_view_to_the_surface() {
    let aoi = Aoi::new(
        MapPoint::new(-1_000_000.0, -500_000.0),
        MapPoint::new(1_000_000.0, 500_000.0),
    )
    .unwrap();

    let mut surface = RecordingSurface::default();
    aoi.display(&mut surface).unwrap();

    assert_eq!(surface.rendered.len(), 1);
    let view = &surface.rendered[0];
    // reference outline sits at the stack bounds, view padded around it
    assert_eq!(view.reference_outline[0], MapPoint::new(-1_000_000.0, -500_000.0));
    assert_eq!(view.reference_outline[2], MapPoint::new(1_000_000.0, 500_000.0));
    assert!(view.x_range.0 < -1_000_000.0);
    assert!(view.y_range.1 > 500_000.0);
    // the hover layer spans the world so the readout survives zooming out
    assert_eq!(view.hover_extent.0.x, -WEB_MERCATOR_MAX_X);
    assert!(view.tools.contains(&MapTool::Hover));
}

#[test]
fn test_selection_lifecycle_across_renders() {
    let mut aoi = Aoi::world();
    let mut surface = RecordingSurface::default();

    aoi.display(&mut surface).unwrap();
    assert!(surface.rendered[0].selection_outline.is_none());

    aoi.handle_event(MapEvent::Selection(SelectionGeometry {
        x0: 0.0,
        y0: 0.0,
        x1: 100.0,
        y1: 100.0,
    }));
    aoi.display(&mut surface).unwrap();
    let outline = surface.rendered[1].selection_outline.unwrap();
    assert_eq!(outline[0], MapPoint::new(0.0, 0.0));
    assert_eq!(outline[2], MapPoint::new(100.0, 100.0));

    // the widget has no terminal state: reset and select again
    aoi.handle_event(MapEvent::Reset);
    assert_eq!(aoi.subset_coords(), [[None, None], [None, None]]);
    aoi.handle_event(MapEvent::Selection(SelectionGeometry {
        x0: -50.0,
        y0: -60.0,
        x1: 70.0,
        y1: 80.0,
    }));
    assert_eq!(
        aoi.subset_coords(),
        [[Some(-50.0), Some(-60.0)], [Some(70.0), Some(80.0)]]
    );
}

#[test]
fn test_hover_readout_is_geographic() {
    // the hover transform is display-only; selection stays in mercator meters
    let mut aoi = Aoi::world();
    aoi.handle_event(MapEvent::Selection(SelectionGeometry {
        x0: WEB_MERCATOR_MAX_X / 2.0,
        y0: 0.0,
        x1: WEB_MERCATOR_MAX_X,
        y1: 1.0,
    }));

    let coords = aoi.subset_coords();
    let (lon, lat) = mercator_to_wgs84(coords[1][0].unwrap(), coords[0][1].unwrap());
    assert!((lon - 180.0).abs() < 1e-6);
    assert!(lat.abs() < 1e-6);
}
