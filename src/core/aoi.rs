use crate::types::{AsfError, AsfResult};
use std::io::Write;

/// EPSG:3857 world extent, meters
pub const WEB_MERCATOR_MAX_X: f64 = 20_037_508.342_789_244;
pub const WEB_MERCATOR_MAX_Y: f64 = 19_971_868.880_408_563;

/// Spherical-mercator earth radius, meters
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Padding around the stack bounds in the initial view, meters
const AXIS_PADDING_M: f64 = 10_000.0;

/// A point in EPSG:3857 meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        MapPoint { x, y }
    }
}

/// Corners of a completed box selection, verbatim from the selection tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGeometry {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Events delivered by the map surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// The user completed a box selection
    Selection(SelectionGeometry),
    /// The user reset the view, clearing any selection
    Reset,
}

/// Interactive tools the map surface is expected to expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTool {
    Reset,
    BoxSelect,
    Pan,
    WheelZoom,
    Crosshair,
    Hover,
}

/// Render model handed to a [`MapSurface`]
///
/// The reference outline at the stack bounds is cosmetic; the hover layer is
/// an invisible image stretched across the world extent so the lat/long
/// readout keeps working when the user zooms out of the AOI.
#[derive(Debug, Clone)]
pub struct MapView {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub reference_outline: [MapPoint; 4],
    pub selection_outline: Option<[MapPoint; 4]>,
    pub hover_extent: (MapPoint, MapPoint),
    pub tools: Vec<MapTool>,
}

/// The plotting surface, external to this crate
///
/// The crate ships no renderer; a notebook backend implements this and feeds
/// [`MapEvent`]s back into [`Aoi::handle_event`]. The selection state is the
/// only datum flowing the other way.
pub trait MapSurface {
    fn render(&mut self, view: &MapView) -> AsfResult<()>;
}

/// Area-of-interest selection over a raster stack
///
/// Owns the fixed stack bounds and the user's most recent box selection.
/// Events are pure transitions on this struct; there is no terminal state,
/// the widget stays interactive for the life of the display.
#[derive(Debug, Clone)]
pub struct Aoi {
    stack_bounds: (MapPoint, MapPoint),
    selection: Option<SelectionGeometry>,
}

impl Aoi {
    /// Build an AOI bounded by `lower_left` and `upper_right`
    ///
    /// Corners must be ordered and inside the EPSG:3857 world extent.
    pub fn new(lower_left: MapPoint, upper_right: MapPoint) -> AsfResult<Self> {
        if lower_left.x >= upper_right.x || lower_left.y >= upper_right.y {
            return Err(AsfError::InvalidInput(
                "a lower_left coordinate is greater than an upper_right coordinate".to_string(),
            ));
        }
        for corner in [lower_left, upper_right] {
            if corner.x < -WEB_MERCATOR_MAX_X
                || corner.x > WEB_MERCATOR_MAX_X
                || corner.y < -WEB_MERCATOR_MAX_Y
                || corner.y > WEB_MERCATOR_MAX_Y
            {
                return Err(AsfError::InvalidInput(format!(
                    "({}, {}) is not a valid EPSG:3857 coordinate",
                    corner.x, corner.y
                )));
            }
        }
        Ok(Aoi {
            stack_bounds: (lower_left, upper_right),
            selection: None,
        })
    }

    /// An AOI spanning the whole EPSG:3857 world extent
    pub fn world() -> Self {
        Aoi {
            stack_bounds: (
                MapPoint::new(-WEB_MERCATOR_MAX_X, -WEB_MERCATOR_MAX_Y),
                MapPoint::new(WEB_MERCATOR_MAX_X, WEB_MERCATOR_MAX_Y),
            ),
            selection: None,
        }
    }

    /// Fixed corner pair bounding the full viewable stack
    pub fn stack_bounds(&self) -> (MapPoint, MapPoint) {
        self.stack_bounds
    }

    /// The most recently drawn rectangle, if any
    pub fn selection(&self) -> Option<SelectionGeometry> {
        self.selection
    }

    /// Selection corners in the `[[x0, y0], [x1, y1]]` shape notebooks read
    pub fn subset_coords(&self) -> [[Option<f64>; 2]; 2] {
        match self.selection {
            Some(geometry) => [
                [Some(geometry.x0), Some(geometry.y0)],
                [Some(geometry.x1), Some(geometry.y1)],
            ],
            None => [[None, None], [None, None]],
        }
    }

    /// Apply a map event
    ///
    /// A selection overwrites the previous one wholesale and is echoed to the
    /// user; a reset clears it.
    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Selection(geometry) => {
                self.selection = Some(geometry);
                print!(
                    "\rAOI subset coords: [[{}, {}], [{}, {}]]      \r",
                    geometry.x0, geometry.y0, geometry.x1, geometry.y1
                );
                let _ = std::io::stdout().flush();
            }
            MapEvent::Reset => {
                self.selection = None;
            }
        }
    }

    /// Render model for the current state
    pub fn view(&self) -> MapView {
        let (lower_left, upper_right) = self.stack_bounds;
        MapView {
            title: "Use The Square Selection Tool To Select An Area Of Interest".to_string(),
            x_range: (lower_left.x - AXIS_PADDING_M, upper_right.x + AXIS_PADDING_M),
            y_range: (lower_left.y - AXIS_PADDING_M, upper_right.y + AXIS_PADDING_M),
            reference_outline: rectangle_corners(
                lower_left.x,
                lower_left.y,
                upper_right.x,
                upper_right.y,
            ),
            selection_outline: self
                .selection
                .map(|g| rectangle_corners(g.x0, g.y0, g.x1, g.y1)),
            hover_extent: (
                MapPoint::new(-WEB_MERCATOR_MAX_X, -WEB_MERCATOR_MAX_Y),
                MapPoint::new(WEB_MERCATOR_MAX_X, WEB_MERCATOR_MAX_Y),
            ),
            tools: vec![
                MapTool::Reset,
                MapTool::BoxSelect,
                MapTool::Pan,
                MapTool::WheelZoom,
                MapTool::Crosshair,
                MapTool::Hover,
            ],
        }
    }

    /// Hand the current view to a surface for display
    pub fn display<S: MapSurface>(&self, surface: &mut S) -> AsfResult<()> {
        surface.render(&self.view())?;
        println!("Selected bounding box coords stored in Aoi::subset_coords");
        println!("[[lower_left_x, lower_left_y], [upper_right_x, upper_right_y]]\n");
        Ok(())
    }
}

/// Corner ring ll, ul, ur, lr for a rectangle outline
fn rectangle_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> [MapPoint; 4] {
    [
        MapPoint::new(x0, y0),
        MapPoint::new(x0, y1),
        MapPoint::new(x1, y1),
        MapPoint::new(x1, y0),
    ]
}

/// Spherical-mercator inverse, for the on-hover lat/long readout only
///
/// Returns (longitude, latitude) in degrees. Selection coordinates stay in
/// the display projection.
pub fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let longitude = (x / EARTH_RADIUS_M).to_degrees();
    let latitude =
        (2.0 * (y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (longitude, latitude)
}
