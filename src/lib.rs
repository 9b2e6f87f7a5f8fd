//! Geometry and layout engine for CAD drawing elements.
//!
//! Turns element snapshots (wires, polygons, text, dimensions, pins) into
//! drawable geometry: line and arc segments, arrowheads, text anchors and
//! rotations. Every computation is a pure function of its input; rendering and
//! persistence stay with the host.
//!
//! ```
//! use cadgeom::{DimensionKind, DimensionSpec, Point, generate_dimension_geometry};
//!
//! let spec = DimensionSpec::new(
//!     DimensionKind::Horizontal,
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(5.0, 5.0),
//! );
//! let dim = generate_dimension_geometry(&spec);
//! assert_eq!(dim.measured_value, "10.00mm");
//! ```

pub mod config;
pub mod defaults;
pub mod element;
pub mod errors;
pub mod geometry;
pub mod layout;
pub mod log;
mod macros;
pub mod types;

pub use config::LayoutConfig;
pub use element::{Element, Geometry, LiveElement, ObserverId};
pub use errors::{Degenerate, GeometryError};
pub use geometry::{Arrowhead, ArcSegment, Circle, Crosshair, LineSegment, PathSegment, Segment};
pub use layout::*;
pub use types::{Angle, BBox, Offset, Point, Size};
