//! Element snapshots and observer-driven recompute.
//!
//! An [`Element`] is an immutable snapshot of one drawing element. Its
//! geometry is a pure function of that snapshot. [`LiveElement`] holds the
//! current snapshot for an editing host: every change goes through
//! [`LiveElement::update`], which recomputes the geometry and hands the fresh
//! value to each observer. Nothing is cached between changes.

use crate::config::LayoutConfig;
use crate::errors::GeometryError;
use crate::geometry::{PathSegment, Segment};
use crate::layout::arc::{CurvedSegment, reconstruct_arc, reconstruct_polygon_path};
use crate::layout::dimension::{DimensionGenerator, DimensionGeometry, DimensionSpec};
use crate::layout::measure::{StrokeFont, TextMeasure};
use crate::layout::pin::{LabelWidths, PinPlacement, PinSpec, layout_pin_with};
use crate::layout::text::{TextPlacement, TextSpec, layout_text_with};
use crate::log::{debug, trace};
use crate::types::{BBox, Point};

/// One drawing element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Wire(CurvedSegment),
    Polygon {
        vertices: Vec<Point>,
        /// Curve of the edge leaving each vertex
        curves: Vec<f64>,
        closed: bool,
    },
    Text(TextSpec),
    Dimension(DimensionSpec),
    Pin(PinSpec),
}

impl Element {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Wire(_) => "wire",
            Element::Polygon { .. } => "polygon",
            Element::Text(_) => "text",
            Element::Dimension(_) => "dimension",
            Element::Pin(_) => "pin",
        }
    }

    /// Compute the geometry of this snapshot
    pub fn geometry(
        &self,
        config: &LayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Result<Geometry, GeometryError> {
        trace!(kind = self.kind(), "computing element geometry");
        let geometry = match self {
            Element::Wire(seg) => Geometry::Path(vec![reconstruct_arc(seg)]),
            Element::Polygon {
                vertices,
                curves,
                closed,
            } => Geometry::Path(reconstruct_polygon_path(vertices, curves, *closed)?),
            Element::Text(spec) => {
                Geometry::Text(layout_text_with(spec, measure.measure(spec), config))
            }
            Element::Dimension(spec) => {
                Geometry::Dimension(DimensionGenerator::new(*config, measure).generate(spec))
            }
            Element::Pin(spec) => {
                let [name, pad, dir_swap] =
                    spec.label_specs(config).map(|t| measure.measure(&t).width);
                let widths = LabelWidths { name, pad, dir_swap };
                Geometry::Pin(layout_pin_with(spec, widths, config)?)
            }
        };
        Ok(geometry)
    }
}

/// Computed geometry of one element
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Path(Vec<Segment>),
    Text(TextPlacement),
    Dimension(DimensionGeometry),
    Pin(PinPlacement),
}

impl Geometry {
    /// Stroked segments, if the element has any
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Geometry::Path(segments) => segments.clone(),
            Geometry::Text(_) => Vec::new(),
            Geometry::Dimension(dim) => dim.segments(),
            Geometry::Pin(pin) => pin.segments().into_iter().map(Segment::Line).collect(),
        }
    }

    /// Bounds of the stroked segments
    pub fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for seg in self.segments() {
            bb.expand_box(&seg.bounds());
        }
        bb
    }
}

/// Handle returned by [`LiveElement::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&Geometry)>;

/// The current snapshot of an element being edited, plus its observers
pub struct LiveElement<M = StrokeFont> {
    element: Element,
    config: LayoutConfig,
    measure: M,
    observers: Vec<(ObserverId, Observer)>,
    next_id: usize,
}

impl LiveElement<StrokeFont> {
    pub fn new(element: Element) -> Self {
        Self::with_measure(element, LayoutConfig::default(), StrokeFont::default())
    }
}

impl<M: TextMeasure> LiveElement<M> {
    pub fn with_measure(element: Element, config: LayoutConfig, measure: M) -> Self {
        Self {
            element,
            config,
            measure,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Geometry of the current snapshot
    pub fn geometry(&self) -> Result<Geometry, GeometryError> {
        self.element.geometry(&self.config, &self.measure)
    }

    /// Register a callback that receives the geometry after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&Geometry) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Edit the snapshot and notify observers with the recomputed geometry.
    ///
    /// When the edited snapshot has no valid geometry the previous snapshot is
    /// kept and no observer runs.
    pub fn update(&mut self, edit: impl FnOnce(&mut Element)) -> Result<Geometry, GeometryError> {
        let mut next = self.element.clone();
        edit(&mut next);
        self.replace(next)
    }

    /// Replace the whole snapshot, with the same rules as [`LiveElement::update`]
    pub fn replace(&mut self, element: Element) -> Result<Geometry, GeometryError> {
        let geometry = element.geometry(&self.config, &self.measure)?;
        self.element = element;
        debug!(
            kind = self.element.kind(),
            observers = self.observers.len(),
            "element changed"
        );
        for (_, observer) in &mut self.observers {
            observer(&geometry);
        }
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::pin::PinLength;
    use crate::types::Angle;

    fn wire(curve: f64) -> Element {
        Element::Wire(CurvedSegment::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            curve,
        ))
    }

    #[test]
    fn wire_geometry_follows_curve() {
        let cfg = LayoutConfig::default();
        let straight = wire(0.0).geometry(&cfg, &StrokeFont::default()).unwrap();
        assert!(!straight.segments()[0].is_arc());
        let curved = wire(90.0).geometry(&cfg, &StrokeFont::default()).unwrap();
        assert!(curved.segments()[0].is_arc());
    }

    #[test]
    fn polygon_errors_surface() {
        let poly = Element::Polygon {
            vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            curves: vec![0.0],
            closed: true,
        };
        let err = poly.geometry(&LayoutConfig::default(), &StrokeFont::default());
        assert!(matches!(err, Err(GeometryError::CurveCountMismatch { .. })));
    }

    #[test]
    fn pin_labels_are_measured() {
        let pin = Element::Pin(PinSpec::new("DATA"));
        let Geometry::Pin(p) = pin
            .geometry(&LayoutConfig::default(), &StrokeFont::default())
            .unwrap()
        else {
            panic!("expected pin geometry");
        };
        assert!(p.name.placement.size.w > 0.0);
        assert_eq!(p.pad.text.value, "99");
    }

    #[test]
    fn update_notifies_every_observer_with_fresh_geometry() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut live = LiveElement::new(wire(0.0));
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            live.subscribe(move |g| seen.borrow_mut().push(g.segments()[0].is_arc()));
        }

        live.update(|e| {
            if let Element::Wire(seg) = e {
                seg.curve = 45.0;
            }
        })
        .unwrap();

        assert_eq!(*seen.borrow(), vec![true, true]);
        let fresh = live
            .element()
            .geometry(&LayoutConfig::default(), &StrokeFont::default())
            .unwrap();
        assert_eq!(live.geometry().unwrap(), fresh);
    }

    #[test]
    fn failed_update_keeps_snapshot_and_stays_quiet() {
        let calls = Rc::new(RefCell::new(0));
        let pin = PinSpec::new("A").with_length(PinLength::Short);
        let mut live = LiveElement::new(Element::Pin(pin.clone()));
        let counter = Rc::clone(&calls);
        live.subscribe(move |_| *counter.borrow_mut() += 1);

        let result = live.update(|e| {
            if let Element::Pin(p) = e {
                p.rotation = Angle(30.0);
            }
        });
        assert!(result.is_err());
        assert_eq!(live.element(), &Element::Pin(pin));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn unsubscribed_observers_stop_hearing() {
        let calls = Rc::new(RefCell::new(0));
        let mut live = LiveElement::new(wire(0.0));
        let counter = Rc::clone(&calls);
        let id = live.subscribe(move |_| *counter.borrow_mut() += 1);

        live.replace(wire(10.0)).unwrap();
        assert!(live.unsubscribe(id));
        assert!(!live.unsubscribe(id));
        live.replace(wire(20.0)).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }
}
