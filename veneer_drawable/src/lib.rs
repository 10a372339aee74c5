// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veneer Drawable: descriptor value types and native-drawable backend traits.
//!
//! This crate defines the plain-old-data (POD) friendly value types that
//! appear in Veneer descriptors — paths, fonts, fills, strokes, event
//! types — together with the capability contract that a concrete vector
//! drawing backend implements so that the reconciler in `veneer_scene` can
//! drive it.
//!
//! # Position in the stack
//!
//! Conceptually there are three layers:
//!
//! - **Authoring**: whatever produces descriptor trees (templating,
//!   component composition). Out of scope for Veneer.
//! - **Reconciliation**: `veneer_scene` diffs descriptor trees and issues
//!   the minimal set of backend mutations.
//! - **Backends (this crate's traits)**: concrete renderers — SVG writers,
//!   canvas rasterizers, recording test doubles — that implement
//!   [`DrawingBackend`] over opaque [`DrawableId`] handles.
//!
//! # Core concepts
//!
//! - **Handles**: [`DrawableId`] identifies one native drawable (group,
//!   clipping region, shape, text run, or surface) for its whole lifetime.
//!   [`SubscriptionId`] identifies one live event subscription.
//! - **Value specs**: [`PathSpec`], [`Font`], [`StrokeSpec`], and
//!   [`Fill`] describe what a node should look like. Each documents its own
//!   comparison policy (value vs. identity), which the reconciler relies on
//!   to skip redundant backend calls.
//! - **Fill capability**: gradient and pattern fills implement [`ApplyFill`]
//!   and are dispatched through [`FillTarget`], so new fill kinds need no
//!   changes to the reconciler.
//! - **Optional capabilities**: [`DrawingBackend::blend`] and
//!   [`DrawingBackend::render`] have default no-op bodies. A backend that
//!   cannot express opacity or needs no explicit flush simply leaves them
//!   alone; absence is a feature gap, never an error.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, BezPath, Cap, Join, Point};
use peniko::Color;

/// Identifier for a native drawable.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// drawable. The backend allocates one per created node and interprets it
/// however it likes; the reconciler only stores and compares them.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u32);

/// Identifier for a live event subscription.
///
/// Returned by [`DrawingBackend::subscribe`] and passed back to
/// [`DrawingBackend::unsubscribe`] exactly once.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The fixed set of recognized pointer event types.
///
/// Descriptors can carry at most one handler per event type, and backends
/// forward native input as one of these. The set is closed: anything else is
/// not an event the scene graph understands, and the type system keeps it
/// that way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// The pointer moved while over the drawable.
    PointerMove,
    /// The pointer entered the drawable.
    PointerOver,
    /// The pointer left the drawable.
    PointerOut,
    /// A pointer button was released over the drawable.
    PointerUp,
    /// A pointer button was pressed over the drawable.
    PointerDown,
    /// A primary-button click was recognized on the drawable.
    Click,
}

impl EventType {
    /// All recognized event types, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::PointerMove,
        Self::PointerOver,
        Self::PointerOut,
        Self::PointerUp,
        Self::PointerDown,
        Self::Click,
    ];

    /// Number of recognized event types.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable index of this event type, suitable for array-backed tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::PointerMove => 0,
            Self::PointerOver => 1,
            Self::PointerOut => 2,
            Self::PointerUp => 3,
            Self::PointerDown => 4,
            Self::Click => 5,
        }
    }
}

/// A pointer event delivered to a bound handler.
///
/// The reconciler forwards these unchanged from the backend to whichever
/// handler is bound at dispatch time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which kind of event this is.
    pub kind: EventType,
    /// Pointer position in surface coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// Create a pointer event.
    #[inline]
    pub const fn new(kind: EventType, position: Point) -> Self {
        Self { kind, position }
    }
}

/// One stop of a gradient ramp.
///
/// Compared by value; two stops with equal offset and color are equal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Normalized offset along the ramp, in `0.0..=1.0`.
    pub offset: f32,
    /// Color at this offset.
    pub color: Color,
}

impl GradientStop {
    /// Create a stop.
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }

    /// Spread a list of colors evenly across `0.0..=1.0`.
    ///
    /// A single color produces one stop at offset `0.0`.
    pub fn spread(colors: &[Color]) -> Vec<Self> {
        let last = colors.len().saturating_sub(1).max(1);
        colors
            .iter()
            .enumerate()
            .map(|(i, &color)| Self::new(i as f32 / last as f32, color))
            .collect()
    }
}

/// Path geometry for a shape drawable.
///
/// Comparison policy (which the reconciler's geometry guard relies on):
///
/// - [`PathSpec::Svg`] compares by **string value**. Reproducing the same
///   path-data string on every pass costs nothing extra.
/// - [`PathSpec::Bez`] compares by **`Rc` identity**. Callers that build a
///   [`BezPath`] should reuse the same `Rc` across passes for unchanged
///   geometry; a freshly allocated equal path counts as changed.
#[derive(Clone, Debug)]
pub enum PathSpec {
    /// SVG path data, e.g. `"M0,0L50,0L50,50Z"`.
    Svg(Rc<str>),
    /// A built Bézier path.
    Bez(Rc<BezPath>),
}

impl PathSpec {
    /// Create a path spec from SVG path data.
    #[inline]
    pub fn svg(data: impl Into<Rc<str>>) -> Self {
        Self::Svg(data.into())
    }

    /// Create a path spec from a built path.
    #[inline]
    pub fn bez(path: impl Into<Rc<BezPath>>) -> Self {
        Self::Bez(path.into())
    }
}

impl PartialEq for PathSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Svg(a), Self::Svg(b)) => a == b,
            (Self::Bez(a), Self::Bez(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<BezPath> for PathSpec {
    #[inline]
    fn from(path: BezPath) -> Self {
        Self::Bez(Rc::new(path))
    }
}

/// Font slant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Font variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FontVariant {
    /// Regular glyphs.
    #[default]
    Normal,
    /// Small capitals.
    SmallCaps,
}

/// Font description for a text drawable.
///
/// Compared field by field; two fonts describing the same face are equal
/// regardless of where their values came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in surface units.
    pub size: f64,
    /// Weight on the usual 100–900 scale.
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
    /// Variant.
    pub variant: FontVariant,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            size: 12.0,
            weight: 400,
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
        }
    }
}

/// Horizontal alignment of a text drawable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center.
    Center,
    /// Align to the right edge.
    Right,
}

/// Stroke description for a renderable drawable.
///
/// Comparison policy: `color`, `width`, `cap`, and `join` compare by value;
/// `dash` compares by **`Rc` identity**, not contents. Reuse the same
/// `Rc<[f64]>` across passes for an unchanged dash pattern; an equal array
/// in a fresh `Rc` counts as changed.
#[derive(Clone, Debug)]
pub struct StrokeSpec {
    /// Stroke color; `None` paints nothing but still sets width/caps.
    pub color: Option<Color>,
    /// Stroke width in surface units.
    pub width: f64,
    /// Line cap.
    pub cap: Cap,
    /// Line join.
    pub join: Join,
    /// Dash pattern as alternating on/off lengths, or `None` for solid.
    pub dash: Option<Rc<[f64]>>,
}

impl StrokeSpec {
    /// A solid stroke of the given color and width with default caps/joins.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color: Some(color),
            width,
            cap: Cap::Butt,
            join: Join::Miter,
            dash: None,
        }
    }
}

impl PartialEq for StrokeSpec {
    fn eq(&self, other: &Self) -> bool {
        let dash_same = match (&self.dash, &other.dash) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.color == other.color
            && self.width == other.width
            && self.cap == other.cap
            && self.join == other.join
            && dash_same
    }
}

/// Capability contract through which fill descriptors paint themselves.
///
/// This is the object-safe subset of [`DrawingBackend`] that an
/// [`ApplyFill`] implementation may call. Keeping it separate lets fill
/// descriptors stay trait objects while the reconciler stays generic over
/// the concrete backend.
pub trait FillTarget {
    /// Fill with a solid color, or clear the fill with `None`.
    fn fill_solid(&mut self, node: DrawableId, color: Option<Color>);

    /// Fill with a linear gradient from `(x1, y1)` to `(x2, y2)`.
    fn fill_linear(
        &mut self,
        node: DrawableId,
        stops: &[GradientStop],
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    );

    /// Fill with a radial gradient.
    ///
    /// `(fx, fy)` is the focus, `(rx, ry)` the radii, and `(cx, cy)` the
    /// center.
    fn fill_radial(
        &mut self,
        node: DrawableId,
        stops: &[GradientStop],
        fx: f64,
        fy: f64,
        rx: f64,
        ry: f64,
        cx: f64,
        cy: f64,
    );

    /// Fill with a repeating image pattern.
    fn fill_image(
        &mut self,
        node: DrawableId,
        url: &str,
        width: f64,
        height: f64,
        left: f64,
        top: f64,
    );
}

/// A fill descriptor that knows how to paint itself onto a node.
///
/// The reconciler never inspects the concrete type behind this trait; it
/// only forwards to [`ApplyFill::apply_fill`] when the fill reference
/// changed. Adding a new fill kind means implementing this trait, nothing
/// more.
pub trait ApplyFill: fmt::Debug {
    /// Issue the backend calls that establish this fill on `node`.
    fn apply_fill(&self, node: DrawableId, target: &mut dyn FillTarget);
}

/// A linear gradient fill.
#[derive(Clone, Debug)]
pub struct LinearGradient {
    /// Gradient stops, in ramp order.
    pub stops: Vec<GradientStop>,
    /// Start point X.
    pub x1: f64,
    /// Start point Y.
    pub y1: f64,
    /// End point X.
    pub x2: f64,
    /// End point Y.
    pub y2: f64,
}

impl LinearGradient {
    /// Create a linear gradient between two points.
    pub fn new(stops: Vec<GradientStop>, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            stops,
            x1,
            y1,
            x2,
            y2,
        }
    }
}

impl ApplyFill for LinearGradient {
    fn apply_fill(&self, node: DrawableId, target: &mut dyn FillTarget) {
        target.fill_linear(node, &self.stops, self.x1, self.y1, self.x2, self.y2);
    }
}

/// A radial gradient fill.
#[derive(Clone, Debug)]
pub struct RadialGradient {
    /// Gradient stops, in ramp order.
    pub stops: Vec<GradientStop>,
    /// Focus X.
    pub fx: f64,
    /// Focus Y.
    pub fy: f64,
    /// Radius X.
    pub rx: f64,
    /// Radius Y.
    pub ry: f64,
    /// Center X.
    pub cx: f64,
    /// Center Y.
    pub cy: f64,
}

impl ApplyFill for RadialGradient {
    fn apply_fill(&self, node: DrawableId, target: &mut dyn FillTarget) {
        target.fill_radial(
            node,
            &self.stops,
            self.fx,
            self.fy,
            self.rx,
            self.ry,
            self.cx,
            self.cy,
        );
    }
}

/// A repeating image-pattern fill.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Image source.
    pub url: String,
    /// Tile width.
    pub width: f64,
    /// Tile height.
    pub height: f64,
    /// Horizontal tile offset.
    pub left: f64,
    /// Vertical tile offset.
    pub top: f64,
}

impl ApplyFill for Pattern {
    fn apply_fill(&self, node: DrawableId, target: &mut dyn FillTarget) {
        target.fill_image(node, &self.url, self.width, self.height, self.left, self.top);
    }
}

/// Fill of a renderable drawable.
///
/// Comparison policy:
///
/// - [`Fill::Color`] compares by **color value**. The same red is the same
///   red no matter how often it is respelled.
/// - [`Fill::Brush`] compares by **`Rc` identity**. Gradient and pattern
///   descriptors are treated as opaque; reuse the `Rc` across passes for an
///   unchanged fill.
#[derive(Clone, Debug)]
pub enum Fill {
    /// A plain color fill.
    Color(Color),
    /// A capability-dispatched fill (gradient, pattern, or custom).
    Brush(Rc<dyn ApplyFill>),
}

impl Fill {
    /// Wrap an [`ApplyFill`] implementation.
    #[inline]
    pub fn brush(fill: impl ApplyFill + 'static) -> Self {
        Self::Brush(Rc::new(fill))
    }
}

impl PartialEq for Fill {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Brush(a), Self::Brush(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Color> for Fill {
    #[inline]
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Capability set a native vector-drawing backend exposes to the reconciler.
///
/// The reconciler is generic over an implementation of this trait and issues
/// every scene mutation through it. All calls are synchronous; they either
/// succeed or panic inside the backend — the reconciler performs no retries.
///
/// # Structure operations
///
/// `inject`/`inject_before`/`eject` and the sibling accessors must model a
/// real ordered tree: after `inject_before(n, s)`, `n` is the immediate
/// previous sibling of `s`. The child-list differ depends on this to place
/// children with O(1) calls each.
///
/// # Optional capabilities
///
/// [`DrawingBackend::blend`] (opacity) and [`DrawingBackend::render`]
/// (explicit flush) default to no-ops. Backends without the capability leave
/// the defaults in place; callers treat absence as feature-not-supported,
/// never as an error.
pub trait DrawingBackend: FillTarget {
    // Constructors.

    /// Create a group drawable.
    fn create_group(&mut self) -> DrawableId;
    /// Create a clipping-rectangle drawable.
    fn create_clipping_rect(&mut self) -> DrawableId;
    /// Create a shape drawable.
    fn create_shape(&mut self) -> DrawableId;
    /// Create a text drawable.
    fn create_text(&mut self) -> DrawableId;
    /// Create the root surface at the given pixel size.
    ///
    /// How the surface attaches to a host container (a window, a DOM
    /// element, a file) is the backend's own business, configured when the
    /// backend itself is constructed.
    fn create_surface(&mut self, width: f64, height: f64) -> DrawableId;

    // Structure.

    /// First child of a container, if any.
    fn first_child(&self, node: DrawableId) -> Option<DrawableId>;
    /// Next sibling of a node, if any.
    fn next_sibling(&self, node: DrawableId) -> Option<DrawableId>;
    /// Previous sibling of a node, if any.
    fn previous_sibling(&self, node: DrawableId) -> Option<DrawableId>;
    /// Append `node` as the last child of `parent`, detaching it first if
    /// it is already in the tree.
    fn inject(&mut self, node: DrawableId, parent: DrawableId);
    /// Insert `node` immediately before `sibling`, detaching it first if it
    /// is already in the tree.
    fn inject_before(&mut self, node: DrawableId, sibling: DrawableId);
    /// Remove `node` (and its subtree) from its parent.
    fn eject(&mut self, node: DrawableId);

    // Any drawable.

    /// Set the node's transform to the given affine matrix.
    fn transform_to(&mut self, node: DrawableId, transform: Affine);
    /// Make the node visible.
    fn show(&mut self, node: DrawableId);
    /// Hide the node.
    fn hide(&mut self, node: DrawableId);
    /// Set pointer cursor and hover title for the node.
    fn indicate(&mut self, node: DrawableId, cursor: Option<&str>, title: Option<&str>);
    /// Set the node's opacity in `0.0..=1.0`.
    ///
    /// Optional capability; the default does nothing.
    fn blend(&mut self, node: DrawableId, opacity: f64) {
        let _ = (node, opacity);
    }
    /// Subscribe the node to events of the given type.
    ///
    /// The backend is expected to deliver matching native input for `node`
    /// to whoever owns the scene (see `veneer_scene::Surface::dispatch`).
    fn subscribe(&mut self, node: DrawableId, event: EventType) -> SubscriptionId;
    /// Release a subscription returned by [`DrawingBackend::subscribe`].
    fn unsubscribe(&mut self, subscription: SubscriptionId);

    // Group / clipping geometry.

    /// Set the nominal size of a group drawable.
    fn set_size(&mut self, node: DrawableId, width: Option<f64>, height: Option<f64>);
    /// Set the clip frame of a clipping-rectangle drawable.
    fn set_clip_frame(&mut self, node: DrawableId, x: f64, y: f64, width: f64, height: f64);

    // Shape drawable.

    /// Replace the shape's path geometry.
    ///
    /// This is assumed to be the most expensive call in the contract; the
    /// reconciler guards it aggressively.
    fn draw_shape(
        &mut self,
        node: DrawableId,
        path: &PathSpec,
        width: Option<f64>,
        height: Option<f64>,
    );
    /// Set or clear the shape's stroke.
    fn stroke(&mut self, node: DrawableId, stroke: Option<&StrokeSpec>);

    // Text drawable.

    /// Replace the text run's content and layout inputs.
    fn draw_text(
        &mut self,
        node: DrawableId,
        content: &str,
        font: &Font,
        alignment: Alignment,
        wrap_path: Option<&BezPath>,
    );

    // Surface.

    /// Resize the root surface.
    fn resize(&mut self, surface: DrawableId, width: f64, height: f64);
    /// Flush pending drawing, for backends that render explicitly.
    ///
    /// Optional capability; the default does nothing.
    fn render(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[derive(Default)]
    struct StopCollector {
        calls: Vec<&'static str>,
        last_linear: Option<(usize, f64, f64, f64, f64)>,
    }

    impl FillTarget for StopCollector {
        fn fill_solid(&mut self, _node: DrawableId, _color: Option<Color>) {
            self.calls.push("solid");
        }

        fn fill_linear(
            &mut self,
            _node: DrawableId,
            stops: &[GradientStop],
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        ) {
            self.calls.push("linear");
            self.last_linear = Some((stops.len(), x1, y1, x2, y2));
        }

        fn fill_radial(
            &mut self,
            _node: DrawableId,
            _stops: &[GradientStop],
            _fx: f64,
            _fy: f64,
            _rx: f64,
            _ry: f64,
            _cx: f64,
            _cy: f64,
        ) {
            self.calls.push("radial");
        }

        fn fill_image(
            &mut self,
            _node: DrawableId,
            _url: &str,
            _width: f64,
            _height: f64,
            _left: f64,
            _top: f64,
        ) {
            self.calls.push("image");
        }
    }

    #[test]
    fn spread_distributes_offsets_evenly() {
        let stops = GradientStop::spread(&[Color::BLACK, Color::WHITE, Color::BLACK]);
        assert_eq!(stops.len(), 3, "one stop per color");
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[1].offset, 0.5);
        assert_eq!(stops[2].offset, 1.0);

        let single = GradientStop::spread(&[Color::WHITE]);
        assert_eq!(single.len(), 1, "single color yields single stop");
        assert_eq!(single[0].offset, 0.0);
    }

    #[test]
    fn color_fills_compare_by_value() {
        let red = Color::from_rgb8(255, 0, 0);
        let also_red = Color::from_rgb8(255, 0, 0);
        assert_eq!(Fill::Color(red), Fill::Color(also_red));
        assert_ne!(Fill::Color(red), Fill::Color(Color::from_rgb8(0, 0, 255)));
    }

    #[test]
    fn brush_fills_compare_by_identity() {
        let stops = GradientStop::spread(&[Color::BLACK, Color::WHITE]);
        let a = Fill::brush(LinearGradient::new(stops.clone(), 0.0, 0.0, 1.0, 0.0));
        let b = Fill::brush(LinearGradient::new(stops, 0.0, 0.0, 1.0, 0.0));
        assert_eq!(a, a.clone(), "same Rc compares equal");
        assert_ne!(a, b, "equal contents, distinct Rcs compare unequal");
    }

    #[test]
    fn svg_paths_compare_by_value_bez_paths_by_identity() {
        assert_eq!(PathSpec::svg("M0,0Z"), PathSpec::svg("M0,0Z"));
        assert_ne!(PathSpec::svg("M0,0Z"), PathSpec::svg("M1,1Z"));

        let bez = Rc::new(BezPath::new());
        assert_eq!(PathSpec::Bez(bez.clone()), PathSpec::Bez(bez.clone()));
        assert_ne!(
            PathSpec::Bez(bez.clone()),
            PathSpec::Bez(Rc::new(BezPath::new()))
        );
        assert_ne!(PathSpec::svg("M0,0Z"), PathSpec::Bez(bez));
    }

    #[test]
    fn stroke_dash_compares_by_identity() {
        let dash: Rc<[f64]> = Rc::from([4.0, 2.0]);
        let base = StrokeSpec {
            dash: Some(dash.clone()),
            ..StrokeSpec::solid(Color::BLACK, 2.0)
        };
        let same_rc = StrokeSpec {
            dash: Some(dash),
            ..StrokeSpec::solid(Color::BLACK, 2.0)
        };
        let fresh_rc = StrokeSpec {
            dash: Some(Rc::from([4.0, 2.0])),
            ..StrokeSpec::solid(Color::BLACK, 2.0)
        };
        assert_eq!(base, same_rc);
        assert_ne!(base, fresh_rc, "equal dash contents in a fresh Rc differ");
    }

    #[test]
    fn gradient_dispatches_through_fill_target() {
        let gradient = LinearGradient::new(
            GradientStop::spread(&[Color::BLACK, Color::WHITE]),
            0.0,
            0.0,
            50.0,
            50.0,
        );
        let mut target = StopCollector::default();
        gradient.apply_fill(DrawableId(7), &mut target);
        assert_eq!(target.calls, vec!["linear"]);
        assert_eq!(target.last_linear, Some((2, 0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn fill_debug_is_printable() {
        let fill = Fill::brush(Pattern {
            url: String::from("tile.png"),
            width: 8.0,
            height: 8.0,
            left: 0.0,
            top: 0.0,
        });
        let text = format!("{fill:?}");
        assert!(text.contains("Pattern"), "debug output names the brush kind");
    }
}
