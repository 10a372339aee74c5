// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable descriptor tree: what the caller wants the scene to be.
//!
//! Descriptors are plain values produced fresh on every update pass by
//! whatever authoring layer sits above the reconciler. The reconciler reads
//! them, compares them against the previously applied snapshot, and never
//! mutates them.
//!
//! Only container types ([`GroupDesc`], [`ClippingRectDesc`], and the root
//! [`SurfaceDesc`]) carry children, so "children under a non-container" is
//! unrepresentable rather than a runtime configuration error.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::array;
use core::fmt;

use kurbo::{Affine, BezPath};
use veneer_drawable::{
    Alignment, EventType, Fill, Font, PathSpec, PointerEvent, StrokeSpec,
};

/// An event handler bound through a descriptor.
///
/// Handlers are shared, immutable callables; the reconciler clones the `Rc`
/// into its dispatch table. Replacing a handler between passes takes effect
/// at the next dispatch without touching the native subscription.
pub type Handler = Rc<dyn Fn(&PointerEvent)>;

/// Per-event-type handler slots carried by [`NodeProps`].
#[derive(Clone)]
pub struct EventHandlers([Option<Handler>; EventType::COUNT]);

impl EventHandlers {
    /// No handlers bound.
    pub fn new() -> Self {
        Self(array::from_fn(|_| None))
    }

    /// Set or clear the handler for one event type.
    pub fn set(&mut self, event: EventType, handler: Option<Handler>) {
        self.0[event.index()] = handler;
    }

    /// The handler currently described for one event type.
    #[inline]
    pub fn get(&self, event: EventType) -> Option<&Handler> {
        self.0[event.index()].as_ref()
    }

    /// True if no event type has a handler.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

impl Default for EventHandlers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for event in EventType::ALL {
            if self.get(event).is_some() {
                set.entry(&event);
            }
        }
        set.finish()
    }
}

/// Properties shared by every non-surface node.
///
/// Transform inputs (`x`, `y`, `scale*`, `rotation`, `origin*`, `transform`)
/// are composed into a single affine matrix per pass; see
/// [`compose_transform`](crate::compose_transform) for the exact order.
#[derive(Clone, Debug, Default)]
pub struct NodeProps {
    /// Translation along X.
    pub x: f64,
    /// Translation along Y.
    pub y: f64,
    /// Horizontal scale; falls back to `scale`, then `1.0`.
    pub scale_x: Option<f64>,
    /// Vertical scale; falls back to `scale`, then `1.0`.
    pub scale_y: Option<f64>,
    /// Uniform scale fallback.
    pub scale: Option<f64>,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Rotation/scale origin X; unset means `0.0`.
    pub origin_x: Option<f64>,
    /// Rotation/scale origin Y; unset means `0.0`.
    pub origin_y: Option<f64>,
    /// Explicit matrix composed after the translate/rotate/scale inputs.
    pub transform: Option<Affine>,
    /// Visibility; unset means visible.
    pub visible: Option<bool>,
    /// Opacity in `0.0..=1.0`; unset means fully opaque.
    pub opacity: Option<f64>,
    /// Pointer cursor shown while hovering the node.
    pub cursor: Option<String>,
    /// Hover title/tooltip.
    pub title: Option<String>,
    /// Event handlers, one slot per recognized event type.
    pub handlers: EventHandlers,
}

impl NodeProps {
    /// Place the node at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Bind a handler for one event type (builder style).
    pub fn on(mut self, event: EventType, handler: impl Fn(&PointerEvent) + 'static) -> Self {
        self.handlers.set(event, Some(Rc::new(handler)));
        self
    }
}

/// Identity key of a child within its container.
///
/// Keys match children across passes so that reordering is recognized as
/// movement rather than churn. Authoring layers without natural identities
/// fall back to positional [`Key::Index`] keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Caller-chosen identity.
    Explicit(Rc<str>),
    /// Position-derived identity.
    Index(usize),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::Explicit(Rc::from(key))
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::Explicit(Rc::from(key.as_str()))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(key) => write!(f, "{key:?}"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// One keyed child slot in a container descriptor.
#[derive(Clone, Debug)]
pub struct Child {
    /// Identity within the parent container.
    pub key: Key,
    /// Desired node at this slot.
    pub desc: NodeDesc,
}

impl Child {
    /// Create a keyed child.
    pub fn new(key: impl Into<Key>, desc: impl Into<NodeDesc>) -> Self {
        Self {
            key: key.into(),
            desc: desc.into(),
        }
    }
}

/// Desired state of a group node.
#[derive(Clone, Debug, Default)]
pub struct GroupDesc {
    /// Shared node properties.
    pub props: NodeProps,
    /// Nominal width, where the backend cares.
    pub width: Option<f64>,
    /// Nominal height, where the backend cares.
    pub height: Option<f64>,
    /// Ordered, keyed children.
    pub children: Vec<Child>,
}

/// Desired state of a clipping-rectangle node.
#[derive(Clone, Debug, Default)]
pub struct ClippingRectDesc {
    /// Shared node properties.
    pub props: NodeProps,
    /// Clip frame left edge.
    pub x: f64,
    /// Clip frame top edge.
    pub y: f64,
    /// Clip frame width.
    pub width: f64,
    /// Clip frame height.
    pub height: f64,
    /// Ordered, keyed children.
    pub children: Vec<Child>,
}

/// Desired state of a shape node.
#[derive(Clone, Debug)]
pub struct ShapeDesc {
    /// Shared node properties.
    pub props: NodeProps,
    /// Path geometry.
    pub path: PathSpec,
    /// Nominal width used by the backend when scaling path data.
    pub width: Option<f64>,
    /// Nominal height used by the backend when scaling path data.
    pub height: Option<f64>,
    /// Fill, if any.
    pub fill: Option<Fill>,
    /// Stroke, if any.
    pub stroke: Option<StrokeSpec>,
}

impl ShapeDesc {
    /// A shape with the given path and everything else unset.
    pub fn new(path: impl Into<PathSpec>) -> Self {
        Self {
            props: NodeProps::default(),
            path: path.into(),
            width: None,
            height: None,
            fill: None,
            stroke: None,
        }
    }
}

/// Desired state of a text node.
#[derive(Clone, Debug)]
pub struct TextDesc {
    /// Shared node properties.
    pub props: NodeProps,
    /// Text content.
    pub content: String,
    /// Font; compared field by field.
    pub font: Font,
    /// Horizontal alignment.
    pub alignment: Alignment,
    /// Optional path the text wraps along, compared by `Rc` identity.
    pub wrap_path: Option<Rc<BezPath>>,
    /// Fill, if any.
    pub fill: Option<Fill>,
    /// Stroke, if any.
    pub stroke: Option<StrokeSpec>,
}

impl TextDesc {
    /// A text run with the given content and default font.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            props: NodeProps::default(),
            content: content.into(),
            font: Font::default(),
            alignment: Alignment::default(),
            wrap_path: None,
            fill: None,
            stroke: None,
        }
    }
}

/// Type tag of a non-surface node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A plain container.
    Group,
    /// A rectangular clipping container.
    ClippingRect,
    /// A filled/stroked path.
    Shape,
    /// A text run.
    Text,
}

/// Desired state of one non-surface node.
#[derive(Clone, Debug)]
pub enum NodeDesc {
    /// A group.
    Group(GroupDesc),
    /// A clipping rectangle.
    ClippingRect(ClippingRectDesc),
    /// A shape.
    Shape(ShapeDesc),
    /// A text run.
    Text(TextDesc),
}

impl NodeDesc {
    /// The node's type tag.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group(_) => NodeKind::Group,
            Self::ClippingRect(_) => NodeKind::ClippingRect,
            Self::Shape(_) => NodeKind::Shape,
            Self::Text(_) => NodeKind::Text,
        }
    }

    /// Shared node properties.
    pub fn props(&self) -> &NodeProps {
        match self {
            Self::Group(desc) => &desc.props,
            Self::ClippingRect(desc) => &desc.props,
            Self::Shape(desc) => &desc.props,
            Self::Text(desc) => &desc.props,
        }
    }

    /// Children, for container kinds.
    pub fn children(&self) -> Option<&[Child]> {
        match self {
            Self::Group(desc) => Some(&desc.children),
            Self::ClippingRect(desc) => Some(&desc.children),
            Self::Shape(_) | Self::Text(_) => None,
        }
    }
}

impl From<GroupDesc> for NodeDesc {
    fn from(desc: GroupDesc) -> Self {
        Self::Group(desc)
    }
}

impl From<ClippingRectDesc> for NodeDesc {
    fn from(desc: ClippingRectDesc) -> Self {
        Self::ClippingRect(desc)
    }
}

impl From<ShapeDesc> for NodeDesc {
    fn from(desc: ShapeDesc) -> Self {
        Self::Shape(desc)
    }
}

impl From<TextDesc> for NodeDesc {
    fn from(desc: TextDesc) -> Self {
        Self::Text(desc)
    }
}

/// Desired state of the root surface and its whole tree.
#[derive(Clone, Debug, Default)]
pub struct SurfaceDesc {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Ordered, keyed top-level children.
    pub children: Vec<Child>,
}

impl SurfaceDesc {
    /// A surface of the given size with no children yet.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn keys_from_strings_compare_by_content() {
        assert_eq!(Key::from("a"), Key::from("a"));
        assert_ne!(Key::from("a"), Key::from("b"));
        assert_ne!(Key::from("0"), Key::from(0_usize));
    }

    #[test]
    fn handlers_slot_per_event_type() {
        let mut handlers = EventHandlers::new();
        assert!(handlers.is_empty());

        handlers.set(EventType::Click, Some(Rc::new(|_event| {})));
        assert!(handlers.get(EventType::Click).is_some());
        assert!(handlers.get(EventType::PointerDown).is_none());

        handlers.set(EventType::Click, None);
        assert!(handlers.is_empty());
    }

    #[test]
    fn only_containers_expose_children() {
        let group = NodeDesc::from(GroupDesc {
            children: vec![Child::new(0_usize, ShapeDesc::new(PathSpec::svg("M0,0Z")))],
            ..GroupDesc::default()
        });
        assert_eq!(group.kind(), NodeKind::Group);
        assert_eq!(group.children().map(<[Child]>::len), Some(1));

        let shape = NodeDesc::from(ShapeDesc::new(PathSpec::svg("M0,0Z")));
        assert_eq!(shape.kind(), NodeKind::Shape);
        assert!(shape.children().is_none());
    }
}
