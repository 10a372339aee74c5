// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veneer Drawable Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`DrawingBackend`] and [`FillTarget`] for **mutation recording and tree
//! tracing**.
//!
//! It is intentionally *not* a "reference renderer":
//! - It does **not** rasterize to pixels.
//! - It does **not** establish "golden" rendering behavior across backends.
//! - It is intended primarily for tests and debugging that want to assert on
//!   the exact backend calls a reconciliation pass emitted, and on the node
//!   tree that resulted from them.
//!
//! Unlike a flat call log, the structural operations (`inject`,
//! `inject_before`, `eject`) are honored against a real ordered tree, so the
//! sibling queries the reconciler relies on behave as they would in a
//! production backend.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Affine, BezPath};
use peniko::Color;
use smallvec::SmallVec;
use veneer_drawable::{
    Alignment, DrawableId, DrawingBackend, EventType, FillTarget, Font, GradientStop, PathSpec,
    StrokeSpec, SubscriptionId,
};

/// What kind of drawable a node was created as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawableKind {
    /// A group container.
    Group,
    /// A clipping-rectangle container.
    ClippingRect,
    /// A shape.
    Shape,
    /// A text run.
    Text,
    /// The root surface.
    Surface,
}

/// One backend call recorded by the reference backend.
///
/// Arguments are captured by value so assertions can inspect them after the
/// pass has finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A drawable was created.
    Create {
        /// Handle of the new drawable.
        node: DrawableId,
        /// Kind it was created as.
        kind: DrawableKind,
    },
    /// A node was appended as the last child of a parent.
    Inject {
        /// The moved node.
        node: DrawableId,
        /// Its new parent.
        parent: DrawableId,
    },
    /// A node was inserted immediately before a sibling.
    InjectBefore {
        /// The moved node.
        node: DrawableId,
        /// The sibling it now precedes.
        sibling: DrawableId,
    },
    /// A node was removed from the tree.
    Eject {
        /// The removed node.
        node: DrawableId,
    },
    /// A node's transform was set.
    TransformTo {
        /// The node.
        node: DrawableId,
        /// The new transform.
        transform: Affine,
    },
    /// A node was made visible.
    Show {
        /// The node.
        node: DrawableId,
    },
    /// A node was hidden.
    Hide {
        /// The node.
        node: DrawableId,
    },
    /// A node's cursor and hover title were set.
    Indicate {
        /// The node.
        node: DrawableId,
        /// Pointer cursor, if any.
        cursor: Option<String>,
        /// Hover title, if any.
        title: Option<String>,
    },
    /// A node's opacity was set.
    Blend {
        /// The node.
        node: DrawableId,
        /// Opacity in `0.0..=1.0`.
        opacity: f64,
    },
    /// A node was subscribed to an event type.
    Subscribe {
        /// The node.
        node: DrawableId,
        /// The event type.
        event: EventType,
    },
    /// A subscription was released.
    Unsubscribe {
        /// The node the subscription belonged to.
        node: DrawableId,
        /// The event type it covered.
        event: EventType,
    },
    /// A group's nominal size was set.
    SetSize {
        /// The group.
        node: DrawableId,
        /// New width, if any.
        width: Option<f64>,
        /// New height, if any.
        height: Option<f64>,
    },
    /// A clipping rectangle's frame was set.
    SetClipFrame {
        /// The clipping rectangle.
        node: DrawableId,
        /// Frame origin X.
        x: f64,
        /// Frame origin Y.
        y: f64,
        /// Frame width.
        width: f64,
        /// Frame height.
        height: f64,
    },
    /// A shape's path geometry was replaced.
    DrawShape {
        /// The shape.
        node: DrawableId,
        /// The new path.
        path: PathSpec,
        /// Nominal width, if any.
        width: Option<f64>,
        /// Nominal height, if any.
        height: Option<f64>,
    },
    /// A shape's stroke was set or cleared.
    Stroke {
        /// The shape.
        node: DrawableId,
        /// The new stroke, or `None` to clear.
        stroke: Option<StrokeSpec>,
    },
    /// A text run's content and layout inputs were replaced.
    DrawText {
        /// The text run.
        node: DrawableId,
        /// New text content.
        content: String,
        /// New font.
        font: Font,
        /// New alignment.
        alignment: Alignment,
        /// Whether a wrap path was supplied.
        wrapped: bool,
    },
    /// A node's fill was set to a solid color, or cleared.
    FillSolid {
        /// The node.
        node: DrawableId,
        /// The color, or `None` to clear the fill.
        color: Option<Color>,
    },
    /// A node's fill was set to a linear gradient.
    FillLinear {
        /// The node.
        node: DrawableId,
        /// Gradient stops.
        stops: Vec<GradientStop>,
        /// Start point X.
        x1: f64,
        /// Start point Y.
        y1: f64,
        /// End point X.
        x2: f64,
        /// End point Y.
        y2: f64,
    },
    /// A node's fill was set to a radial gradient.
    FillRadial {
        /// The node.
        node: DrawableId,
        /// Gradient stops.
        stops: Vec<GradientStop>,
    },
    /// A node's fill was set to an image pattern.
    FillImage {
        /// The node.
        node: DrawableId,
        /// Image source.
        url: String,
    },
    /// The surface was resized.
    Resize {
        /// The surface.
        surface: DrawableId,
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Pending drawing was flushed.
    Render,
}

/// Per-node record of the reference tree.
#[derive(Clone, Debug)]
struct NodeRecord {
    kind: DrawableKind,
    parent: Option<DrawableId>,
    children: SmallVec<[DrawableId; 4]>,
}

/// Simple reference implementation of the drawing backend.
///
/// This backend:
/// - Allocates dense `u32` handles and never reuses them,
/// - Maintains a real ordered tree so sibling queries are meaningful,
/// - Records every mutating call as an [`Event`], in order,
/// - Tracks live subscriptions per node.
#[derive(Default, Debug)]
pub struct RefBackend {
    nodes: Vec<NodeRecord>,
    events: Vec<Event>,
    next_subscription: u64,
    subscriptions: HashMap<SubscriptionId, (DrawableId, EventType)>,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Clears recorded events but keeps the node tree and subscriptions.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of recorded mutations, excluding [`Event::Render`].
    ///
    /// `Render` is a flush, not a scene mutation, so "this pass changed
    /// nothing" assertions want it excluded.
    pub fn mutation_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| !matches!(event, Event::Render))
            .count()
    }

    /// Number of recorded placements (`Inject` plus `InjectBefore`).
    pub fn insertion_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Inject { .. } | Event::InjectBefore { .. }))
            .count()
    }

    /// Children of `parent`, in tree order.
    pub fn children_of(&self, parent: DrawableId) -> &[DrawableId] {
        &self.node(parent).children
    }

    /// Kind a node was created as.
    pub fn kind_of(&self, node: DrawableId) -> DrawableKind {
        self.node(node).kind
    }

    /// Whether a node currently has a parent in the tree.
    pub fn is_attached(&self, node: DrawableId) -> bool {
        self.node(node).parent.is_some()
    }

    /// Number of live subscriptions held by `node`.
    pub fn live_subscriptions(&self, node: DrawableId) -> usize {
        self.subscriptions
            .values()
            .filter(|(holder, _)| *holder == node)
            .count()
    }

    fn node(&self, id: DrawableId) -> &NodeRecord {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: DrawableId) -> &mut NodeRecord {
        &mut self.nodes[id.0 as usize]
    }

    fn create(&mut self, kind: DrawableKind) -> DrawableId {
        let id = u32::try_from(self.nodes.len())
            .expect("RefBackend: too many drawables for u32 DrawableId");
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: SmallVec::new(),
        });
        let node = DrawableId(id);
        self.events.push(Event::Create { node, kind });
        node
    }

    /// Remove `node` from its current parent's child list, if attached.
    fn detach(&mut self, node: DrawableId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            let siblings = &mut self.node_mut(parent).children;
            siblings.retain(|child| *child != node);
        }
    }

    fn position(&self, node: DrawableId) -> Option<(DrawableId, usize)> {
        let parent = self.node(node).parent?;
        let index = self
            .node(parent)
            .children
            .iter()
            .position(|child| *child == node)?;
        Some((parent, index))
    }
}

impl FillTarget for RefBackend {
    fn fill_solid(&mut self, node: DrawableId, color: Option<Color>) {
        self.events.push(Event::FillSolid { node, color });
    }

    fn fill_linear(
        &mut self,
        node: DrawableId,
        stops: &[GradientStop],
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) {
        self.events.push(Event::FillLinear {
            node,
            stops: stops.to_vec(),
            x1,
            y1,
            x2,
            y2,
        });
    }

    fn fill_radial(
        &mut self,
        node: DrawableId,
        stops: &[GradientStop],
        _fx: f64,
        _fy: f64,
        _rx: f64,
        _ry: f64,
        _cx: f64,
        _cy: f64,
    ) {
        self.events.push(Event::FillRadial {
            node,
            stops: stops.to_vec(),
        });
    }

    fn fill_image(
        &mut self,
        node: DrawableId,
        url: &str,
        _width: f64,
        _height: f64,
        _left: f64,
        _top: f64,
    ) {
        self.events.push(Event::FillImage {
            node,
            url: url.to_string(),
        });
    }
}

impl DrawingBackend for RefBackend {
    fn create_group(&mut self) -> DrawableId {
        self.create(DrawableKind::Group)
    }

    fn create_clipping_rect(&mut self) -> DrawableId {
        self.create(DrawableKind::ClippingRect)
    }

    fn create_shape(&mut self) -> DrawableId {
        self.create(DrawableKind::Shape)
    }

    fn create_text(&mut self) -> DrawableId {
        self.create(DrawableKind::Text)
    }

    fn create_surface(&mut self, width: f64, height: f64) -> DrawableId {
        let surface = self.create(DrawableKind::Surface);
        self.events.push(Event::Resize {
            surface,
            width,
            height,
        });
        surface
    }

    fn first_child(&self, node: DrawableId) -> Option<DrawableId> {
        self.node(node).children.first().copied()
    }

    fn next_sibling(&self, node: DrawableId) -> Option<DrawableId> {
        let (parent, index) = self.position(node)?;
        self.node(parent).children.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: DrawableId) -> Option<DrawableId> {
        let (parent, index) = self.position(node)?;
        index.checked_sub(1).map(|i| self.node(parent).children[i])
    }

    fn inject(&mut self, node: DrawableId, parent: DrawableId) {
        self.detach(node);
        self.node_mut(parent).children.push(node);
        self.node_mut(node).parent = Some(parent);
        self.events.push(Event::Inject { node, parent });
    }

    fn inject_before(&mut self, node: DrawableId, sibling: DrawableId) {
        self.detach(node);
        let (parent, index) = self
            .position(sibling)
            .expect("RefBackend: inject_before sibling is not attached");
        self.node_mut(parent).children.insert(index, node);
        self.node_mut(node).parent = Some(parent);
        self.events.push(Event::InjectBefore { node, sibling });
    }

    fn eject(&mut self, node: DrawableId) {
        self.detach(node);
        self.events.push(Event::Eject { node });
    }

    fn transform_to(&mut self, node: DrawableId, transform: Affine) {
        self.events.push(Event::TransformTo { node, transform });
    }

    fn show(&mut self, node: DrawableId) {
        self.events.push(Event::Show { node });
    }

    fn hide(&mut self, node: DrawableId) {
        self.events.push(Event::Hide { node });
    }

    fn indicate(&mut self, node: DrawableId, cursor: Option<&str>, title: Option<&str>) {
        self.events.push(Event::Indicate {
            node,
            cursor: cursor.map(ToString::to_string),
            title: title.map(ToString::to_string),
        });
    }

    fn blend(&mut self, node: DrawableId, opacity: f64) {
        self.events.push(Event::Blend { node, opacity });
    }

    fn subscribe(&mut self, node: DrawableId, event: EventType) -> SubscriptionId {
        let subscription = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(subscription, (node, event));
        self.events.push(Event::Subscribe { node, event });
        subscription
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        // Tolerate double release; only live subscriptions are recorded.
        if let Some((node, event)) = self.subscriptions.remove(&subscription) {
            self.events.push(Event::Unsubscribe { node, event });
        }
    }

    fn set_size(&mut self, node: DrawableId, width: Option<f64>, height: Option<f64>) {
        self.events.push(Event::SetSize {
            node,
            width,
            height,
        });
    }

    fn set_clip_frame(&mut self, node: DrawableId, x: f64, y: f64, width: f64, height: f64) {
        self.events.push(Event::SetClipFrame {
            node,
            x,
            y,
            width,
            height,
        });
    }

    fn draw_shape(
        &mut self,
        node: DrawableId,
        path: &PathSpec,
        width: Option<f64>,
        height: Option<f64>,
    ) {
        self.events.push(Event::DrawShape {
            node,
            path: path.clone(),
            width,
            height,
        });
    }

    fn stroke(&mut self, node: DrawableId, stroke: Option<&StrokeSpec>) {
        self.events.push(Event::Stroke {
            node,
            stroke: stroke.cloned(),
        });
    }

    fn draw_text(
        &mut self,
        node: DrawableId,
        content: &str,
        font: &Font,
        alignment: Alignment,
        wrap_path: Option<&BezPath>,
    ) {
        self.events.push(Event::DrawText {
            node,
            content: content.to_string(),
            font: font.clone(),
            alignment,
            wrapped: wrap_path.is_some(),
        });
    }

    fn resize(&mut self, surface: DrawableId, width: f64, height: f64) {
        self.events.push(Event::Resize {
            surface,
            width,
            height,
        });
    }

    fn render(&mut self) {
        self.events.push(Event::Render);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_builds_an_ordered_tree() {
        let mut backend = RefBackend::default();
        let root = backend.create_group();
        let a = backend.create_shape();
        let b = backend.create_shape();
        let c = backend.create_shape();

        backend.inject(a, root);
        backend.inject(b, root);
        backend.inject(c, root);

        assert_eq!(backend.children_of(root), &[a, b, c]);
        assert_eq!(backend.first_child(root), Some(a));
        assert_eq!(backend.next_sibling(a), Some(b));
        assert_eq!(backend.previous_sibling(b), Some(a));
        assert_eq!(backend.next_sibling(c), None);
        assert_eq!(backend.previous_sibling(a), None);
    }

    #[test]
    fn inject_before_moves_an_attached_node() {
        let mut backend = RefBackend::default();
        let root = backend.create_group();
        let a = backend.create_shape();
        let b = backend.create_shape();
        let c = backend.create_shape();
        backend.inject(a, root);
        backend.inject(b, root);
        backend.inject(c, root);

        // Move c to the front; it must leave its old slot.
        backend.inject_before(c, a);
        assert_eq!(backend.children_of(root), &[c, a, b]);
        assert!(backend.is_attached(c));
    }

    #[test]
    fn eject_detaches_and_tolerates_repeats() {
        let mut backend = RefBackend::default();
        let root = backend.create_group();
        let a = backend.create_shape();
        backend.inject(a, root);

        backend.eject(a);
        assert!(!backend.is_attached(a));
        assert_eq!(backend.children_of(root), &[] as &[DrawableId]);

        // Ejecting an already detached node records but does not panic.
        backend.eject(a);
    }

    #[test]
    fn mutation_count_excludes_render() {
        let mut backend = RefBackend::default();
        let root = backend.create_group();
        backend.show(root);
        backend.render();
        assert_eq!(backend.events().len(), 3);
        assert_eq!(backend.mutation_count(), 2);
    }

    #[test]
    fn subscriptions_are_tracked_per_node() {
        let mut backend = RefBackend::default();
        let node = backend.create_shape();

        let click = backend.subscribe(node, EventType::Click);
        let down = backend.subscribe(node, EventType::PointerDown);
        assert_eq!(backend.live_subscriptions(node), 2);

        backend.unsubscribe(click);
        assert_eq!(backend.live_subscriptions(node), 1);

        // Double release is silent.
        backend.unsubscribe(click);
        assert_eq!(backend.live_subscriptions(node), 1);

        backend.unsubscribe(down);
        assert_eq!(backend.live_subscriptions(node), 0);
        assert_eq!(
            backend
                .events()
                .iter()
                .filter(|event| matches!(event, Event::Unsubscribe { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn recorded_arguments_survive_by_value() {
        let mut backend = RefBackend::default();
        let shape = backend.create_shape();
        backend.clear_events();

        let path = PathSpec::svg("M0,0L10,0L10,10Z");
        backend.draw_shape(shape, &path, Some(10.0), None);

        assert_eq!(
            backend.events(),
            &[Event::DrawShape {
                node: shape,
                path: PathSpec::svg("M0,0L10,0L10,10Z"),
                width: Some(10.0),
                height: None,
            }]
        );
    }

    #[test]
    fn insertion_count_counts_both_placement_ops() {
        let mut backend = RefBackend::default();
        let root = backend.create_group();
        let a = backend.create_shape();
        let b = backend.create_shape();
        backend.inject(a, root);
        backend.inject_before(b, a);
        backend.show(a);
        assert_eq!(backend.insertion_count(), 2);
        assert_eq!(backend.children_of(root), &[b, a]);
    }

    #[test]
    fn create_surface_records_initial_size() {
        let mut backend = RefBackend::default();
        let surface = backend.create_surface(150.0, 100.0);
        assert_eq!(backend.kind_of(surface), DrawableKind::Surface);
        assert_eq!(
            backend.events(),
            &[
                Event::Create {
                    node: surface,
                    kind: DrawableKind::Surface,
                },
                Event::Resize {
                    surface,
                    width: 150.0,
                    height: 100.0,
                },
            ]
        );
    }
}
