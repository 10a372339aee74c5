// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veneer Scene: a descriptor-tree reconciler for retained vector scenes.
//!
//! This crate keeps a persistent, mutable scene graph of native drawables —
//! groups, clipping rectangles, shapes, text runs, under one root surface —
//! synchronized with an immutable descriptor tree that changes over time.
//! Given the previously applied tree and a new one, it issues the minimal
//! set of structural and property mutations against a
//! [`DrawingBackend`](veneer_drawable::DrawingBackend), without rebuilding
//! unaffected subtrees.
//!
//! ## What it does
//!
//! - **Node lifecycle**: descriptors are mounted into scene nodes, updated
//!   in place while they describe the same logical node, and unmounted
//!   (subscriptions released, drawable ejected) when they disappear.
//! - **Keyed child diffing**: container children are matched across passes
//!   by [`Key`], so reordering is recognized as movement. Re-insertion uses
//!   a most-recently-placed cursor and touches only out-of-place children.
//! - **Property diffing**: each property class (geometry, composed
//!   transform, fill, stroke, visibility, opacity, cursor/title, event
//!   handlers) is guarded by its own equality predicate; applying an equal
//!   descriptor twice issues zero backend calls.
//! - **Event bookkeeping**: one native subscription per bound
//!   `(node, event type)`; handler replacement between passes takes effect
//!   at dispatch time without resubscribing.
//!
//! ## What it does not do
//!
//! No layout, no rasterization, no scheduling. Passes are synchronous and
//! externally triggered; the caller serializes them. The drawing backend is
//! an explicit capability object handed to [`Surface::mount`] — this crate
//! never selects one globally.
//!
//! ## API overview
//!
//! - [`SurfaceDesc`] → [`Surface::mount`] / [`Surface::update`] /
//!   [`Surface::unmount`]: the whole-tree entry points.
//! - [`NodeDesc`], [`GroupDesc`], [`ClippingRectDesc`], [`ShapeDesc`],
//!   [`TextDesc`], [`Child`], [`Key`], [`NodeProps`]: the descriptor model.
//! - [`compose_transform`]: the pure translate/rotate/scale/matrix
//!   composition used for transform diffing.
//! - [`Surface::dispatch`] and [`Surface::drawable_at`]: host-side event
//!   delivery.
//! - [`SceneError`]: configuration errors (duplicate child keys); detected
//!   before the affected container is mutated.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod apply;
mod children;
mod descriptor;
mod error;
mod events;
mod node;
mod surface;
mod transform;

pub use descriptor::{
    Child, ClippingRectDesc, EventHandlers, GroupDesc, Handler, Key, NodeDesc, NodeKind,
    NodeProps, ShapeDesc, SurfaceDesc, TextDesc,
};
pub use error::SceneError;
pub use surface::Surface;
pub use transform::compose_transform;

pub use veneer_drawable::{DrawableId, EventType, PointerEvent};
