// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface root: owner of the backend and the mounted scene graph.

use veneer_drawable::{DrawableId, DrawingBackend, PointerEvent};

use crate::children;
use crate::descriptor::{Key, SurfaceDesc};
use crate::error::SceneError;
use crate::events::EventBindings;
use crate::node::{ChildSet, Pass};

/// A mounted scene: the native surface plus every live node under it.
///
/// The backend is passed in explicitly at construction and owned for the
/// surface's lifetime; there is no process-wide backend selection. All
/// passes are synchronous and run to completion; the caller is responsible
/// for serializing them (single-threaded model).
#[derive(Debug)]
pub struct Surface<B: DrawingBackend> {
    backend: B,
    drawable: DrawableId,
    width: f64,
    height: f64,
    events: EventBindings,
    children: ChildSet,
}

impl<B: DrawingBackend> Surface<B> {
    /// Create the native surface at the descriptor's size and perform a
    /// full mount pass over its children.
    pub fn mount(mut backend: B, desc: &SurfaceDesc) -> Result<Self, SceneError> {
        let drawable = backend.create_surface(desc.width, desc.height);
        let mut events = EventBindings::new();
        let mut children = ChildSet::default();
        {
            let mut pass = Pass {
                backend: &mut backend,
                events: &mut events,
            };
            children::reconcile(&mut pass, drawable, &mut children, &desc.children)?;
        }
        Ok(Self {
            backend,
            drawable,
            width: desc.width,
            height: desc.height,
            events,
            children,
        })
    }

    /// Reconcile the scene against a new descriptor tree.
    ///
    /// Resizes the native surface only when the size actually changed,
    /// reconciles children, then flushes backends that render explicitly.
    pub fn update(&mut self, desc: &SurfaceDesc) -> Result<(), SceneError> {
        if self.width != desc.width || self.height != desc.height {
            self.backend.resize(self.drawable, desc.width, desc.height);
            self.width = desc.width;
            self.height = desc.height;
        }
        let mut pass = Pass {
            backend: &mut self.backend,
            events: &mut self.events,
        };
        children::reconcile(&mut pass, self.drawable, &mut self.children, &desc.children)?;
        self.backend.render();
        Ok(())
    }

    /// Unmount every child and hand the backend back.
    ///
    /// Detaching the native surface from its host is the backend's (or the
    /// host's) business, not the scene graph's.
    pub fn unmount(mut self) -> B {
        {
            let mut pass = Pass {
                backend: &mut self.backend,
                events: &mut self.events,
            };
            for (_key, node) in core::mem::take(&mut self.children) {
                node.unmount(&mut pass);
            }
        }
        self.backend
    }

    /// Deliver a native event to the handler currently bound on `target`.
    ///
    /// Returns whether a handler was bound. The handler looked up is the
    /// one from the most recent pass, so descriptor-level handler swaps
    /// take effect without resubscription.
    pub fn dispatch(&self, target: DrawableId, event: &PointerEvent) -> bool {
        self.events.dispatch(target, event.kind, event)
    }

    /// Resolve a key path from the surface root to a mounted drawable.
    ///
    /// Useful for hosts that need to target [`Surface::dispatch`] and for
    /// tests that assert on a particular node's backend state.
    pub fn drawable_at(&self, path: &[Key]) -> Option<DrawableId> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(first)?;
        for key in rest {
            node = node.child(key)?;
        }
        Some(node.drawable())
    }

    /// The native surface handle.
    #[inline]
    pub fn drawable(&self) -> DrawableId {
        self.drawable
    }

    /// Current surface width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current surface height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Shared access to the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exclusive access to the backend.
    ///
    /// Intended for host integration (delivering input, presenting frames);
    /// mutating scene structure behind the reconciler's back is on the
    /// caller.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
