// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-subscription bookkeeping.
//!
//! One native subscription exists per `(node, event type)` pair while a
//! handler is bound, regardless of how often the handler itself is replaced.
//! Dispatch looks up the currently bound handler, so replacement takes
//! effect without resubscribing.

use core::fmt;

use hashbrown::HashMap;
use veneer_drawable::{DrawableId, DrawingBackend, EventType, PointerEvent, SubscriptionId};

use crate::descriptor::Handler;

/// Handler and subscription tables for the whole scene.
///
/// Owned by the surface root; nodes are identified by their drawable
/// handles.
#[derive(Default)]
pub(crate) struct EventBindings {
    handlers: HashMap<(DrawableId, EventType), Handler>,
    subscriptions: HashMap<(DrawableId, EventType), SubscriptionId>,
}

impl EventBindings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bring the binding for `(node, event)` in line with the descriptor.
    ///
    /// Subscribes natively only on a none-to-some transition and
    /// unsubscribes only on some-to-none; a handler swap touches just the
    /// dispatch table.
    pub(crate) fn bind<B: DrawingBackend>(
        &mut self,
        backend: &mut B,
        node: DrawableId,
        event: EventType,
        handler: Option<&Handler>,
    ) {
        let slot = (node, event);
        match handler {
            Some(handler) => {
                self.handlers.insert(slot, handler.clone());
                if !self.subscriptions.contains_key(&slot) {
                    let id = backend.subscribe(node, event);
                    self.subscriptions.insert(slot, id);
                }
            }
            None => {
                self.handlers.remove(&slot);
                if let Some(id) = self.subscriptions.remove(&slot) {
                    backend.unsubscribe(id);
                }
            }
        }
    }

    /// Release every outstanding subscription for `node`, unconditionally.
    pub(crate) fn unbind_all<B: DrawingBackend>(&mut self, backend: &mut B, node: DrawableId) {
        for event in EventType::ALL {
            let slot = (node, event);
            self.handlers.remove(&slot);
            if let Some(id) = self.subscriptions.remove(&slot) {
                backend.unsubscribe(id);
            }
        }
    }

    /// Invoke the handler currently bound for `(node, event kind)`.
    ///
    /// Returns whether a handler was bound.
    pub(crate) fn dispatch(
        &self,
        node: DrawableId,
        event: EventType,
        payload: &PointerEvent,
    ) -> bool {
        match self.handlers.get(&(node, event)) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for EventBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBindings")
            .field("handlers", &self.handlers.len())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
