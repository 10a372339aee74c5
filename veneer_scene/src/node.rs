// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene nodes and their mount / update / unmount lifecycle.

use hashbrown::HashMap;
use kurbo::Affine;
use veneer_drawable::{DrawableId, DrawingBackend};

use crate::apply;
use crate::children;
use crate::descriptor::{Key, NodeDesc, NodeKind};
use crate::error::SceneError;
use crate::events::EventBindings;

/// Mutable context threaded through one reconciliation pass.
///
/// Bundles the backend with the scene-wide event tables so that lifecycle,
/// diffing, and property application all mutate through one handle. A pass
/// runs to completion synchronously; there is no suspension point and no
/// internal scheduling.
pub(crate) struct Pass<'a, B: DrawingBackend> {
    pub(crate) backend: &'a mut B,
    pub(crate) events: &'a mut EventBindings,
}

/// Keyed live children of one container node.
pub(crate) type ChildSet = HashMap<Key, SceneNode>;

/// One mounted node: a native drawable plus reconciliation bookkeeping.
///
/// The stored descriptor is the snapshot the next pass diffs against;
/// `recorded_transform` holds the six coefficients last written to the
/// backend so redundant transform writes can be skipped.
#[derive(Debug)]
pub(crate) struct SceneNode {
    drawable: DrawableId,
    kind: NodeKind,
    desc: NodeDesc,
    recorded_transform: [f64; 6],
    /// `Some` exactly for container kinds.
    children: Option<ChildSet>,
}

impl SceneNode {
    /// Create the native drawable for `desc`, apply its full property set
    /// against blank defaults, and recursively mount container children.
    ///
    /// The caller places the returned node among its siblings. On error the
    /// partially mounted subtree is fully released before returning.
    pub(crate) fn mount<B: DrawingBackend>(
        pass: &mut Pass<'_, B>,
        desc: &NodeDesc,
    ) -> Result<Self, SceneError> {
        let kind = desc.kind();
        let drawable = match kind {
            NodeKind::Group => pass.backend.create_group(),
            NodeKind::ClippingRect => pass.backend.create_clipping_rect(),
            NodeKind::Shape => pass.backend.create_shape(),
            NodeKind::Text => pass.backend.create_text(),
        };
        let mut node = Self {
            drawable,
            kind,
            desc: desc.clone(),
            recorded_transform: Affine::IDENTITY.as_coeffs(),
            children: desc.children().map(|_| ChildSet::default()),
        };
        apply::apply_delta(pass, drawable, &mut node.recorded_transform, None, desc);
        let mounted = match (node.children.as_mut(), desc.children()) {
            (Some(set), Some(new_children)) => {
                children::reconcile(pass, drawable, set, new_children)
            }
            _ => Ok(()),
        };
        // A node that failed to mount has no key in any child set; release
        // it here or its drawable and subscriptions leak.
        if let Err(err) = mounted {
            node.unmount(pass);
            return Err(err);
        }
        Ok(node)
    }

    /// Apply the property deltas between the stored descriptor and `new`,
    /// then reconcile children for container kinds.
    ///
    /// Only called when `new` is the same logical node: same key, same kind.
    pub(crate) fn update<B: DrawingBackend>(
        &mut self,
        pass: &mut Pass<'_, B>,
        new: &NodeDesc,
    ) -> Result<(), SceneError> {
        debug_assert_eq!(self.kind, new.kind(), "updates never cross node types");
        let old = core::mem::replace(&mut self.desc, new.clone());
        apply::apply_delta(
            pass,
            self.drawable,
            &mut self.recorded_transform,
            Some(&old),
            new,
        );
        if let (Some(set), Some(new_children)) = (self.children.as_mut(), new.children()) {
            children::reconcile(pass, self.drawable, set, new_children)?;
        }
        Ok(())
    }

    /// Release the whole subtree's subscriptions and eject the drawable
    /// from its parent.
    pub(crate) fn unmount<B: DrawingBackend>(mut self, pass: &mut Pass<'_, B>) {
        self.release(pass);
        pass.backend.eject(self.drawable);
    }

    /// Subscription teardown for this node and every descendant.
    ///
    /// Ejecting the subtree root detaches the native children with it, so
    /// descendants only need their bookkeeping released, not an eject each.
    fn release<B: DrawingBackend>(&mut self, pass: &mut Pass<'_, B>) {
        pass.events.unbind_all(&mut *pass.backend, self.drawable);
        if let Some(children) = self.children.take() {
            for (_key, mut child) in children {
                child.release(pass);
            }
        }
    }

    #[inline]
    pub(crate) fn drawable(&self) -> DrawableId {
        self.drawable
    }

    #[inline]
    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Look up a live child by key, for container kinds.
    pub(crate) fn child(&self, key: &Key) -> Option<&Self> {
        self.children.as_ref()?.get(key)
    }
}
