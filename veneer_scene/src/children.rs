// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed reconciliation of a container's child list.
//!
//! Matching is by key; a key that reappears with a different node type is
//! never updated in place, because no safe property mapping exists between
//! heterogeneous drawable kinds — the old node is destroyed and a fresh one
//! mounted.
//!
//! Placement is a single left-to-right pass over the new order, tracking the
//! most recently placed child. A child already immediately following that
//! cursor needs no move; anything else is spliced in before its
//! next-sibling-to-be (or appended). Each out-of-place child costs O(1)
//! native calls, so a nearly-sorted list — the common case for a stable
//! UI — reconciles in O(n) native operations with few or zero moves.

use alloc::vec::Vec;

use hashbrown::HashMap;
use veneer_drawable::{DrawableId, DrawingBackend};

use crate::descriptor::{Child, Key, NodeKind};
use crate::error::SceneError;
use crate::node::{ChildSet, Pass, SceneNode};

/// Reconcile `container`'s live children against the new child list.
pub(crate) fn reconcile<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    container: DrawableId,
    set: &mut ChildSet,
    new_children: &[Child],
) -> Result<(), SceneError> {
    // Reject key collisions before mutating anything in this container.
    let mut new_kinds: HashMap<&Key, NodeKind> = HashMap::with_capacity(new_children.len());
    for child in new_children {
        if new_kinds.insert(&child.key, child.desc.kind()).is_some() {
            return Err(SceneError::DuplicateChildKey {
                key: child.key.clone(),
            });
        }
    }

    // Unmount children whose key disappeared or whose type changed.
    let stale: Vec<Key> = set
        .iter()
        .filter(|(key, node)| new_kinds.get(*key) != Some(&node.kind()))
        .map(|(key, _)| key.clone())
        .collect();
    for key in stale {
        if let Some(node) = set.remove(&key) {
            node.unmount(pass);
        }
    }

    // Update or mount, placing each child as we go.
    let mut cursor: Option<DrawableId> = None;
    for child in new_children {
        if let Some(mut node) = set.remove(&child.key) {
            // A failed nested pass must leave the node registered, so a
            // corrected retry can still reconcile or unmount it.
            if let Err(err) = node.update(pass, &child.desc) {
                set.insert(child.key.clone(), node);
                return Err(err);
            }
            place_existing(&mut *pass.backend, container, &mut cursor, node.drawable());
            set.insert(child.key.clone(), node);
        } else {
            let node = SceneNode::mount(pass, &child.desc)?;
            place_new(&mut *pass.backend, container, &mut cursor, node.drawable());
            set.insert(child.key.clone(), node);
        }
    }
    Ok(())
}

/// Place a child that is already somewhere in the container.
///
/// Issues a native insertion only when the child is not already in position.
fn place_existing<B: DrawingBackend>(
    backend: &mut B,
    container: DrawableId,
    cursor: &mut Option<DrawableId>,
    node: DrawableId,
) {
    match *cursor {
        // Should be first.
        None => {
            if backend.previous_sibling(node).is_some() {
                match backend.first_child(container) {
                    Some(first) => backend.inject_before(node, first),
                    None => backend.inject(node, container),
                }
            }
        }
        // Should immediately follow the cursor.
        Some(placed) => {
            if backend.next_sibling(placed) != Some(node) {
                match backend.next_sibling(placed) {
                    Some(next) => backend.inject_before(node, next),
                    None => backend.inject(node, container),
                }
            }
        }
    }
    *cursor = Some(node);
}

/// Place a freshly mounted child that is not yet in the container.
fn place_new<B: DrawingBackend>(
    backend: &mut B,
    container: DrawableId,
    cursor: &mut Option<DrawableId>,
    node: DrawableId,
) {
    let before = match *cursor {
        None => backend.first_child(container),
        Some(placed) => backend.next_sibling(placed),
    };
    match before {
        Some(sibling) => backend.inject_before(node, sibling),
        None => backend.inject(node, container),
    }
    *cursor = Some(node);
}
