// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation errors.

use core::fmt;

use crate::descriptor::Key;

/// A configuration error detected during a mount or update pass.
///
/// Errors are raised at the call site that detected them and abort only the
/// operation for the affected subtree; the caller decides whether to retry
/// with a corrected descriptor tree or abandon the pass. Most configuration
/// mistakes (children under a non-container, unrecognized event types,
/// drawables outside a surface) are unrepresentable in the typed descriptor
/// model, which leaves key collisions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// Two children of the same container carry the same key.
    ///
    /// Detected before any child of that container is mutated.
    DuplicateChildKey {
        /// The colliding key.
        key: Key,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateChildKey { key } => {
                write!(f, "duplicate child key {key} within one container")
            }
        }
    }
}

impl core::error::Error for SceneError {}
