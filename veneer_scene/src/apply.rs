// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type property diffing and application.
//!
//! Every property is guarded by its own predicate over (old, new); a false
//! predicate is a silent no-op by design. `old = None` means a fresh mount,
//! which diffs against blank defaults — so a property left unset on mount
//! issues no backend call either. Geometry is the most expensive backend
//! call per node type and is guarded first; the remaining order is chosen
//! for readability, not correctness.

use alloc::rc::Rc;

use veneer_drawable::{DrawableId, DrawingBackend, EventType, Fill, FillTarget, StrokeSpec};

use crate::descriptor::{NodeDesc, NodeProps, ShapeDesc, TextDesc};
use crate::node::Pass;
use crate::transform::compose_transform;

/// Apply the deltas between `old` and `new` to the node's drawable.
///
/// `recorded_transform` is the coefficient snapshot of the last transform
/// written for this drawable; it is updated in place when a write happens.
pub(crate) fn apply_delta<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    drawable: DrawableId,
    recorded_transform: &mut [f64; 6],
    old: Option<&NodeDesc>,
    new: &NodeDesc,
) {
    match new {
        NodeDesc::Group(new_desc) => {
            let old_desc = old.and_then(|desc| match desc {
                NodeDesc::Group(group) => Some(group),
                _ => None,
            });
            let old_size = old_desc.map_or((None, None), |o| (o.width, o.height));
            if old_size != (new_desc.width, new_desc.height) {
                pass.backend
                    .set_size(drawable, new_desc.width, new_desc.height);
            }
            apply_node_props(
                pass,
                drawable,
                recorded_transform,
                old_desc.map(|o| &o.props),
                &new_desc.props,
            );
        }
        NodeDesc::ClippingRect(new_desc) => {
            let old_desc = old.and_then(|desc| match desc {
                NodeDesc::ClippingRect(clip) => Some(clip),
                _ => None,
            });
            let old_frame = old_desc.map_or((0.0, 0.0, 0.0, 0.0), |o| {
                (o.x, o.y, o.width, o.height)
            });
            if old_frame != (new_desc.x, new_desc.y, new_desc.width, new_desc.height) {
                pass.backend.set_clip_frame(
                    drawable,
                    new_desc.x,
                    new_desc.y,
                    new_desc.width,
                    new_desc.height,
                );
            }
            apply_node_props(
                pass,
                drawable,
                recorded_transform,
                old_desc.map(|o| &o.props),
                &new_desc.props,
            );
        }
        NodeDesc::Shape(new_desc) => {
            let old_desc = old.and_then(|desc| match desc {
                NodeDesc::Shape(shape) => Some(shape),
                _ => None,
            });
            apply_shape_geometry(pass, drawable, old_desc, new_desc);
            apply_renderable(
                pass,
                drawable,
                old_desc.and_then(|o| o.fill.as_ref()),
                new_desc.fill.as_ref(),
                old_desc.and_then(|o| o.stroke.as_ref()),
                new_desc.stroke.as_ref(),
            );
            apply_node_props(
                pass,
                drawable,
                recorded_transform,
                old_desc.map(|o| &o.props),
                &new_desc.props,
            );
        }
        NodeDesc::Text(new_desc) => {
            let old_desc = old.and_then(|desc| match desc {
                NodeDesc::Text(text) => Some(text),
                _ => None,
            });
            apply_text_geometry(pass, drawable, old_desc, new_desc);
            apply_renderable(
                pass,
                drawable,
                old_desc.and_then(|o| o.fill.as_ref()),
                new_desc.fill.as_ref(),
                old_desc.and_then(|o| o.stroke.as_ref()),
                new_desc.stroke.as_ref(),
            );
            apply_node_props(
                pass,
                drawable,
                recorded_transform,
                old_desc.map(|o| &o.props),
                &new_desc.props,
            );
        }
    }
}

fn apply_shape_geometry<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    drawable: DrawableId,
    old: Option<&ShapeDesc>,
    new: &ShapeDesc,
) {
    let changed = match old {
        None => true,
        Some(old) => {
            old.path != new.path || old.width != new.width || old.height != new.height
        }
    };
    if changed {
        pass.backend
            .draw_shape(drawable, &new.path, new.width, new.height);
    }
}

fn apply_text_geometry<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    drawable: DrawableId,
    old: Option<&TextDesc>,
    new: &TextDesc,
) {
    let changed = match old {
        None => true,
        Some(old) => {
            let wrap_same = match (&old.wrap_path, &new.wrap_path) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            old.content != new.content
                || old.font != new.font
                || old.alignment != new.alignment
                || !wrap_same
        }
    };
    if changed {
        pass.backend.draw_text(
            drawable,
            &new.content,
            &new.font,
            new.alignment,
            new.wrap_path.as_deref(),
        );
    }
}

/// Fill and stroke deltas, shared by shape and text.
///
/// Fills dispatch through their own [`veneer_drawable::ApplyFill`]
/// capability so new fill kinds bypass this module entirely; only the plain
/// color/none cases go through `fill_solid` directly.
fn apply_renderable<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    drawable: DrawableId,
    old_fill: Option<&Fill>,
    new_fill: Option<&Fill>,
    old_stroke: Option<&StrokeSpec>,
    new_stroke: Option<&StrokeSpec>,
) {
    if old_fill != new_fill {
        match new_fill {
            Some(Fill::Brush(brush)) => {
                let target: &mut dyn FillTarget = &mut *pass.backend;
                brush.apply_fill(drawable, target);
            }
            Some(Fill::Color(color)) => pass.backend.fill_solid(drawable, Some(*color)),
            None => pass.backend.fill_solid(drawable, None),
        }
    }
    if old_stroke != new_stroke {
        pass.backend.stroke(drawable, new_stroke);
    }
}

/// Shared node-prop deltas: transform, indication, opacity, visibility,
/// event bindings.
fn apply_node_props<B: DrawingBackend>(
    pass: &mut Pass<'_, B>,
    drawable: DrawableId,
    recorded_transform: &mut [f64; 6],
    old: Option<&NodeProps>,
    new: &NodeProps,
) {
    let transform = compose_transform(new);
    let coeffs = transform.as_coeffs();
    if coeffs != *recorded_transform {
        pass.backend.transform_to(drawable, transform);
        *recorded_transform = coeffs;
    }

    let old_indicate = old.map_or((None, None), |o| (o.cursor.as_deref(), o.title.as_deref()));
    if old_indicate != (new.cursor.as_deref(), new.title.as_deref()) {
        pass.backend
            .indicate(drawable, new.cursor.as_deref(), new.title.as_deref());
    }

    if old.and_then(|o| o.opacity) != new.opacity {
        pass.backend.blend(drawable, new.opacity.unwrap_or(1.0));
    }

    if old.and_then(|o| o.visible) != new.visible {
        if new.visible.unwrap_or(true) {
            pass.backend.show(drawable);
        } else {
            pass.backend.hide(drawable);
        }
    }

    // The bindings table short-circuits no-op changes itself.
    for event in EventType::ALL {
        pass.events
            .bind(&mut *pass.backend, drawable, event, new.handlers.get(event));
    }
}
