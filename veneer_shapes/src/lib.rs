// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veneer Shapes.
//!
//! Convenience builders for the paths that come up constantly in vector
//! scenes: circles, rectangles with optional per-corner rounding, and
//! annular wedges. Each builder returns a plain [`BezPath`] centered or
//! anchored at the local origin, so the result composes with the node
//! transform like any other geometry; the `*_desc` variants wrap the same
//! path in a [`ShapeDesc`] ready for a descriptor tree.
//!
//! Corner radii may be negative, which cuts the corner inward (a concave
//! notch) instead of rounding it outward.

#![no_std]

extern crate alloc;

use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};
use veneer_scene::ShapeDesc;

use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// Arc flattening tolerance, in surface units.
const TOLERANCE: f64 = 0.01;

/// A circle of the given radius, centered at the origin.
pub fn circle(radius: f64) -> BezPath {
    Circle::new(Point::ORIGIN, radius).to_path(TOLERANCE)
}

/// A circle wrapped in a [`ShapeDesc`].
pub fn circle_desc(radius: f64) -> ShapeDesc {
    ShapeDesc::new(circle(radius))
}

/// Per-corner rounding radii for [`rectangle`].
///
/// A positive radius rounds the corner outward; a negative radius cuts a
/// concave quarter-circle notch into it; zero leaves it square.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerRadii {
    /// Top-left corner radius.
    pub top_left: f64,
    /// Top-right corner radius.
    pub top_right: f64,
    /// Bottom-right corner radius.
    pub bottom_right: f64,
    /// Bottom-left corner radius.
    pub bottom_left: f64,
}

impl CornerRadii {
    /// The same radius on all four corners.
    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

impl From<f64> for CornerRadii {
    fn from(radius: f64) -> Self {
        Self::uniform(radius)
    }
}

/// A rectangle with its top-left corner at the origin.
///
/// Negative `width` or `height` extends the rectangle in the negative
/// direction instead. Corner pairs whose combined magnitude does not fit
/// along their shared edge are dropped back to square corners, so the
/// outline never self-intersects.
pub fn rectangle(width: f64, height: f64, radii: impl Into<CornerRadii>) -> BezPath {
    let radii = radii.into();
    let (x0, w) = if width < 0.0 {
        (width, -width)
    } else {
        (0.0, width)
    };
    let (y0, h) = if height < 0.0 {
        (height, -height)
    } else {
        (0.0, height)
    };
    let (x1, y1) = (x0 + w, y0 + h);

    let mut tl = radii.top_left;
    let mut tr = radii.top_right;
    let mut br = radii.bottom_right;
    let mut bl = radii.bottom_left;
    if tl.abs() + tr.abs() > w {
        tl = 0.0;
        tr = 0.0;
    }
    if bl.abs() + br.abs() > w {
        bl = 0.0;
        br = 0.0;
    }
    if tl.abs() + bl.abs() > h {
        tl = 0.0;
        bl = 0.0;
    }
    if tr.abs() + br.abs() > h {
        tr = 0.0;
        br = 0.0;
    }

    let mut path = BezPath::new();
    path.move_to((x0, y0 + tl.abs()));
    corner(&mut path, tl, Point::new(x0, y0), Point::new(x0 + tl, y0 + tl), PI, FRAC_PI_2);
    path.line_to((x1 - tr.abs(), y0));
    corner(&mut path, tr, Point::new(x1, y0), Point::new(x1 - tr, y0 + tr), 1.5 * PI, PI);
    path.line_to((x1, y1 - br.abs()));
    corner(&mut path, br, Point::new(x1, y1), Point::new(x1 - br, y1 - br), 0.0, -FRAC_PI_2);
    path.line_to((x0 + bl.abs(), y1));
    corner(&mut path, bl, Point::new(x0, y1), Point::new(x0 + bl, y1 - bl), FRAC_PI_2, 0.0);
    path.close_path();
    path
}

/// A rectangle wrapped in a [`ShapeDesc`], with the nominal size set.
pub fn rectangle_desc(width: f64, height: f64, radii: impl Into<CornerRadii>) -> ShapeDesc {
    let mut desc = ShapeDesc::new(rectangle(width, height, radii));
    desc.width = Some(width.abs());
    desc.height = Some(height.abs());
    desc
}

/// Append one rectangle corner in clockwise traversal order.
///
/// A convex corner (`radius > 0`) sweeps a quarter circle around
/// `convex_center`; a concave one sweeps the opposite way around the
/// rectangle `vertex` itself. `convex_start`/`concave_start` are the arc
/// start angles for the two cases.
fn corner(
    path: &mut BezPath,
    radius: f64,
    vertex: Point,
    convex_center: Point,
    convex_start: f64,
    concave_start: f64,
) {
    if radius > 0.0 {
        append_arc(path, convex_center, radius, convex_start, FRAC_PI_2);
    } else if radius < 0.0 {
        append_arc(path, vertex, -radius, concave_start, -FRAC_PI_2);
    }
}

/// An annular wedge centered at the origin.
///
/// Angles are in degrees, measured clockwise from twelve o'clock, matching
/// the usual pie-chart convention. `inner_radius` of zero gives a plain pie
/// slice. A sweep of 360 degrees or more degenerates to a full disc, or to
/// an annulus (outer ring, reverse-wound inner ring) when `inner_radius` is
/// positive.
pub fn wedge(outer_radius: f64, start_angle: f64, end_angle: f64, inner_radius: f64) -> BezPath {
    let start = clock_radians(start_angle);
    let sweep_deg = end_angle - start_angle;
    let mut path = BezPath::new();

    if sweep_deg.abs() >= 360.0 {
        path.move_to(point_at(outer_radius, start));
        append_arc(&mut path, Point::ORIGIN, outer_radius, start, TAU);
        path.close_path();
        if inner_radius > 0.0 {
            path.move_to(point_at(inner_radius, start));
            append_arc(&mut path, Point::ORIGIN, inner_radius, start, -TAU);
            path.close_path();
        }
        return path;
    }

    let sweep = sweep_deg.to_radians();
    path.move_to(point_at(outer_radius, start));
    append_arc(&mut path, Point::ORIGIN, outer_radius, start, sweep);
    if inner_radius > 0.0 {
        path.line_to(point_at(inner_radius, start + sweep));
        append_arc(&mut path, Point::ORIGIN, inner_radius, start + sweep, -sweep);
    } else {
        path.line_to(Point::ORIGIN);
    }
    path.close_path();
    path
}

/// A wedge wrapped in a [`ShapeDesc`].
pub fn wedge_desc(
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
) -> ShapeDesc {
    ShapeDesc::new(wedge(outer_radius, start_angle, end_angle, inner_radius))
}

/// Convert degrees-clockwise-from-twelve-o'clock to standard radians.
fn clock_radians(degrees: f64) -> f64 {
    (degrees - 90.0).to_radians()
}

fn point_at(radius: f64, angle: f64) -> Point {
    (Vec2::from_angle(angle) * radius).to_point()
}

fn append_arc(path: &mut BezPath, center: Point, radius: f64, start: f64, sweep: f64) {
    let arc = Arc::new(center, Vec2::new(radius, radius), start, sweep, 0.0);
    arc.to_cubic_beziers(TOLERANCE, |p1, p2, p| {
        path.curve_to(p1, p2, p);
    });
}
