// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of descriptor transform inputs into one affine matrix.

use kurbo::{Affine, Point};

use crate::descriptor::NodeProps;

/// Compose a node's transform inputs into a single affine matrix.
///
/// The inputs combine in a fixed order: translate by `(x, y)`, rotate by
/// `rotation` degrees about the origin point, scale by `(scale_x, scale_y)`
/// about the same origin point, and finally compose the explicit `transform`
/// matrix innermost (it applies to local coordinates first). `scale_x` and
/// `scale_y` fall back to the uniform `scale`, then to `1.0`; the origin
/// defaults to `(0, 0)`.
///
/// This is a pure function of the props. The reconciler compares the six
/// coefficients of the result against the coefficients it last wrote for the
/// node and only issues a backend transform when they differ, using exact
/// `f64` equality — the composition is deterministic, so an unchanged set of
/// inputs reproduces bit-identical coefficients.
pub fn compose_transform(props: &NodeProps) -> Affine {
    let scale_x = props.scale_x.or(props.scale).unwrap_or(1.0);
    let scale_y = props.scale_y.or(props.scale).unwrap_or(1.0);
    let origin = Point::new(
        props.origin_x.unwrap_or(0.0),
        props.origin_y.unwrap_or(0.0),
    );

    let mut transform = Affine::translate((props.x, props.y))
        * Affine::rotate_about(props.rotation.to_radians(), origin)
        * Affine::translate(origin.to_vec2())
        * Affine::scale_non_uniform(scale_x, scale_y)
        * Affine::translate(-origin.to_vec2());

    if let Some(explicit) = props.transform {
        transform *= explicit;
    }
    transform
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coeffs_close(a: Affine, b: Affine) {
        let (a, b) = (a.as_coeffs(), b.as_coeffs());
        for i in 0..6 {
            assert!(
                (a[i] - b[i]).abs() < 1e-12,
                "coefficient {i} differs: {a:?} vs {b:?}"
            );
        }
    }

    #[test]
    fn defaults_compose_to_identity() {
        assert_eq!(
            compose_transform(&NodeProps::default()).as_coeffs(),
            Affine::IDENTITY.as_coeffs()
        );
    }

    #[test]
    fn translation_only() {
        let props = NodeProps::at(10.0, -3.5);
        assert_eq!(
            compose_transform(&props).as_coeffs(),
            Affine::translate((10.0, -3.5)).as_coeffs()
        );
    }

    #[test]
    fn uniform_scale_fallback_applies_to_both_axes() {
        let props = NodeProps {
            scale: Some(2.0),
            ..NodeProps::default()
        };
        assert_coeffs_close(
            compose_transform(&props),
            Affine::scale_non_uniform(2.0, 2.0),
        );

        let props = NodeProps {
            scale: Some(2.0),
            scale_x: Some(0.5),
            ..NodeProps::default()
        };
        assert_coeffs_close(
            compose_transform(&props),
            Affine::scale_non_uniform(0.5, 2.0),
        );
    }

    #[test]
    fn rotation_is_in_degrees_about_the_origin_point() {
        let props = NodeProps {
            rotation: 90.0,
            origin_x: Some(5.0),
            origin_y: Some(5.0),
            ..NodeProps::default()
        };
        assert_coeffs_close(
            compose_transform(&props),
            Affine::rotate_about(core::f64::consts::FRAC_PI_2, Point::new(5.0, 5.0)),
        );
    }

    #[test]
    fn explicit_matrix_applies_in_local_coordinates_first() {
        let explicit = Affine::scale_non_uniform(3.0, 1.0);
        let props = NodeProps {
            x: 10.0,
            y: 0.0,
            transform: Some(explicit),
            ..NodeProps::default()
        };
        assert_coeffs_close(
            compose_transform(&props),
            Affine::translate((10.0, 0.0)) * explicit,
        );
    }

    #[test]
    fn same_inputs_reproduce_identical_coefficients() {
        let props = NodeProps {
            x: 1.5,
            y: 2.5,
            rotation: 33.0,
            scale: Some(1.25),
            origin_x: Some(4.0),
            origin_y: Some(-1.0),
            ..NodeProps::default()
        };
        assert_eq!(
            compose_transform(&props).as_coeffs(),
            compose_transform(&props).as_coeffs(),
            "composition must be deterministic for the diff guard to hold"
        );
    }
}
