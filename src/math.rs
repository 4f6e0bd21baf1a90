//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};
use num_traits::Float;

use crate::color::{Component, Components};

pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a transform for a 3x3 matrix laid out for row vectors, i.e. each
/// group of three values is a column of the conventional matrix.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Components(x, y, z) = components;
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(x, y, z));
    Components(x, y, z)
}

pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

pub fn almost_zero(value: Component) -> bool {
    value.abs() < Component::EPSILON
}

/// Wrap a hue in degrees into [0..360).
pub fn normalize_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn identity_transform() {
        const IDENTITY: Transform = transform_3x3(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let c = transform(&IDENTITY, Components(0.1, 0.2, 0.3));
        assert_component_eq!(c.0, 0.1);
        assert_component_eq!(c.1, 0.2);
        assert_component_eq!(c.2, 0.3);
    }

    #[test]
    fn columns_are_rows_of_the_matrix() {
        const M: Transform = transform_3x3(1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let c = transform(&M, Components(1.0, 1.0, 0.0));
        assert_component_eq!(c.0, 3.0);
        assert_component_eq!(c.1, 1.0);
        assert_component_eq!(c.2, 0.0);
    }

    #[test]
    fn hue_wraps() {
        assert_component_eq!(normalize_hue(-30.0), 330.0);
        assert_component_eq!(normalize_hue(400.0), 40.0);
        assert_component_eq!(lerp(10.0 as Component, 20.0, 0.25), 12.5);
    }
}
