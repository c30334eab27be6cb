// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// 2-D affine transform.
//
// The matrix is stored as the six coefficients
//
//     [ m00 m01 m02 ]
//     [ m10 m11 m12 ]
//     [  0   0   1  ]
//
// together with a cached classification of its structure, so that applying
// the transform to long coordinate runs skips the terms that are known to
// be zero or one.

use crate::error::{Error, Result};
use crate::geom::{Point, Real};

/// Structural classification of a transform, kept in sync with the
/// coefficients by every constructor and mutator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Identity,
    Translate,
    Scale,
    ScaleTranslate,
    General,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    m00: Real,
    m10: Real,
    m01: Real,
    m11: Real,
    m02: Real,
    m12: Real,
    kind: TransformKind,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Build from coefficients in column order: `m00, m10, m01, m11, m02, m12`.
    pub fn new(m00: Real, m10: Real, m01: Real, m11: Real, m02: Real, m12: Real) -> Self {
        let mut t = Transform { m00, m10, m01, m11, m02, m12, kind: TransformKind::General };
        t.update_kind();
        t
    }

    pub const fn identity() -> Self {
        Transform {
            m00: 1.0,
            m10: 0.0,
            m01: 0.0,
            m11: 1.0,
            m02: 0.0,
            m12: 0.0,
            kind: TransformKind::Identity,
        }
    }

    pub fn translate(tx: Real, ty: Real) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: Real, sy: Real) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn shear(shx: Real, shy: Real) -> Self {
        Self::new(1.0, shy, shx, 1.0, 0.0, 0.0)
    }

    /// Rotation by `theta` radians (positive turns +x toward +y). Quarter
    /// turns come out exact.
    pub fn rotate(theta: Real) -> Self {
        let (mut sin, mut cos) = theta.sin_cos();
        if sin == 1.0 || sin == -1.0 {
            cos = 0.0;
        } else if cos == 1.0 || cos == -1.0 {
            sin = 0.0;
        }
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// The six coefficients in constructor order.
    pub fn coefficients(&self) -> [Real; 6] {
        [self.m00, self.m10, self.m01, self.m11, self.m02, self.m12]
    }

    #[inline]
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.kind == TransformKind::Identity
    }

    pub fn determinant(&self) -> Real {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// `self = self * other`: `other` is applied to points first.
    pub fn concatenate(&mut self, other: &Transform) {
        let (a00, a01, a02) = (self.m00, self.m01, self.m02);
        let (a10, a11, a12) = (self.m10, self.m11, self.m12);
        self.m00 = a00 * other.m00 + a01 * other.m10;
        self.m01 = a00 * other.m01 + a01 * other.m11;
        self.m02 = a00 * other.m02 + a01 * other.m12 + a02;
        self.m10 = a10 * other.m00 + a11 * other.m10;
        self.m11 = a10 * other.m01 + a11 * other.m11;
        self.m12 = a10 * other.m02 + a11 * other.m12 + a12;
        self.update_kind();
    }

    /// Transform that applies `self` and then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        let mut t = *next;
        t.concatenate(self);
        t
    }

    pub fn invert(&self) -> Result<Transform> {
        let det = self.determinant();
        if det.abs() <= Real::MIN_POSITIVE || !det.is_finite() {
            return Err(Error::NonInvertible { det });
        }
        Ok(Transform::new(
            self.m11 / det,
            -self.m10 / det,
            -self.m01 / det,
            self.m00 / det,
            (self.m01 * self.m12 - self.m11 * self.m02) / det,
            (self.m10 * self.m02 - self.m00 * self.m12) / det,
        ))
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        match self.kind {
            TransformKind::Identity => p,
            TransformKind::Translate => Point::new(p.x + self.m02, p.y + self.m12),
            TransformKind::Scale => Point::new(p.x * self.m00, p.y * self.m11),
            TransformKind::ScaleTranslate => {
                Point::new(p.x * self.m00 + self.m02, p.y * self.m11 + self.m12)
            }
            TransformKind::General => Point::new(
                p.x * self.m00 + p.y * self.m01 + self.m02,
                p.x * self.m10 + p.y * self.m11 + self.m12,
            ),
        }
    }

    pub fn apply_in_place(&self, pts: &mut [Point]) {
        if self.kind == TransformKind::Identity {
            return;
        }
        for p in pts {
            *p = self.apply(*p);
        }
    }

    fn update_kind(&mut self) {
        let shear = self.m01 != 0.0 || self.m10 != 0.0;
        let scale = self.m00 != 1.0 || self.m11 != 1.0;
        let translate = self.m02 != 0.0 || self.m12 != 0.0;
        self.kind = match (shear, scale, translate) {
            (true, _, _) => TransformKind::General,
            (false, true, true) => TransformKind::ScaleTranslate,
            (false, true, false) => TransformKind::Scale,
            (false, false, true) => TransformKind::Translate,
            (false, false, false) => TransformKind::Identity,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kind_tracks_coefficients() {
        assert_eq!(Transform::identity().kind(), TransformKind::Identity);
        assert_eq!(Transform::translate(1.0, 0.0).kind(), TransformKind::Translate);
        assert_eq!(Transform::scale(2.0, 2.0).kind(), TransformKind::Scale);
        assert_eq!(Transform::rotate(0.3).kind(), TransformKind::General);

        let mut t = Transform::scale(2.0, 3.0);
        t.concatenate(&Transform::translate(1.0, 1.0));
        assert_eq!(t.kind(), TransformKind::ScaleTranslate);
        assert_eq!(t.apply(Point::new(0.0, 0.0)), Point::new(2.0, 3.0));
    }

    #[test]
    fn quarter_turn_is_exact() {
        let t = Transform::rotate(std::f64::consts::FRAC_PI_2);
        assert_eq!(t.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn then_applies_in_order() {
        let t = Transform::translate(1.0, 0.0).then(&Transform::scale(2.0, 2.0));
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(4.0, 2.0));
    }

    #[test]
    fn invert_round_trips() {
        let t = Transform::new(2.0, 0.5, -1.0, 3.0, 4.0, -2.0);
        let inv = t.invert().unwrap();
        let p = Point::new(0.25, -7.5);
        let q = inv.apply(t.apply(p));
        assert_relative_eq!(q.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-12);
    }

    #[test]
    fn singular_transform_does_not_invert() {
        let t = Transform::scale(0.0, 1.0);
        assert_eq!(t.invert(), Err(Error::NonInvertible { det: 0.0 }));
    }
}
