//! Points, rectangles and affine helpers shared by the transform pipeline.

use glam::{DAffine2, DMat2, DVec2};

/// Axis-aligned rectangle in either value or pixel space.
///
/// Width and height are allowed to be negative after a transform that flips
/// an axis; [`Rect::standardized`] restores a positive extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanned by two opposite corners, keeping the
    /// orientation of `a -> b` (no reordering).
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            x: a.x,
            y: a.y,
            width: b.x - a.x,
            height: b.y - a.y,
        }
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn far_corner(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same area with non-negative width and height.
    pub fn standardized(&self) -> Self {
        Self {
            x: self.left(),
            y: self.top(),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Matrix applying `first`, then `then`.
pub fn concat(first: DAffine2, then: DAffine2) -> DAffine2 {
    then * first
}

/// `matrix` preceded by a scale: points are scaled first, then `matrix` applies.
pub fn scaled_by(matrix: DAffine2, sx: f64, sy: f64) -> DAffine2 {
    matrix * DAffine2::from_scale(DVec2::new(sx, sy))
}

/// `matrix` preceded by a translation.
pub fn translated_by(matrix: DAffine2, tx: f64, ty: f64) -> DAffine2 {
    matrix * DAffine2::from_translation(DVec2::new(tx, ty))
}

/// Horizontal scale coefficient (`a`).
pub fn scale_x_of(matrix: &DAffine2) -> f64 {
    matrix.matrix2.x_axis.x
}

/// Vertical scale coefficient (`d`).
pub fn scale_y_of(matrix: &DAffine2) -> f64 {
    matrix.matrix2.y_axis.y
}

/// Returns a copy with the diagonal scale coefficients replaced.
pub fn with_scale(matrix: DAffine2, sx: f64, sy: f64) -> DAffine2 {
    let m = matrix.matrix2;
    DAffine2::from_mat2_translation(
        DMat2::from_cols(DVec2::new(sx, m.x_axis.y), DVec2::new(m.y_axis.x, sy)),
        matrix.translation,
    )
}

/// Appends `steps` points sampled along the cubic Bezier `p0 c1 c2 p3`,
/// ending exactly at `p3`. `p0` itself is not pushed.
pub fn flatten_cubic(p0: DVec2, c1: DVec2, c2: DVec2, p3: DVec2, steps: usize, out: &mut Vec<DVec2>) {
    let steps = steps.max(1);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let u = 1.0 - t;
        out.push(p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t));
    }
    out.push(p3);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_then_translate_order() {
        let m = translated_by(scaled_by(DAffine2::IDENTITY, 2.0, 3.0), 1.0, 1.0);
        // translation applies first, then the scale
        let p = m.transform_point2(DVec2::new(0.0, 0.0));
        assert_eq!(p, DVec2::new(2.0, 3.0));
    }

    #[test]
    fn standardized_flips_negative_extent() {
        let r = Rect::new(10.0, 10.0, -4.0, -6.0).standardized();
        assert_eq!(r, Rect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn flattened_cubic_ends_on_its_anchor() {
        let mut out = Vec::new();
        let (p0, p3) = (DVec2::ZERO, DVec2::new(4.0, 0.0));
        flatten_cubic(p0, DVec2::new(1.0, 2.0), DVec2::new(3.0, 2.0), p3, 4, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(out[3], p3);
        // symmetric controls put the midpoint on the axis of symmetry
        assert!((out[1].x - 2.0).abs() < 1e-12);
        assert!((out[1].y - 1.5).abs() < 1e-12);
    }
}
