//! Value <-> pixel projection for one Y axis.
//!
//! Three matrices compose every projection, always in this order:
//!
//! 1. `matrix_value_to_px` maps raw data values into the scaled content space,
//! 2. the viewport touch matrix applies the current zoom and pan,
//! 3. `matrix_offset` moves the result into chart pixel space (content offsets,
//!    optional inversion).
//!
//! The inverse projection applies the inverses in reverse order. Nothing here
//! guards against a singular matrix: a zero axis range produces NaN/Inf
//! coordinates and the viewport predicates reject them downstream.

use crate::geometry::{concat, scaled_by, translated_by, Rect};
use crate::viewport::ViewPortHandler;
use glam::{DAffine2, DVec2};
use rayon::prelude::*;

/// Batches at least this large are transformed in parallel.
const PARALLEL_BATCH: usize = 16_384;

#[derive(Clone, Debug)]
pub struct Transformer {
    matrix_value_to_px: DAffine2,
    matrix_offset: DAffine2,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self {
            matrix_value_to_px: DAffine2::IDENTITY,
            matrix_offset: DAffine2::IDENTITY,
        }
    }

    /// Prepares the value matrix from the chart's x/y extent and content size.
    pub fn prepare_matrix_value_px(
        &mut self,
        viewport: &ViewPortHandler,
        chart_x_min: f64,
        delta_x: f64,
        delta_y: f64,
        chart_y_min: f64,
    ) {
        let mut scale_x = viewport.content_width() / delta_x;
        let mut scale_y = viewport.content_height() / delta_y;
        if scale_x.is_infinite() {
            scale_x = 0.0;
        }
        if scale_y.is_infinite() {
            scale_y = 0.0;
        }

        let matrix = scaled_by(DAffine2::IDENTITY, scale_x, -scale_y);
        self.matrix_value_to_px = translated_by(matrix, -chart_x_min, -chart_y_min);
    }

    /// Prepares the matrix holding the content offsets.
    pub fn prepare_matrix_offset(&mut self, viewport: &ViewPortHandler, inverted: bool) {
        self.matrix_offset = if !inverted {
            DAffine2::from_translation(DVec2::new(
                viewport.offset_left(),
                viewport.chart_height() - viewport.offset_bottom(),
            ))
        } else {
            translated_by(
                DAffine2::from_scale(DVec2::new(1.0, -1.0)),
                viewport.offset_left(),
                -viewport.offset_top(),
            )
        };
    }

    pub fn matrix_value_to_px(&self) -> DAffine2 {
        self.matrix_value_to_px
    }

    pub fn matrix_offset(&self) -> DAffine2 {
        self.matrix_offset
    }

    pub fn value_to_pixel_matrix(&self, viewport: &ViewPortHandler) -> DAffine2 {
        concat(
            concat(self.matrix_value_to_px, viewport.touch_matrix()),
            self.matrix_offset,
        )
    }

    pub fn pixel_to_value_matrix(&self, viewport: &ViewPortHandler) -> DAffine2 {
        self.value_to_pixel_matrix(viewport).inverse()
    }

    pub fn point_value_to_pixel(&self, viewport: &ViewPortHandler, point: &mut DVec2) {
        *point = self.value_to_pixel_matrix(viewport).transform_point2(*point);
    }

    /// Transforms every point in place with a single composed matrix.
    pub fn point_values_to_pixel(&self, viewport: &ViewPortHandler, points: &mut [DVec2]) {
        let matrix = self.value_to_pixel_matrix(viewport);
        apply_to_points(&matrix, points);
    }

    pub fn pixel_for_values(&self, viewport: &ViewPortHandler, x: f64, y: f64) -> DVec2 {
        self.value_to_pixel_matrix(viewport)
            .transform_point2(DVec2::new(x, y))
    }

    /// Transforms the two defining corners of `rect` independently.
    pub fn rect_value_to_pixel(&self, viewport: &ViewPortHandler, rect: &mut Rect) {
        let matrix = self.value_to_pixel_matrix(viewport);
        *rect = transform_rect(&matrix, rect);
    }

    /// Like [`Transformer::rect_value_to_pixel`], with the vertical extent
    /// scaled by the y animation phase first.
    pub fn rect_value_to_pixel_with_phase(
        &self,
        viewport: &ViewPortHandler,
        rect: &mut Rect,
        phase_y: f64,
    ) {
        let bottom = (rect.y + rect.height) * phase_y;
        let top = rect.y * phase_y;
        rect.height = bottom - top;
        rect.y = top;
        self.rect_value_to_pixel(viewport, rect);
    }

    pub fn rect_value_to_pixel_horizontal(&self, viewport: &ViewPortHandler, rect: &mut Rect) {
        self.rect_value_to_pixel(viewport, rect);
    }

    /// Horizontal variant: the phase scales the horizontal extent.
    pub fn rect_value_to_pixel_horizontal_with_phase(
        &self,
        viewport: &ViewPortHandler,
        rect: &mut Rect,
        phase_y: f64,
    ) {
        let left = rect.x * phase_y;
        let right = (rect.x + rect.width) * phase_y;
        rect.width = right - left;
        rect.x = left;
        self.rect_value_to_pixel(viewport, rect);
    }

    pub fn rect_values_to_pixel(&self, viewport: &ViewPortHandler, rects: &mut [Rect]) {
        let matrix = self.value_to_pixel_matrix(viewport);
        for rect in rects.iter_mut() {
            *rect = transform_rect(&matrix, rect);
        }
    }

    pub fn pixels_to_values(&self, viewport: &ViewPortHandler, pixels: &mut [DVec2]) {
        let matrix = self.pixel_to_value_matrix(viewport);
        apply_to_points(&matrix, pixels);
    }

    pub fn pixel_to_values(&self, viewport: &ViewPortHandler, pixel: &mut DVec2) {
        *pixel = self.pixel_to_value_matrix(viewport).transform_point2(*pixel);
    }

    /// Data values under a touch position given in pixels.
    pub fn value_for_touch_point(&self, viewport: &ViewPortHandler, point: DVec2) -> DVec2 {
        self.pixel_to_value_matrix(viewport).transform_point2(point)
    }
}

fn apply_to_points(matrix: &DAffine2, points: &mut [DVec2]) {
    if points.len() >= PARALLEL_BATCH {
        points
            .par_iter_mut()
            .for_each(|p| *p = matrix.transform_point2(*p));
    } else {
        for p in points.iter_mut() {
            *p = matrix.transform_point2(*p);
        }
    }
}

/// Maps both defining corners of `rect` through `matrix`.
pub fn transform_rect(matrix: &DAffine2, rect: &Rect) -> Rect {
    let a = matrix.transform_point2(rect.origin());
    let b = matrix.transform_point2(rect.far_corner());
    Rect::from_corners(a, b)
}
