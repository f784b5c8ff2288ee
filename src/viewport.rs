//! Zoom/pan matrix, content rectangle and visibility predicates.

use crate::geometry::{concat, scale_x_of, scale_y_of, scaled_by, translated_by, with_scale, Rect};
use glam::{DAffine2, DVec2};
use tracing::trace;

/// Tolerance (in pixels) applied by the horizontal bounds checks.
pub const BOUNDS_TOLERANCE_X: f64 = 1.0;

/// Receives redraw requests when the viewport matrix changes.
pub trait ChartInvalidator {
    fn invalidate(&mut self);
}

/// Holds the current zoom/pan state and the area values can be drawn in.
#[derive(Clone, Debug)]
pub struct ViewPortHandler {
    touch_matrix: DAffine2,
    content_rect: Rect,
    chart_width: f64,
    chart_height: f64,
    min_scale_x: f64,
    max_scale_x: f64,
    min_scale_y: f64,
    max_scale_y: f64,
    scale_x: f64,
    scale_y: f64,
    trans_x: f64,
    trans_y: f64,
    drag_offset_x: f64,
    drag_offset_y: f64,
}

impl Default for ViewPortHandler {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ViewPortHandler {
    pub fn new(width: f64, height: f64) -> Self {
        let mut handler = Self {
            touch_matrix: DAffine2::IDENTITY,
            content_rect: Rect::ZERO,
            chart_width: 0.0,
            chart_height: 0.0,
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
            scale_x: 1.0,
            scale_y: 1.0,
            trans_x: 0.0,
            trans_y: 0.0,
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
        };
        handler.set_chart_dimensions(width, height);
        handler
    }

    /// Resizes the chart while keeping the current offsets.
    pub fn set_chart_dimensions(&mut self, width: f64, height: f64) {
        let (left, top, right, bottom) = (
            self.offset_left(),
            self.offset_top(),
            self.offset_right(),
            self.offset_bottom(),
        );
        self.chart_width = width;
        self.chart_height = height;
        self.restrain_view_port(left, top, right, bottom);
    }

    pub fn has_chart_dimensions(&self) -> bool {
        self.chart_width > 0.0 && self.chart_height > 0.0
    }

    pub fn restrain_view_port(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.content_rect = Rect::new(
            left,
            top,
            self.chart_width - left - right,
            self.chart_height - bottom - top,
        );
    }

    pub fn offset_left(&self) -> f64 {
        self.content_rect.x
    }

    pub fn offset_right(&self) -> f64 {
        self.chart_width - self.content_rect.width - self.content_rect.x
    }

    pub fn offset_top(&self) -> f64 {
        self.content_rect.y
    }

    pub fn offset_bottom(&self) -> f64 {
        self.chart_height - self.content_rect.height - self.content_rect.y
    }

    pub fn content_left(&self) -> f64 {
        self.content_rect.x
    }

    pub fn content_right(&self) -> f64 {
        self.content_rect.x + self.content_rect.width
    }

    pub fn content_top(&self) -> f64 {
        self.content_rect.y
    }

    pub fn content_bottom(&self) -> f64 {
        self.content_rect.y + self.content_rect.height
    }

    pub fn content_width(&self) -> f64 {
        self.content_rect.width
    }

    pub fn content_height(&self) -> f64 {
        self.content_rect.height
    }

    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    pub fn content_center(&self) -> DVec2 {
        self.content_rect.center()
    }

    pub fn chart_width(&self) -> f64 {
        self.chart_width
    }

    pub fn chart_height(&self) -> f64 {
        self.chart_height
    }

    pub fn touch_matrix(&self) -> DAffine2 {
        self.touch_matrix
    }

    // Scaling / panning. None of these mutate state, the caller applies the
    // returned matrix through `refresh`.

    pub fn zoom(&self, scale_x: f64, scale_y: f64) -> DAffine2 {
        scaled_by(self.touch_matrix, scale_x, scale_y)
    }

    /// Zooms around the given pixel position.
    pub fn zoom_at(&self, scale_x: f64, scale_y: f64, x: f64, y: f64) -> DAffine2 {
        let matrix = translated_by(self.touch_matrix, x, y);
        let matrix = scaled_by(matrix, scale_x, scale_y);
        translated_by(matrix, -x, -y)
    }

    pub fn zoom_in(&self, x: f64, y: f64) -> DAffine2 {
        self.zoom_at(1.4, 1.4, x, y)
    }

    pub fn zoom_out(&self, x: f64, y: f64) -> DAffine2 {
        self.zoom_at(0.7, 0.7, x, y)
    }

    pub fn reset_zoom(&self) -> DAffine2 {
        self.zoom_at(1.0, 1.0, 0.0, 0.0)
    }

    /// Matrix with the scale factors replaced, translation untouched.
    pub fn set_zoom(&self, scale_x: f64, scale_y: f64) -> DAffine2 {
        with_scale(self.touch_matrix, scale_x, scale_y)
    }

    /// Sets the scale factors around a pivot.
    pub fn set_zoom_at(&self, scale_x: f64, scale_y: f64, x: f64, y: f64) -> DAffine2 {
        let matrix = with_scale(self.touch_matrix, 1.0, 1.0);
        let matrix = translated_by(matrix, x, y);
        let matrix = scaled_by(matrix, scale_x, scale_y);
        translated_by(matrix, -x, -y)
    }

    /// Resets zoom and pan and the minimum scales.
    pub fn fit_screen(&mut self) -> DAffine2 {
        self.min_scale_x = 1.0;
        self.min_scale_y = 1.0;
        DAffine2::IDENTITY
    }

    /// Pan matrix that brings `point` to the top-left of the content rect.
    pub fn translate(&self, point: DVec2) -> DAffine2 {
        let translate_x = point.x - self.offset_left();
        let translate_y = point.y - self.offset_top();
        concat(
            self.touch_matrix,
            DAffine2::from_translation(DVec2::new(-translate_x, -translate_y)),
        )
    }

    /// Moves the viewport so that `point` sits at the content origin.
    pub fn center_view_port(&mut self, point: DVec2, chart: &mut dyn ChartInvalidator) {
        let matrix = self.translate(point);
        self.refresh(matrix, chart, true);
    }

    /// Applies `new_matrix`, clamped to the scale and translation limits, and
    /// returns the matrix actually in effect.
    pub fn refresh(
        &mut self,
        new_matrix: DAffine2,
        chart: &mut dyn ChartInvalidator,
        invalidate: bool,
    ) -> DAffine2 {
        self.touch_matrix = self.limit_trans_and_scale(new_matrix);
        if invalidate {
            chart.invalidate();
        }
        self.touch_matrix
    }

    fn limit_trans_and_scale(&mut self, matrix: DAffine2) -> DAffine2 {
        self.scale_x = scale_x_of(&matrix).max(self.min_scale_x).min(self.max_scale_x);
        self.scale_y = scale_y_of(&matrix).max(self.min_scale_y).min(self.max_scale_y);

        let width = self.content_rect.width;
        let height = self.content_rect.height;

        let max_trans_x = -width * (self.scale_x - 1.0);
        self.trans_x = matrix
            .translation
            .x
            .max(max_trans_x - self.drag_offset_x)
            .min(self.drag_offset_x);

        let max_trans_y = height * (self.scale_y - 1.0);
        self.trans_y = matrix
            .translation
            .y
            .min(max_trans_y + self.drag_offset_y)
            .max(-self.drag_offset_y);

        let mut limited = with_scale(matrix, self.scale_x, self.scale_y);
        limited.translation = DVec2::new(self.trans_x, self.trans_y);
        if limited != matrix {
            trace!(
                scale_x = self.scale_x,
                scale_y = self.scale_y,
                trans_x = self.trans_x,
                trans_y = self.trans_y,
                "viewport matrix clamped"
            );
        }
        limited
    }

    fn reapply_limits(&mut self) {
        self.touch_matrix = self.limit_trans_and_scale(self.touch_matrix);
    }

    pub fn set_minimum_scale_x(&mut self, scale: f64) {
        self.min_scale_x = scale.max(1.0);
        self.reapply_limits();
    }

    pub fn set_maximum_scale_x(&mut self, scale: f64) {
        self.max_scale_x = if scale == 0.0 { f64::MAX } else { scale };
        self.reapply_limits();
    }

    pub fn set_min_max_scale_x(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale_x = min_scale.max(1.0);
        self.max_scale_x = if max_scale == 0.0 { f64::MAX } else { max_scale };
        self.reapply_limits();
    }

    pub fn set_minimum_scale_y(&mut self, scale: f64) {
        self.min_scale_y = scale.max(1.0);
        self.reapply_limits();
    }

    pub fn set_maximum_scale_y(&mut self, scale: f64) {
        self.max_scale_y = if scale == 0.0 { f64::MAX } else { scale };
        self.reapply_limits();
    }

    pub fn set_min_max_scale_y(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale_y = min_scale.max(1.0);
        self.max_scale_y = if max_scale == 0.0 { f64::MAX } else { max_scale };
        self.reapply_limits();
    }

    // Boundaries

    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    pub fn is_in_bounds(&self, x: f64, y: f64) -> bool {
        self.is_in_bounds_x(x) && self.is_in_bounds_y(y)
    }

    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content_rect.x <= x + BOUNDS_TOLERANCE_X
    }

    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        let x = (x * 100.0).floor() / 100.0;
        self.content_right() >= x - BOUNDS_TOLERANCE_X
    }

    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content_rect.y <= y
    }

    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        let y = (y * 100.0).floor() / 100.0;
        self.content_bottom() >= y
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn min_scale_x(&self) -> f64 {
        self.min_scale_x
    }

    pub fn max_scale_x(&self) -> f64 {
        self.max_scale_x
    }

    pub fn min_scale_y(&self) -> f64 {
        self.min_scale_y
    }

    pub fn max_scale_y(&self) -> f64 {
        self.max_scale_y
    }

    pub fn trans_x(&self) -> f64 {
        self.trans_x
    }

    pub fn trans_y(&self) -> f64 {
        self.trans_y
    }

    pub fn is_fully_zoomed_out(&self) -> bool {
        self.is_fully_zoomed_out_x() && self.is_fully_zoomed_out_y()
    }

    pub fn is_fully_zoomed_out_x(&self) -> bool {
        !(self.scale_x > self.min_scale_x || self.min_scale_x > 1.0)
    }

    pub fn is_fully_zoomed_out_y(&self) -> bool {
        !(self.scale_y > self.min_scale_y || self.min_scale_y > 1.0)
    }

    /// Pixels the chart may be dragged past its left/right bounds.
    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.drag_offset_x = offset;
    }

    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.drag_offset_y = offset;
    }

    pub fn has_no_drag_offset(&self) -> bool {
        self.drag_offset_x <= 0.0 && self.drag_offset_y <= 0.0
    }

    pub fn can_zoom_out_more_x(&self) -> bool {
        self.scale_x > self.min_scale_x
    }

    pub fn can_zoom_in_more_x(&self) -> bool {
        self.scale_x < self.max_scale_x
    }

    pub fn can_zoom_out_more_y(&self) -> bool {
        self.scale_y > self.min_scale_y
    }

    pub fn can_zoom_in_more_y(&self) -> bool {
        self.scale_y < self.max_scale_y
    }
}
