//! Bar/line chart model.
//!
//! `BarLineChart` owns the viewport, the transformers of both Y axes, the
//! axes, the data and the renderer state, and runs the draw pipeline against
//! any [`Canvas`]. It has no UI runtime of its own: the host forwards sizes,
//! gestures and frame ticks, and repaints when [`BarLineChart::take_redraw`]
//! reports a pending invalidation.

use crate::animation::{AnimationTick, Animator};
use crate::axis_renderer::{AxisOrientation, AxisRenderer};
use crate::bounds::VisibleXRange;
use crate::config::{AnimationConfig, ChartConfig, InteractionConfig, LayoutConfig};
use crate::data_types::{
    AxisDependency, ChartData, Highlight, XAxis, XAxisPosition, YAxis,
};
use crate::geometry::{concat, Rect};
use crate::highlighter::{ChartHighlighter, HighlightSource};
use crate::legend::{Legend, LegendRenderer};
use crate::plot_types::{DataRenderer, RenderContext};
use crate::rendering::{estimate_text_width, Canvas};
use crate::theme::ChartTheme;
use crate::transformer::Transformer;
use crate::utils::PixelsExt;
use crate::viewport::{ChartInvalidator, ViewPortHandler};
use glam::{DAffine2, DVec2};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct RedrawFlag {
    pending: bool,
}

impl ChartInvalidator for RedrawFlag {
    fn invalidate(&mut self) {
        self.pending = true;
    }
}

pub struct BarLineChart {
    viewport: ViewPortHandler,
    left_transformer: Transformer,
    right_transformer: Transformer,
    pub x_axis: XAxis,
    pub left_axis: YAxis,
    pub right_axis: YAxis,
    data: ChartData,
    animator: Animator,
    renderer: DataRenderer,
    highlighter: ChartHighlighter,
    highlights: Vec<Highlight>,
    pub legend: Legend,
    pub theme: ChartTheme,
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
    pub animation: AnimationConfig,
    redraw: RedrawFlag,
}

impl Default for BarLineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl BarLineChart {
    pub fn new() -> Self {
        Self {
            viewport: ViewPortHandler::default(),
            left_transformer: Transformer::new(),
            right_transformer: Transformer::new(),
            x_axis: XAxis::default(),
            left_axis: YAxis::new(AxisDependency::Left),
            right_axis: YAxis::new(AxisDependency::Right),
            data: ChartData::default(),
            animator: Animator::new(),
            renderer: DataRenderer::new(),
            highlighter: ChartHighlighter::default(),
            highlights: Vec::new(),
            legend: Legend::default(),
            theme: ChartTheme::default(),
            layout: LayoutConfig::default(),
            interaction: InteractionConfig::default(),
            animation: AnimationConfig::default(),
            redraw: RedrawFlag::default(),
        }
    }

    pub fn with_config(config: &ChartConfig) -> Self {
        let mut chart = Self::new();
        chart.apply_config(config);
        chart
    }

    pub fn apply_config(&mut self, config: &ChartConfig) {
        let limits = &config.viewport;
        self.viewport
            .set_min_max_scale_x(limits.min_scale_x, limits.max_scale_x);
        self.viewport
            .set_min_max_scale_y(limits.min_scale_y, limits.max_scale_y);
        self.viewport.set_drag_offset_x(limits.drag_offset_x);
        self.viewport.set_drag_offset_y(limits.drag_offset_y);

        self.interaction = config.interaction.clone();
        self.highlighter.max_highlight_distance = config.interaction.max_highlight_distance;
        self.layout = config.layout.clone();
        self.data.bar_width = config.layout.bar_width;
        self.animation = config.animation.clone();
        self.legend.config = config.legend.clone();

        self.notify_data_set_changed();
    }

    // Accessors

    pub fn viewport(&self) -> &ViewPortHandler {
        &self.viewport
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Mutable data access; call [`BarLineChart::notify_data_set_changed`]
    /// after editing.
    pub fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    pub fn transformer(&self, axis: AxisDependency) -> &Transformer {
        match axis {
            AxisDependency::Left => &self.left_transformer,
            AxisDependency::Right => &self.right_transformer,
        }
    }

    pub fn y_axis(&self, axis: AxisDependency) -> &YAxis {
        match axis {
            AxisDependency::Left => &self.left_axis,
            AxisDependency::Right => &self.right_axis,
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn highlighter(&self) -> &ChartHighlighter {
        &self.highlighter
    }

    // Redraw bookkeeping

    pub fn invalidate(&mut self) {
        self.redraw.invalidate();
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.pending
    }

    /// Returns whether a redraw was requested and clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw.pending)
    }

    // Layout

    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        debug!(width, height, "chart dimensions changed");
        self.viewport.set_chart_dimensions(width, height);
        self.calculate_offsets();
        let matrix = self.viewport.touch_matrix();
        self.viewport.refresh(matrix, &mut self.redraw, true);
    }

    pub fn set_data(&mut self, data: ChartData) {
        debug!(
            data_sets = data.data_set_count(),
            entries = data.entry_count(),
            "chart data replaced"
        );
        self.data = data;
        self.highlights.clear();
        self.notify_data_set_changed();
    }

    pub fn clear(&mut self) {
        self.set_data(ChartData::default());
    }

    /// Recomputes extents, axis values and offsets after the data changed.
    pub fn notify_data_set_changed(&mut self) {
        self.data.calc_min_max();
        self.calc_min_max();
        self.compute_axes();
        self.legend.compute(&self.data, &self.viewport);
        self.calculate_offsets();
        self.redraw.invalidate();
    }

    fn calc_min_max(&mut self) {
        let data = &self.data;
        if data.is_empty() {
            self.x_axis.calculate(0.0, 0.0);
            self.left_axis.calculate(0.0, 0.0);
            self.right_axis.calculate(0.0, 0.0);
            return;
        }

        let (mut x_min, mut x_max) = (data.x_min(), data.x_max());
        if data.has_bars() {
            let half = data.bar_width / 2.0;
            x_min -= half;
            x_max += half;
        }
        self.x_axis.calculate(x_min, x_max);
        self.left_axis.calculate(
            data.y_min(AxisDependency::Left),
            data.y_max(AxisDependency::Left),
        );
        self.right_axis.calculate(
            data.y_min(AxisDependency::Right),
            data.y_max(AxisDependency::Right),
        );
    }

    fn compute_axes(&mut self) {
        for axis in [AxisDependency::Left, AxisDependency::Right] {
            let (y_axis, transformer) = match axis {
                AxisDependency::Left => (&mut self.left_axis, &self.left_transformer),
                AxisDependency::Right => (&mut self.right_axis, &self.right_transformer),
            };
            if !y_axis.base.enabled {
                continue;
            }
            let (min, max) = (y_axis.base.axis_minimum, y_axis.base.axis_maximum);
            let (inverted, variant) = (y_axis.inverted, y_axis.base.interval_variant);
            AxisRenderer::compute_axis(
                &mut y_axis.base,
                &self.viewport,
                transformer,
                min,
                max,
                inverted,
                AxisOrientation::Vertical,
                variant,
            );
        }

        if self.x_axis.base.enabled {
            let (min, max) = (self.x_axis.base.axis_minimum, self.x_axis.base.axis_maximum);
            let variant = self.x_axis.base.interval_variant;
            AxisRenderer::compute_axis(
                &mut self.x_axis.base,
                &self.viewport,
                &self.left_transformer,
                min,
                max,
                false,
                AxisOrientation::Horizontal,
                variant,
            );
        }
    }

    /// Lays out the content rect from the axis label sizes and prepares both
    /// transformers for it.
    pub fn calculate_offsets(&mut self) {
        let font_size = self.theme.axis_label_size.as_f32();
        let gap = self.theme.label_offset.as_f64();

        let y_axis_width = |axis: &YAxis| {
            if axis.base.enabled && axis.base.draw_labels {
                estimate_text_width(&axis.base.longest_label(), font_size) + gap * 2.0
            } else {
                0.0
            }
        };
        let mut left = y_axis_width(&self.left_axis);
        let mut right = y_axis_width(&self.right_axis);
        let mut top = 0.0;
        let mut bottom = 0.0;

        let x_labels = self.x_axis.base.enabled && self.x_axis.base.draw_labels;
        let label_height = if x_labels { font_size as f64 + gap } else { 0.0 };
        if x_labels {
            match self.x_axis.position {
                XAxisPosition::Bottom => bottom += label_height,
                XAxisPosition::Top => top += label_height,
                XAxisPosition::BothSided => {
                    bottom += label_height;
                    top += label_height;
                }
            }
        }

        if self.legend.config.enabled {
            self.legend.calculate_dimensions(&self.viewport);
        }
        let legend = self.legend.offsets(&self.viewport, label_height);
        left += legend.left;
        top += legend.top;
        right += legend.right;
        bottom += legend.bottom;

        left += self.layout.extra_left_offset;
        top += self.layout.extra_top_offset;
        right += self.layout.extra_right_offset;
        bottom += self.layout.extra_bottom_offset;

        let min_offset = self.layout.min_offset;
        self.viewport.restrain_view_port(
            left.max(min_offset),
            top.max(min_offset),
            right.max(min_offset),
            bottom.max(min_offset),
        );
        trace!(
            left = self.viewport.offset_left(),
            top = self.viewport.offset_top(),
            right = self.viewport.offset_right(),
            bottom = self.viewport.offset_bottom(),
            "content offsets"
        );

        self.prepare_offset_matrix();
        self.prepare_value_px_matrix();
    }

    fn prepare_value_px_matrix(&mut self) {
        let x_min = self.x_axis.base.axis_minimum;
        let x_range = self.x_axis.base.axis_range;
        self.right_transformer.prepare_matrix_value_px(
            &self.viewport,
            x_min,
            x_range,
            self.right_axis.base.axis_range,
            self.right_axis.base.axis_minimum,
        );
        self.left_transformer.prepare_matrix_value_px(
            &self.viewport,
            x_min,
            x_range,
            self.left_axis.base.axis_range,
            self.left_axis.base.axis_minimum,
        );
    }

    fn prepare_offset_matrix(&mut self) {
        self.right_transformer
            .prepare_matrix_offset(&self.viewport, self.right_axis.inverted);
        self.left_transformer
            .prepare_matrix_offset(&self.viewport, self.left_axis.inverted);
    }

    /// Fits the y axes to the entries currently in view.
    fn auto_scale(&mut self) {
        let (from, to) = (self.lowest_visible_x(), self.highest_visible_x());
        self.data.calc_min_max_y(from, to);
        self.calc_min_max();
        self.calculate_offsets();
    }

    // Viewport modifiers

    /// Applies `matrix` to the viewport (clamped to its limits) and requests a
    /// redraw. Returns the matrix in effect.
    pub fn refresh(&mut self, matrix: DAffine2) -> DAffine2 {
        self.viewport.refresh(matrix, &mut self.redraw, true)
    }

    /// Zooms by the given factors around a pivot relative to the content
    /// origin (see [`crate::view_controller::ViewController::content_location`]).
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, x: f64, y: f64) {
        let matrix = self.viewport.zoom_at(scale_x, scale_y, x, -y);
        self.apply_zoom(matrix);
    }

    /// Zooms in by 1.4 around the content center.
    pub fn zoom_in(&mut self) {
        let center = self.viewport.content_center();
        let matrix = self.viewport.zoom_in(center.x, -center.y);
        self.apply_zoom(matrix);
    }

    /// Zooms out by 0.7 around the content center.
    pub fn zoom_out(&mut self) {
        let center = self.viewport.content_center();
        let matrix = self.viewport.zoom_out(center.x, -center.y);
        self.apply_zoom(matrix);
    }

    /// Resets zoom and pan.
    pub fn fit_screen(&mut self) {
        let matrix = self.viewport.fit_screen();
        self.apply_zoom(matrix);
    }

    fn apply_zoom(&mut self, matrix: DAffine2) {
        self.viewport.refresh(matrix, &mut self.redraw, false);
        self.relayout();
    }

    /// Recomputes axis labels and offsets for the current zoom. Label widths
    /// follow the visible range, so call this when a scale gesture ends.
    pub fn relayout(&mut self) {
        self.compute_axes();
        self.calculate_offsets();
        self.redraw.invalidate();
    }

    /// Pans by a pixel delta. Returns false when the viewport limits kept the
    /// chart from moving.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> bool {
        let original = self.viewport.touch_matrix();
        let matrix = concat(original, DAffine2::from_translation(DVec2::new(dx, dy)));
        let applied = self.viewport.refresh(matrix, &mut self.redraw, true);
        applied.translation != original.translation
    }

    /// Moves the left edge of the viewport to `x_value`.
    pub fn move_view_to_x(&mut self, x_value: f64) {
        let point = self
            .left_transformer
            .pixel_for_values(&self.viewport, x_value, 0.0);
        self.viewport.center_view_port(point, &mut self.redraw);
    }

    /// Largest x range visible at once; zooming out stops there.
    pub fn set_visible_x_range_maximum(&mut self, max_range: f64) {
        let scale = self.x_axis.base.axis_range / max_range;
        self.viewport.set_minimum_scale_x(scale);
    }

    /// Smallest x range visible at once; zooming in stops there.
    pub fn set_visible_x_range_minimum(&mut self, min_range: f64) {
        let scale = self.x_axis.base.axis_range / min_range;
        self.viewport.set_maximum_scale_x(scale);
    }

    pub fn set_visible_x_range(&mut self, min_range: f64, max_range: f64) {
        let range = self.x_axis.base.axis_range;
        self.viewport
            .set_min_max_scale_x(range / max_range, range / min_range);
    }

    pub fn set_visible_y_range_maximum(&mut self, max_range: f64, axis: AxisDependency) {
        let scale = self.y_axis(axis).base.axis_range / max_range;
        self.viewport.set_minimum_scale_y(scale);
    }

    pub fn set_visible_y_range_minimum(&mut self, min_range: f64, axis: AxisDependency) {
        let scale = self.y_axis(axis).base.axis_range / min_range;
        self.viewport.set_maximum_scale_y(scale);
    }

    pub fn visible_x_range(&self) -> f64 {
        (self.highest_visible_x() - self.lowest_visible_x()).abs()
    }

    /// Data values under a pixel position.
    pub fn value_for_touch_point(&self, point: DVec2, axis: AxisDependency) -> DVec2 {
        self.transformer(axis)
            .value_for_touch_point(&self.viewport, point)
    }

    pub fn pixel_for_values(&self, x: f64, y: f64, axis: AxisDependency) -> DVec2 {
        self.transformer(axis).pixel_for_values(&self.viewport, x, y)
    }

    // Animation

    /// Starts the configured intro animation.
    pub fn animate(&mut self) {
        let config = &self.animation;
        self.animator.animate(
            config.duration_x(),
            config.duration_y(),
            config.easing_x,
            config.easing_y,
        );
        self.redraw.invalidate();
    }

    /// Advances animations to `elapsed` since they started.
    pub fn tick(&mut self, elapsed: Duration) -> AnimationTick {
        let tick = self.animator.tick(elapsed);
        if tick != AnimationTick::Idle {
            self.redraw.invalidate();
        }
        tick
    }

    // Highlighting

    /// Highlights the entry under a tap; tapping the highlighted entry again
    /// (or empty space) clears the highlight.
    pub fn highlight_at(&mut self, x: f64, y: f64) -> Option<Highlight> {
        if !self.interaction.highlight_per_tap {
            return None;
        }
        let found = self.highlighter.highlight(&*self, x, y);
        let last = self.highlights.first().copied();
        match found {
            Some(h) if last.is_none_or(|last| !last.same_entry(&h)) => {
                self.highlights = vec![h];
            }
            _ => self.highlights.clear(),
        }
        self.redraw.invalidate();
        self.highlights.first().copied()
    }

    /// Highlights the entry at `x` (and `y`, NaN for any) in a data set.
    /// Unknown data sets or entries clear the highlight.
    pub fn highlight_value(&mut self, x: f64, y: f64, data_set_index: usize) -> Option<Highlight> {
        self.highlights.clear();
        self.redraw.invalidate();

        let set = self.data.data_set(data_set_index)?;
        let axis = set.axis_dependency;
        let mut highlight = Highlight::new(x, y, data_set_index);
        highlight.axis = axis;
        let entry = self.data.entry_for_highlight(&highlight)?;
        highlight.y = entry.y;

        let px = self.pixel_for_values(highlight.x, highlight.y, axis);
        highlight.x_px = px.x;
        highlight.y_px = px.y;
        self.highlights.push(highlight);
        Some(highlight)
    }

    pub fn clear_highlights(&mut self) {
        if !self.highlights.is_empty() {
            self.highlights.clear();
            self.redraw.invalidate();
        }
    }

    // Drawing

    /// Renders one frame and clears the pending redraw.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let bounds = Rect::new(
            0.0,
            0.0,
            self.viewport.chart_width(),
            self.viewport.chart_height(),
        );
        canvas.fill_rect(bounds, self.theme.background);
        self.redraw.pending = false;

        if self.data.is_empty() {
            return;
        }

        if self.layout.auto_scale_min_max {
            self.auto_scale();
        }
        self.compute_axes();

        let this = &*self;
        let ctx = RenderContext {
            viewport: &this.viewport,
            left_transformer: &this.left_transformer,
            right_transformer: &this.right_transformer,
            left_inverted: this.left_axis.inverted,
            right_inverted: this.right_axis.inverted,
            visible: this,
            phase_x: this.animator.phase_x(),
            phase_y: this.animator.phase_y(),
            bar_width: this.data.bar_width,
            left_axis_extent: (
                this.left_axis.base.axis_minimum,
                this.left_axis.base.axis_maximum,
            ),
            right_axis_extent: (
                this.right_axis.base.axis_minimum,
                this.right_axis.base.axis_maximum,
            ),
        };

        AxisRenderer::render_x_axis(
            canvas,
            &this.x_axis,
            &this.viewport,
            &this.left_transformer,
            &this.theme,
        );
        AxisRenderer::render_y_axis(
            canvas,
            &this.left_axis,
            &this.viewport,
            &this.left_transformer,
            &this.theme,
        );
        AxisRenderer::render_y_axis(
            canvas,
            &this.right_axis,
            &this.viewport,
            &this.right_transformer,
            &this.theme,
        );

        this.renderer.draw_data(canvas, &this.data, &ctx);
        if !this.highlights.is_empty() {
            this.renderer
                .draw_highlighted(canvas, &this.data, &ctx, &this.highlights);
        }
        LegendRenderer::render(canvas, &this.legend, &this.viewport, &this.theme);
    }
}

impl VisibleXRange for BarLineChart {
    fn lowest_visible_x(&self) -> f64 {
        let point = DVec2::new(self.viewport.content_left(), self.viewport.content_bottom());
        let value = self
            .left_transformer
            .value_for_touch_point(&self.viewport, point);
        self.x_axis.base.axis_minimum.max(value.x)
    }

    fn highest_visible_x(&self) -> f64 {
        let point = DVec2::new(self.viewport.content_right(), self.viewport.content_bottom());
        let value = self
            .left_transformer
            .value_for_touch_point(&self.viewport, point);
        self.x_axis.base.axis_maximum.min(value.x)
    }
}

impl HighlightSource for BarLineChart {
    fn chart_data(&self) -> &ChartData {
        &self.data
    }

    fn viewport(&self) -> &ViewPortHandler {
        &self.viewport
    }

    fn transformer(&self, axis: AxisDependency) -> &Transformer {
        BarLineChart::transformer(self, axis)
    }
}
