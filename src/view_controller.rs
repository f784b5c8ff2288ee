use crate::chart::BarLineChart;
use crate::data_types::AxisDependency;
use crate::geometry::{concat, scaled_by, translated_by};
use glam::{DAffine2, DVec2};
use std::time::Duration;
use tracing::trace;

/// Zoom factor of a double tap.
pub const DOUBLE_TAP_ZOOM: f64 = 1.4;

/// Decelerations stop once both velocity components drop below this.
pub const MIN_DECELERATION_VELOCITY: f64 = 0.001;

/// Axes a scale gesture acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    Both,
    X,
    Y,
}

/// ViewController handles the gesture math (pan, pinch, double tap, wheel
/// and fling deceleration) independently of the GPUI infrastructure to
/// facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Converts a pixel position into the pivot space the chart zooms in:
    /// relative to the content origin, with y pointing up.
    pub fn content_location(chart: &BarLineChart, x: f64, y: f64) -> DVec2 {
        let vp = chart.viewport();
        let y = if chart.y_axis(AxisDependency::Left).inverted {
            -(y - vp.offset_top())
        } else {
            -(vp.chart_height() - y - vp.offset_bottom())
        };
        DVec2::new(x - vp.offset_left(), y)
    }

    /// True when a drag can move the chart at all.
    pub fn can_drag(chart: &BarLineChart) -> bool {
        let vp = chart.viewport();
        let interaction = &chart.interaction;
        (interaction.drag_x_enabled || interaction.drag_y_enabled)
            && (!vp.has_no_drag_offset() || !vp.is_fully_zoomed_out())
    }

    /// Pans by a pixel delta. Returns false when nothing moved, either because
    /// dragging is off or the viewport is at its limits.
    pub fn pan(chart: &mut BarLineChart, delta: DVec2) -> bool {
        if chart.data().is_empty() || !Self::can_drag(chart) {
            return false;
        }
        let dx = if chart.interaction.drag_x_enabled {
            delta.x
        } else {
            0.0
        };
        let mut dy = if chart.interaction.drag_y_enabled {
            delta.y
        } else {
            0.0
        };
        if chart.y_axis(AxisDependency::Left).inverted {
            dy = -dy;
        }
        chart.translate_by(dx, dy)
    }

    /// Axis a two-finger scale acts on, from the finger spread.
    pub fn scale_axis(chart: &BarLineChart, spread: DVec2) -> ScaleAxis {
        let interaction = &chart.interaction;
        if interaction.pinch_zoom {
            ScaleAxis::Both
        } else if interaction.scale_x_enabled != interaction.scale_y_enabled {
            if interaction.scale_x_enabled {
                ScaleAxis::X
            } else {
                ScaleAxis::Y
            }
        } else if spread.x.abs() > spread.y.abs() {
            ScaleAxis::X
        } else {
            ScaleAxis::Y
        }
    }

    /// Applies one step of a pinch with relative `scale` around the pixel
    /// position `center`. Returns false when neither axis could zoom further.
    pub fn pinch_zoom(
        chart: &mut BarLineChart,
        scale: f64,
        center: DVec2,
        axis: ScaleAxis,
    ) -> bool {
        let vp = chart.viewport();
        let interaction = &chart.interaction;
        let zooming_out = scale < 1.0;

        let (room_x, room_y) = if zooming_out {
            (vp.can_zoom_out_more_x(), vp.can_zoom_out_more_y())
        } else {
            (vp.can_zoom_in_more_x(), vp.can_zoom_in_more_y())
        };
        let can_x = room_x
            && interaction.scale_x_enabled
            && matches!(axis, ScaleAxis::Both | ScaleAxis::X);
        let can_y = room_y
            && interaction.scale_y_enabled
            && matches!(axis, ScaleAxis::Both | ScaleAxis::Y);

        if !can_x && !can_y {
            return false;
        }

        let location = Self::content_location(chart, center.x, center.y);
        let scale_x = if can_x { scale } else { 1.0 };
        let scale_y = if can_y { scale } else { 1.0 };

        let pivot = translated_by(DAffine2::IDENTITY, location.x, location.y);
        let pivot = scaled_by(pivot, scale_x, scale_y);
        let pivot = translated_by(pivot, -location.x, -location.y);
        let matrix = concat(chart.viewport().touch_matrix(), pivot);

        trace!(scale_x, scale_y, "pinch zoom");
        chart.refresh(matrix);
        true
    }

    /// Ends a scale gesture; axis labels and offsets follow the new range.
    pub fn end_pinch(chart: &mut BarLineChart) {
        chart.relayout();
    }

    /// Zooms in by [`DOUBLE_TAP_ZOOM`] around the tapped pixel position.
    pub fn double_tap_zoom(chart: &mut BarLineChart, x: f64, y: f64) -> bool {
        if !chart.interaction.double_tap_to_zoom || chart.data().is_empty() {
            return false;
        }
        let location = Self::content_location(chart, x, y);
        let scale_x = if chart.interaction.scale_x_enabled {
            DOUBLE_TAP_ZOOM
        } else {
            1.0
        };
        let scale_y = if chart.interaction.scale_y_enabled {
            DOUBLE_TAP_ZOOM
        } else {
            1.0
        };
        chart.zoom(scale_x, scale_y, location.x, location.y);
        true
    }

    /// Zooms for a scroll wheel delta at the pixel position `(x, y)`.
    pub fn wheel_zoom(chart: &mut BarLineChart, delta: f32, x: f64, y: f64) {
        let factor = Self::compute_zoom_factor(delta, chart.interaction.zoom_sensitivity);
        let scale_x = if chart.interaction.scale_x_enabled {
            factor
        } else {
            1.0
        };
        let scale_y = if chart.interaction.scale_y_enabled {
            factor
        } else {
            1.0
        };
        let location = Self::content_location(chart, x, y);
        chart.zoom(scale_x, scale_y, location.x, location.y);
    }

    /// Calculates a zoom factor based on a pixel delta. Positive deltas zoom
    /// out.
    pub fn compute_zoom_factor(delta: f32, sensitivity: f32) -> f64 {
        let factor = 1.0 + (delta.abs() / sensitivity) as f64;
        if delta > 0.0 {
            1.0 / factor
        } else {
            factor
        }
    }

    /// Starts a fling with the release velocity (pixels per second) when
    /// deceleration is enabled.
    pub fn release(chart: &BarLineChart, velocity: DVec2) -> Option<Deceleration> {
        let interaction = &chart.interaction;
        if !interaction.drag_deceleration_enabled || !Self::can_drag(chart) {
            return None;
        }
        let deceleration = Deceleration::new(velocity, interaction.drag_deceleration_friction);
        deceleration.is_active().then_some(deceleration)
    }
}

/// Fling that keeps panning after a drag is released.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deceleration {
    velocity: DVec2,
    friction: f64,
}

impl Deceleration {
    /// `friction` is the velocity multiplier applied every tick, clamped to
    /// `[0, 0.999]`.
    pub fn new(velocity: DVec2, friction: f64) -> Self {
        Self {
            velocity,
            friction: friction.clamp(0.0, 0.999),
        }
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.velocity.x.abs() >= MIN_DECELERATION_VELOCITY
            || self.velocity.y.abs() >= MIN_DECELERATION_VELOCITY
    }

    pub fn stop(&mut self) {
        self.velocity = DVec2::ZERO;
    }

    /// Advances by `dt`: the velocity decays by the friction and the chart
    /// pans by `velocity * dt`. Returns whether the fling is still running;
    /// it stops when the chart hits its pan limits or the velocity dies out.
    pub fn tick(&mut self, chart: &mut BarLineChart, dt: Duration) -> bool {
        if !self.is_active() {
            return false;
        }

        self.velocity *= self.friction;
        let distance = self.velocity * dt.as_secs_f64();
        if !ViewController::pan(chart, distance) {
            self.stop();
        }

        if !self.is_active() {
            trace!("deceleration finished");
            self.stop();
            return false;
        }
        true
    }
}
