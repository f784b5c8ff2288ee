//! Numeric chart options, loadable from JSON.

use crate::animation::Easing;
use crate::highlighter::DEFAULT_MAX_HIGHLIGHT_DISTANCE;
use crate::legend::LegendConfig;
use eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: ViewportLimits,
    pub interaction: InteractionConfig,
    pub layout: LayoutConfig,
    pub animation: AnimationConfig,
    pub legend: LegendConfig,
}

/// Scale limits and drag overshoot. A maximum scale of `0` means unlimited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportLimits {
    pub min_scale_x: f64,
    pub max_scale_x: f64,
    pub min_scale_y: f64,
    pub max_scale_y: f64,
    pub drag_offset_x: f64,
    pub drag_offset_y: f64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            min_scale_x: 1.0,
            max_scale_x: 0.0,
            min_scale_y: 1.0,
            max_scale_y: 0.0,
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub drag_x_enabled: bool,
    pub drag_y_enabled: bool,
    pub scale_x_enabled: bool,
    pub scale_y_enabled: bool,
    /// Pinch zooms both axes by the same factor.
    pub pinch_zoom: bool,
    pub double_tap_to_zoom: bool,
    pub highlight_per_tap: bool,
    pub highlight_per_drag: bool,
    pub max_highlight_distance: f64,
    pub drag_deceleration_enabled: bool,
    /// Velocity multiplier applied every deceleration tick, in `[0, 1)`.
    pub drag_deceleration_friction: f64,
    /// Wheel delta, in pixels, that doubles the zoom.
    pub zoom_sensitivity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_x_enabled: true,
            drag_y_enabled: true,
            scale_x_enabled: true,
            scale_y_enabled: true,
            pinch_zoom: false,
            double_tap_to_zoom: true,
            highlight_per_tap: true,
            highlight_per_drag: true,
            max_highlight_distance: DEFAULT_MAX_HIGHLIGHT_DISTANCE,
            drag_deceleration_enabled: true,
            drag_deceleration_friction: 0.9,
            zoom_sensitivity: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Smallest offset kept on every side of the content rect.
    pub min_offset: f64,
    pub extra_left_offset: f64,
    pub extra_top_offset: f64,
    pub extra_right_offset: f64,
    pub extra_bottom_offset: f64,
    pub bar_width: f64,
    /// Recompute the y extent from the entries in view on every draw.
    pub auto_scale_min_max: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_offset: 10.0,
            extra_left_offset: 0.0,
            extra_top_offset: 0.0,
            extra_right_offset: 0.0,
            extra_bottom_offset: 0.0,
            bar_width: crate::data_types::DEFAULT_BAR_WIDTH,
            auto_scale_min_max: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of the x phase animation; `0` disables it.
    pub duration_x_ms: u64,
    pub duration_y_ms: u64,
    pub easing_x: Easing,
    pub easing_y: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_x_ms: 0,
            duration_y_ms: 0,
            easing_x: Easing::InOutQuad,
            easing_y: Easing::InOutQuad,
        }
    }
}

impl AnimationConfig {
    pub fn duration_x(&self) -> Option<Duration> {
        (self.duration_x_ms > 0).then(|| Duration::from_millis(self.duration_x_ms))
    }

    pub fn duration_y(&self) -> Option<Duration> {
        (self.duration_y_ms > 0).then(|| Duration::from_millis(self.duration_y_ms))
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid chart config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read chart config {}", path.display()))?;
        Self::from_json(&json).wrap_err_with(|| format!("in {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize chart config")
    }

    pub fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        ensure!(
            vp.min_scale_x >= 1.0 && vp.min_scale_y >= 1.0,
            "minimum scales must be at least 1, got {} / {}",
            vp.min_scale_x,
            vp.min_scale_y
        );
        ensure!(
            vp.max_scale_x == 0.0 || vp.max_scale_x >= vp.min_scale_x,
            "max_scale_x {} is below min_scale_x {}",
            vp.max_scale_x,
            vp.min_scale_x
        );
        ensure!(
            vp.max_scale_y == 0.0 || vp.max_scale_y >= vp.min_scale_y,
            "max_scale_y {} is below min_scale_y {}",
            vp.max_scale_y,
            vp.min_scale_y
        );
        ensure!(
            vp.drag_offset_x >= 0.0 && vp.drag_offset_y >= 0.0,
            "drag offsets must not be negative"
        );

        let it = &self.interaction;
        ensure!(
            (0.0..1.0).contains(&it.drag_deceleration_friction),
            "drag_deceleration_friction must be in [0, 1), got {}",
            it.drag_deceleration_friction
        );
        ensure!(
            it.max_highlight_distance >= 0.0,
            "max_highlight_distance must not be negative"
        );
        ensure!(
            it.zoom_sensitivity > 0.0,
            "zoom_sensitivity must be positive, got {}",
            it.zoom_sensitivity
        );

        let layout = &self.layout;
        ensure!(
            layout.bar_width > 0.0 && layout.bar_width <= 1.0,
            "bar_width must be in (0, 1], got {}",
            layout.bar_width
        );
        ensure!(layout.min_offset >= 0.0, "min_offset must not be negative");

        let legend = &self.legend;
        ensure!(
            legend.max_size_percent > 0.0 && legend.max_size_percent <= 1.0,
            "legend max_size_percent must be in (0, 1], got {}",
            legend.max_size_percent
        );
        ensure!(
            legend.form_size >= 0.0 && legend.font_size > 0.0,
            "legend form_size must not be negative and font_size must be positive"
        );
        Ok(())
    }
}
