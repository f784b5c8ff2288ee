//! Legend entries, their wrapped layout and painting.
//!
//! Entries are derived from the data sets whenever the chart data changes;
//! the layout is measured against the content rect and reserves room around
//! it unless the legend is drawn inside.

use crate::data_types::{ChartData, DataSet, SeriesStyle};
use crate::geometry::Rect;
use crate::rendering::{estimate_text_width, Canvas, TextAnchor};
use crate::theme::ChartTheme;
use crate::viewport::ViewPortHandler;
use glam::DVec2;
use gpui::Hsla;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendForm {
    /// No form, and no space reserved for one.
    None,
    /// Space reserved, nothing drawn.
    Empty,
    /// The legend-wide form for entries, a circle for the legend itself.
    #[default]
    Default,
    Square,
    Circle,
    Line,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendHorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendVerticalAlignment {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendOrientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub enabled: bool,
    pub horizontal_alignment: LegendHorizontalAlignment,
    pub vertical_alignment: LegendVerticalAlignment,
    pub orientation: LegendOrientation,
    pub direction: LegendDirection,
    /// Draw over the content rect instead of reserving offsets for it.
    pub draw_inside: bool,
    /// Break horizontal legends into lines that fit the content width.
    pub word_wrap: bool,
    pub form: LegendForm,
    pub form_size: f64,
    pub form_line_width: f32,
    pub x_entry_space: f64,
    pub y_entry_space: f64,
    pub form_to_text_space: f64,
    /// Gap between the forms of one stacked group.
    pub stack_space: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub font_size: f32,
    /// Largest share of the chart size the legend may take.
    pub max_size_percent: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            horizontal_alignment: LegendHorizontalAlignment::default(),
            vertical_alignment: LegendVerticalAlignment::default(),
            orientation: LegendOrientation::default(),
            direction: LegendDirection::default(),
            draw_inside: false,
            word_wrap: true,
            form: LegendForm::Square,
            form_size: 8.0,
            form_line_width: 3.0,
            x_entry_space: 6.0,
            y_entry_space: 0.0,
            form_to_text_space: 5.0,
            stack_space: 3.0,
            x_offset: 5.0,
            y_offset: 3.0,
            font_size: 10.0,
            max_size_percent: 0.95,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// `None` groups the form with the next labelled entry.
    pub label: Option<String>,
    pub form: LegendForm,
    /// Overrides [`LegendConfig::form_size`].
    pub form_size: Option<f64>,
    pub form_color: Option<Hsla>,
}

impl LegendEntry {
    pub fn new(label: Option<String>, form_color: Option<Hsla>) -> Self {
        Self {
            label,
            form: LegendForm::Default,
            form_size: None,
            form_color,
        }
    }

    /// Label-only entry closing a stacked group.
    fn caption(label: String) -> Self {
        Self {
            form: LegendForm::None,
            ..Self::new(Some(label), None)
        }
    }
}

/// Extra room the legend takes around the content rect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegendOffsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Legend {
    pub config: LegendConfig,
    /// Appended after the computed entries.
    pub extra_entries: Vec<LegendEntry>,
    /// Falls back to the theme label color.
    pub text_color: Option<Hsla>,
    entries: Vec<LegendEntry>,
    custom: bool,
    needed_width: f64,
    needed_height: f64,
    label_widths: Vec<f64>,
    break_points: Vec<bool>,
    line_widths: Vec<f64>,
}

impl Legend {
    pub fn new(config: LegendConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Replaces the computed entries until [`Legend::reset_custom`].
    pub fn set_custom(&mut self, entries: Vec<LegendEntry>) {
        self.entries = entries;
        self.custom = true;
    }

    pub fn reset_custom(&mut self) {
        self.custom = false;
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn needed_width(&self) -> f64 {
        self.needed_width
    }

    pub fn needed_height(&self) -> f64 {
        self.needed_height
    }

    /// Widths of the wrapped lines of a horizontal legend.
    pub fn line_widths(&self) -> &[f64] {
        &self.line_widths
    }

    /// `true` where a horizontal legend starts a new line before the entry.
    pub fn break_points(&self) -> &[bool] {
        &self.break_points
    }

    fn line_height(&self) -> f64 {
        self.config.font_size as f64
    }

    fn form_size_of(&self, entry: &LegendEntry) -> f64 {
        entry.form_size.unwrap_or(self.config.form_size)
    }

    /// Recomputes the entries from the data sets (kept while custom), then
    /// the layout.
    pub fn compute(&mut self, data: &ChartData, viewport: &ViewPortHandler) {
        if !self.custom {
            self.entries.clear();
            for set in data.data_sets() {
                push_set_entries(set, &mut self.entries);
            }
            self.entries.extend(self.extra_entries.iter().cloned());
        }
        self.calculate_dimensions(viewport);
    }

    /// Measures the legend; horizontal legends wrap to the content width.
    pub fn calculate_dimensions(&mut self, viewport: &ViewPortHandler) {
        let font_size = self.config.font_size;
        self.label_widths = self
            .entries
            .iter()
            .map(|e| e.label.as_deref().map_or(0.0, |l| estimate_text_width(l, font_size)))
            .collect();

        match self.config.orientation {
            LegendOrientation::Vertical => self.measure_vertical(),
            LegendOrientation::Horizontal => self.measure_horizontal(viewport),
        }
        self.needed_width += self.config.x_offset;
        self.needed_height += self.config.y_offset;
        trace!(
            width = self.needed_width,
            height = self.needed_height,
            lines = self.line_widths.len(),
            "legend measured"
        );
    }

    fn measure_vertical(&mut self) {
        let cfg = &self.config;
        let line_height = self.line_height();
        let count = self.entries.len();
        let (mut max_width, mut max_height, mut width) = (0.0_f64, 0.0, 0.0);
        let mut was_stacked = false;

        for (i, entry) in self.entries.iter().enumerate() {
            let drawing_form = entry.form != LegendForm::None;
            let form_size = self.form_size_of(entry);
            if !was_stacked {
                width = 0.0;
            }
            if drawing_form {
                if was_stacked {
                    width += cfg.stack_space;
                }
                width += form_size;
            }

            if entry.label.is_some() {
                if drawing_form && !was_stacked {
                    width += cfg.form_to_text_space;
                } else if was_stacked {
                    // the caption goes on its own line below the forms
                    max_width = max_width.max(width);
                    max_height += line_height + cfg.y_entry_space;
                    width = 0.0;
                    was_stacked = false;
                }
                width += self.label_widths[i];
                max_height += line_height + cfg.y_entry_space;
            } else {
                was_stacked = true;
                width += form_size;
                if i + 1 < count {
                    width += cfg.stack_space;
                }
            }
            max_width = max_width.max(width);
        }

        self.needed_width = max_width;
        self.needed_height = max_height;
        self.break_points.clear();
        self.line_widths.clear();
    }

    fn measure_horizontal(&mut self, viewport: &ViewPortHandler) {
        let cfg = &self.config;
        let line_height = self.line_height();
        let count = self.entries.len();
        let content_width = viewport.content_width() * cfg.max_size_percent;

        let mut break_points = vec![false; count];
        let mut line_widths = Vec::new();
        let (mut max_line_width, mut current_line_width, mut stacked_width) = (0.0_f64, 0.0, 0.0);
        let mut stacked_start: Option<usize> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            let drawing_form = entry.form != LegendForm::None;
            let form_size = self.form_size_of(entry);

            if stacked_start.is_none() {
                stacked_width = 0.0;
            } else {
                stacked_width += cfg.stack_space;
            }

            if entry.label.is_some() {
                if drawing_form {
                    stacked_width += cfg.form_to_text_space + form_size;
                }
            } else {
                if drawing_form {
                    stacked_width += form_size;
                }
                if stacked_start.is_none() {
                    stacked_start = Some(i);
                }
            }

            if entry.label.is_some() || i + 1 == count {
                let label_width = self.label_widths[i];
                let spacing = if current_line_width == 0.0 {
                    0.0
                } else {
                    cfg.x_entry_space
                };
                let required = stacked_width + label_width;

                if !cfg.word_wrap
                    || current_line_width == 0.0
                    || content_width - current_line_width >= spacing + required
                {
                    current_line_width += spacing + required;
                } else {
                    line_widths.push(current_line_width);
                    max_line_width = max_line_width.max(current_line_width);
                    break_points[stacked_start.unwrap_or(i)] = true;
                    current_line_width = required;
                }

                if i + 1 == count {
                    line_widths.push(current_line_width);
                    max_line_width = max_line_width.max(current_line_width);
                }
            }

            if entry.label.is_some() {
                stacked_start = None;
            }
        }

        let lines = line_widths.len() as f64;
        self.needed_width = max_line_width;
        self.needed_height = line_height * lines + cfg.y_entry_space * (lines - 1.0).max(0.0);
        self.break_points = break_points;
        self.line_widths = line_widths;
    }

    /// Room to reserve around the content rect; `x_label_height` is added
    /// for horizontal legends so they clear the x axis labels.
    pub fn offsets(&self, viewport: &ViewPortHandler, x_label_height: f64) -> LegendOffsets {
        let mut offsets = LegendOffsets::default();
        let cfg = &self.config;
        if !cfg.enabled || cfg.draw_inside {
            return offsets;
        }

        let width = self.needed_width.min(viewport.chart_width() * cfg.max_size_percent) + cfg.x_offset;
        let height =
            self.needed_height.min(viewport.chart_height() * cfg.max_size_percent) + cfg.y_offset;

        match cfg.orientation {
            LegendOrientation::Vertical => match cfg.horizontal_alignment {
                LegendHorizontalAlignment::Left => offsets.left = width,
                LegendHorizontalAlignment::Right => offsets.right = width,
                LegendHorizontalAlignment::Center => match cfg.vertical_alignment {
                    LegendVerticalAlignment::Top => offsets.top = height,
                    LegendVerticalAlignment::Bottom => offsets.bottom = height,
                    LegendVerticalAlignment::Center => {}
                },
            },
            LegendOrientation::Horizontal => match cfg.vertical_alignment {
                LegendVerticalAlignment::Top => offsets.top = height + x_label_height,
                LegendVerticalAlignment::Bottom => offsets.bottom = height + x_label_height,
                LegendVerticalAlignment::Center => {}
            },
        }
        offsets
    }
}

fn push_set_entries(set: &DataSet, out: &mut Vec<LegendEntry>) {
    let label = Some(set.label.clone()).filter(|l| !l.is_empty());
    match &set.style {
        SeriesStyle::Bar(style) if set.is_stacked() => {
            let count = style.colors.len().min(set.stack_size());
            for (j, color) in style.colors.iter().take(count).enumerate() {
                let stack_label = match style.stack_labels.len() {
                    0 => None,
                    n => style.stack_labels.get(j % n).cloned(),
                };
                out.push(LegendEntry::new(stack_label, Some(*color)));
            }
            if let Some(label) = label {
                out.push(LegendEntry::caption(label));
            }
        }
        SeriesStyle::Candle(style) => {
            out.push(LegendEntry::new(None, Some(style.decreasing_color)));
            out.push(LegendEntry::new(label, Some(style.increasing_color)));
        }
        other => {
            let colors = match other {
                SeriesStyle::Bar(style) => style.colors.clone(),
                SeriesStyle::Line(style) => vec![style.color],
                SeriesStyle::Bubble(style) => vec![style.color],
                SeriesStyle::Scatter(style) => vec![style.color],
                SeriesStyle::Candle(_) => Vec::new(),
            };
            let count = colors.len().min(set.entry_count());
            for (j, color) in colors.iter().take(count).enumerate() {
                // every color but the last of the group stays unlabelled
                let entry_label = if j + 1 < count { None } else { label.clone() };
                out.push(LegendEntry::new(entry_label, Some(*color)));
            }
        }
    }
}

pub struct LegendRenderer;

impl LegendRenderer {
    pub fn render(
        canvas: &mut dyn Canvas,
        legend: &Legend,
        viewport: &ViewPortHandler,
        theme: &ChartTheme,
    ) {
        let cfg = &legend.config;
        if !cfg.enabled || legend.entries.is_empty() {
            return;
        }

        let rtl = cfg.direction == LegendDirection::RightToLeft;
        let vertical = cfg.orientation == LegendOrientation::Vertical;
        let needed_width = legend.needed_width;

        let mut origin_x = match cfg.horizontal_alignment {
            LegendHorizontalAlignment::Left => {
                let x = if vertical { cfg.x_offset } else { viewport.content_left() + cfg.x_offset };
                if rtl { x + needed_width } else { x }
            }
            LegendHorizontalAlignment::Right => {
                let x = if vertical {
                    viewport.chart_width() - cfg.x_offset
                } else {
                    viewport.content_right() - cfg.x_offset
                };
                if rtl { x } else { x - needed_width }
            }
            LegendHorizontalAlignment::Center => {
                let x = if vertical {
                    viewport.chart_width() / 2.0
                } else {
                    viewport.content_left() + viewport.content_width() / 2.0
                };
                if rtl { x - cfg.x_offset } else { x + cfg.x_offset }
            }
        };
        if vertical && cfg.horizontal_alignment == LegendHorizontalAlignment::Center {
            origin_x += if rtl {
                needed_width / 2.0 - cfg.x_offset
            } else {
                -needed_width / 2.0 + cfg.x_offset
            };
        }

        let text_color = legend.text_color.unwrap_or(theme.axis_label);
        if vertical {
            render_vertical(canvas, legend, viewport, origin_x, text_color);
        } else {
            render_horizontal(canvas, legend, viewport, origin_x, text_color);
        }
    }
}

fn render_horizontal(
    canvas: &mut dyn Canvas,
    legend: &Legend,
    viewport: &ViewPortHandler,
    origin_x: f64,
    text_color: Hsla,
) {
    let cfg = &legend.config;
    let rtl = cfg.direction == LegendDirection::RightToLeft;
    let sign = if rtl { -1.0 } else { 1.0 };
    let line_height = legend.line_height();

    let mut pos_y = match cfg.vertical_alignment {
        LegendVerticalAlignment::Top => cfg.y_offset,
        LegendVerticalAlignment::Bottom => {
            viewport.chart_height() - cfg.y_offset - legend.needed_height
        }
        LegendVerticalAlignment::Center => {
            (viewport.chart_height() - legend.needed_height) / 2.0 + cfg.y_offset
        }
    };
    let mut pos_x = origin_x;
    let mut line_index = 0;

    for (i, entry) in legend.entries.iter().enumerate() {
        let drawing_form = entry.form != LegendForm::None;
        let form_size = legend.form_size_of(entry);

        if legend.break_points.get(i).copied().unwrap_or(false) {
            pos_x = origin_x;
            pos_y += line_height + cfg.y_entry_space;
        }
        if pos_x == origin_x && cfg.horizontal_alignment == LegendHorizontalAlignment::Center {
            if let Some(width) = legend.line_widths.get(line_index) {
                pos_x -= sign * width / 2.0;
                line_index += 1;
            }
        }

        let center_y = pos_y + line_height / 2.0;
        if drawing_form {
            if rtl {
                pos_x -= form_size;
            }
            draw_form(canvas, legend, entry, pos_x, center_y);
            if !rtl {
                pos_x += form_size;
            }
        }

        match &entry.label {
            Some(label) => {
                if drawing_form {
                    pos_x += sign * cfg.form_to_text_space;
                }
                let width = legend.label_widths.get(i).copied().unwrap_or(0.0);
                if rtl {
                    pos_x -= width;
                }
                canvas.draw_text(
                    label,
                    DVec2::new(pos_x, center_y),
                    TextAnchor::Left,
                    cfg.font_size,
                    text_color,
                );
                if !rtl {
                    pos_x += width;
                }
                pos_x += sign * cfg.x_entry_space;
            }
            None => pos_x += sign * cfg.stack_space,
        }
    }
}

fn render_vertical(
    canvas: &mut dyn Canvas,
    legend: &Legend,
    viewport: &ViewPortHandler,
    origin_x: f64,
    text_color: Hsla,
) {
    let cfg = &legend.config;
    let rtl = cfg.direction == LegendDirection::RightToLeft;
    let line_height = legend.line_height();
    let centered = cfg.horizontal_alignment == LegendHorizontalAlignment::Center;

    let mut pos_y = match cfg.vertical_alignment {
        LegendVerticalAlignment::Top => {
            (if centered { 0.0 } else { viewport.content_top() }) + cfg.y_offset
        }
        LegendVerticalAlignment::Bottom => {
            (if centered { viewport.chart_height() } else { viewport.content_bottom() })
                - legend.needed_height
                - cfg.y_offset
        }
        LegendVerticalAlignment::Center => {
            viewport.chart_height() / 2.0 - legend.needed_height / 2.0 + cfg.y_offset
        }
    };
    let mut stack = 0.0;
    let mut was_stacked = false;

    for (i, entry) in legend.entries.iter().enumerate() {
        let drawing_form = entry.form != LegendForm::None;
        let form_size = legend.form_size_of(entry);
        let mut pos_x = origin_x;

        if drawing_form {
            if rtl {
                pos_x -= form_size - stack;
            } else {
                pos_x += stack;
            }
            draw_form(canvas, legend, entry, pos_x, pos_y + line_height / 2.0);
            if !rtl {
                pos_x += form_size;
            }
        }

        match &entry.label {
            Some(label) => {
                if drawing_form && !was_stacked {
                    pos_x += if rtl { -cfg.form_to_text_space } else { cfg.form_to_text_space };
                } else if was_stacked {
                    pos_x = origin_x;
                    pos_y += line_height + cfg.y_entry_space;
                }
                if rtl {
                    pos_x -= legend.label_widths.get(i).copied().unwrap_or(0.0);
                }
                canvas.draw_text(
                    label,
                    DVec2::new(pos_x, pos_y + line_height / 2.0),
                    TextAnchor::Left,
                    cfg.font_size,
                    text_color,
                );
                pos_y += line_height + cfg.y_entry_space;
                stack = 0.0;
                was_stacked = false;
            }
            None => {
                stack += form_size + cfg.stack_space;
                was_stacked = true;
            }
        }
    }
}

/// Paints the form of `entry` starting at `x`, vertically centered on `y`.
fn draw_form(canvas: &mut dyn Canvas, legend: &Legend, entry: &LegendEntry, x: f64, y: f64) {
    let Some(color) = entry.form_color else {
        return;
    };
    if color.a == 0.0 {
        return;
    }

    let form = match entry.form {
        LegendForm::Default => legend.config.form,
        form => form,
    };
    let size = legend.form_size_of(entry);
    match form {
        LegendForm::None | LegendForm::Empty => {}
        LegendForm::Default | LegendForm::Circle => {
            canvas.fill_circle(DVec2::new(x + size / 2.0, y), size / 2.0, color);
        }
        LegendForm::Square => {
            canvas.fill_rect(Rect::new(x, y - size / 2.0, size, size), color);
        }
        LegendForm::Line => {
            let segment = (DVec2::new(x, y), DVec2::new(x + size, y));
            canvas.stroke_segments(&[segment], legend.config.form_line_width, color);
        }
    }
}
