use gpui::*;

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background: Hsla,
    pub grid_line: Hsla,
    pub grid_line_width: f32,
    pub axis_line: Hsla,
    pub axis_line_width: f32,
    pub axis_label: Hsla,
    pub axis_label_size: Pixels,
    /// Gap between the content rect and the axis labels.
    pub label_offset: Pixels,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: gpui::black(),
            grid_line: gpui::white().alpha(0.1),
            grid_line_width: 1.0,
            axis_line: gpui::white().alpha(0.2),
            axis_line_width: 1.0,
            axis_label: gpui::white().alpha(0.8),
            axis_label_size: px(11.0),
            label_offset: px(5.0),
        }
    }
}

impl ChartTheme {
    pub fn light() -> Self {
        Self {
            background: gpui::white(),
            grid_line: gpui::black().alpha(0.08),
            axis_line: gpui::black().alpha(0.3),
            axis_label: gpui::black().alpha(0.8),
            ..Self::default()
        }
    }
}
