use gpui::Hsla;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineMode {
    Linear,
    /// Horizontal segment to the next x, then vertical.
    Stepped,
    /// Cubic spline through the entries, tangents scaled by the cubic
    /// intensity.
    CubicBezier,
    /// Curves that leave and enter every entry horizontally.
    HorizontalBezier,
}

/// Y value the area under a line is closed against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillPosition {
    /// Zero for sets crossing it, otherwise the axis edge the set faces.
    Auto,
    Value(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFill {
    pub color: Hsla,
    /// Multiplies the alpha of `color`.
    pub alpha: f32,
    pub position: FillPosition,
}

impl Default for LineFill {
    fn default() -> Self {
        Self {
            color: gpui::blue(),
            alpha: 0.33,
            position: FillPosition::Auto,
        }
    }
}

impl LineFill {
    pub fn paint_color(&self) -> Hsla {
        Hsla {
            a: self.color.a * self.alpha.clamp(0.0, 1.0),
            ..self.color
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Hsla,
    pub line_width: f32,
    pub mode: LineMode,
    /// Tangent scale of [`LineMode::CubicBezier`], clamped to `0.05..=1`.
    pub cubic_intensity: f64,
    pub fill: Option<LineFill>,
    pub draw_circles: bool,
    pub circle_radius: f32,
    pub circle_color: Hsla,
    /// Douglas-Peucker tolerance in pixels; `None` draws every point.
    pub simplify_tolerance: Option<f64>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: gpui::blue(),
            line_width: 2.0,
            mode: LineMode::Linear,
            cubic_intensity: 0.2,
            fill: None,
            draw_circles: false,
            circle_radius: 4.0,
            circle_color: gpui::blue(),
            simplify_tolerance: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandleStyle {
    pub increasing_color: Hsla,
    pub decreasing_color: Hsla,
    pub neutral_color: Hsla,
    pub shadow_width: f32,
    /// Space left on each side of the body, in x units (0.0 to 0.45).
    pub bar_space: f64,
    pub show_candle_bar: bool,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            increasing_color: gpui::green(),
            decreasing_color: gpui::red(),
            neutral_color: gpui::white(),
            shadow_width: 1.5,
            bar_space: 0.1,
            show_candle_bar: true,
        }
    }
}

impl CandleStyle {
    pub fn with_bar_space(mut self, space: f64) -> Self {
        self.bar_space = space.clamp(0.0, 0.45);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarStyle {
    /// One color per stack segment; segments wrap around the palette.
    pub colors: Vec<Hsla>,
    /// Legend labels of the stack segments, in segment order.
    pub stack_labels: Vec<String>,
    pub draw_bar_shadow: bool,
    pub shadow_color: Hsla,
    pub highlight_color: Hsla,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            colors: vec![gpui::blue()],
            stack_labels: Vec::new(),
            draw_bar_shadow: false,
            shadow_color: gpui::white().alpha(0.1),
            highlight_color: gpui::black().alpha(0.47),
        }
    }
}

impl BarStyle {
    pub fn color_at(&self, index: usize) -> Hsla {
        if self.colors.is_empty() {
            gpui::blue()
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleStyle {
    pub color: Hsla,
    pub normalize_size: bool,
    pub highlight_circle_width: f32,
}

impl Default for BubbleStyle {
    fn default() -> Self {
        Self {
            color: gpui::blue().alpha(0.6),
            normalize_size: true,
            highlight_circle_width: 2.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScatterShape {
    Square,
    Circle,
    Triangle,
    Cross,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterStyle {
    pub color: Hsla,
    pub shape: ScatterShape,
    pub shape_size: f32,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            color: gpui::blue(),
            shape: ScatterShape::Square,
            shape_size: 10.0,
        }
    }
}

/// Per-series styling; the variant also selects the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesStyle {
    Bar(BarStyle),
    Line(LineStyle),
    Candle(CandleStyle),
    Bubble(BubbleStyle),
    Scatter(ScatterStyle),
}

impl SeriesStyle {
    /// Highlight crosshair color for non-bar series.
    pub fn highlight_color(&self) -> Hsla {
        match self {
            Self::Bar(style) => style.highlight_color,
            Self::Line(style) => style.color,
            Self::Candle(style) => style.neutral_color,
            Self::Bubble(style) => style.color,
            Self::Scatter(style) => style.color,
        }
    }
}
