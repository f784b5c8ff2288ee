// Drawing backends for the chart renderers.
//
// Renderers only talk to `Canvas`. `WindowCanvas` paints into a GPUI window,
// `RecordingCanvas` keeps the calls so they can be inspected.

use crate::geometry::Rect;
use crate::utils::PixelsExt;
use glam::DVec2;
use gpui::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the origin.
    Left,
    Center,
    /// Text ends at the origin.
    Right,
}

/// Minimal painting surface in chart pixel coordinates.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Hsla);

    /// Open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[DVec2], width: f32, color: Hsla);

    /// Disjoint segments, drawn with a single stroke.
    fn stroke_segments(&mut self, segments: &[(DVec2, DVec2)], width: f32, color: Hsla);

    fn fill_polygon(&mut self, points: &[DVec2], color: Hsla);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f32, color: Hsla);

    /// Text vertically centered on `origin.y`.
    fn draw_text(
        &mut self,
        text: &str,
        origin: DVec2,
        anchor: TextAnchor,
        font_size: f32,
        color: Hsla,
    );

    /// Width of `text` in pixels.
    fn measure_text(&mut self, text: &str, font_size: f32) -> f64 {
        estimate_text_width(text, font_size)
    }
}

/// Width estimate for layout done before any surface is available.
pub fn estimate_text_width(text: &str, font_size: f32) -> f64 {
    text.chars().count() as f64 * font_size as f64 * 0.6
}

pub struct WindowCanvas<'a> {
    window: &'a mut Window,
    cx: &'a mut App,
    origin: Point<Pixels>,
}

impl<'a> WindowCanvas<'a> {
    /// `origin` is the window position of the chart's top-left corner.
    pub fn new(window: &'a mut Window, cx: &'a mut App, origin: Point<Pixels>) -> Self {
        Self { window, cx, origin }
    }

    fn to_window(&self, p: DVec2) -> Point<Pixels> {
        self.origin + point(px(p.x as f32), px(p.y as f32))
    }

    fn bounds_of(&self, rect: Rect) -> Bounds<Pixels> {
        let rect = rect.standardized();
        Bounds::new(
            self.to_window(rect.origin()),
            size(px(rect.width as f32), px(rect.height as f32)),
        )
    }

    fn text_run(text: &str, color: Hsla) -> TextRun {
        TextRun {
            len: text.len(),
            font: TextStyle::default().font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        }
    }
}

impl Canvas for WindowCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Hsla) {
        let bounds = self.bounds_of(rect);
        self.window.paint_quad(fill(bounds, color));
    }

    fn stroke_polyline(&mut self, points: &[DVec2], width: f32, color: Hsla) {
        if points.len() < 2 {
            return;
        }
        let mut builder = PathBuilder::stroke(px(width));
        builder.move_to(self.to_window(points[0]));
        for p in &points[1..] {
            builder.line_to(self.to_window(*p));
        }
        if let Ok(path) = builder.build() {
            self.window.paint_path(path, color);
        }
    }

    fn stroke_segments(&mut self, segments: &[(DVec2, DVec2)], width: f32, color: Hsla) {
        if segments.is_empty() {
            return;
        }
        let mut builder = PathBuilder::stroke(px(width));
        for (a, b) in segments {
            builder.move_to(self.to_window(*a));
            builder.line_to(self.to_window(*b));
        }
        if let Ok(path) = builder.build() {
            self.window.paint_path(path, color);
        }
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Hsla) {
        if points.len() < 3 {
            return;
        }
        let mut builder = PathBuilder::fill();
        builder.move_to(self.to_window(points[0]));
        for p in &points[1..] {
            builder.line_to(self.to_window(*p));
        }
        builder.line_to(self.to_window(points[0]));
        if let Ok(path) = builder.build() {
            self.window.paint_path(path, color);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla) {
        let rect = Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        let bounds = self.bounds_of(rect);
        self.window
            .paint_quad(fill(bounds, color).corner_radii(Corners::all(px(radius as f32))));
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f32, color: Hsla) {
        let rect = Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        let bounds = self.bounds_of(rect);
        self.window.paint_quad(
            outline(bounds, color, BorderStyle::Solid)
                .corner_radii(Corners::all(px(radius as f32)))
                .border_widths(Edges::all(px(width))),
        );
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: DVec2,
        anchor: TextAnchor,
        font_size: f32,
        color: Hsla,
    ) {
        let run = Self::text_run(text, color);
        let font_px = px(font_size);
        let Ok(lines) = self.window.text_system().shape_text(
            text.to_string().into(),
            font_px,
            &[run],
            None,
            None,
        ) else {
            return;
        };

        for line in lines {
            let width = line.width().as_f64();
            let x = match anchor {
                TextAnchor::Left => origin.x,
                TextAnchor::Center => origin.x - width / 2.0,
                TextAnchor::Right => origin.x - width,
            };
            let top_left = self.to_window(DVec2::new(x, origin.y - font_size as f64 / 2.0));
            let _ = line.paint(top_left, font_px, TextAlign::Left, None, self.window, self.cx);
        }
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> f64 {
        let run = Self::text_run(text, gpui::white());
        self.window
            .text_system()
            .shape_text(text.to_string().into(), px(font_size), &[run], None, None)
            .ok()
            .and_then(|lines| lines.first().map(|line| line.width().as_f64()))
            .unwrap_or_else(|| estimate_text_width(text, font_size))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Hsla,
    },
    Polyline {
        points: Vec<DVec2>,
        width: f32,
        color: Hsla,
    },
    Segments {
        segments: Vec<(DVec2, DVec2)>,
        width: f32,
        color: Hsla,
    },
    Polygon {
        points: Vec<DVec2>,
        color: Hsla,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Hsla,
        /// Stroke width; `None` for filled circles.
        stroke: Option<f32>,
    },
    Text {
        text: String,
        origin: DVec2,
        anchor: TextAnchor,
        color: Hsla,
    },
}

/// Canvas that records every call instead of painting.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Hsla) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], width: f32, color: Hsla) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_segments(&mut self, segments: &[(DVec2, DVec2)], width: f32, color: Hsla) {
        self.commands.push(DrawCommand::Segments {
            segments: segments.to_vec(),
            width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Hsla) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke: None,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f32, color: Hsla) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke: Some(width),
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: DVec2,
        anchor: TextAnchor,
        _font_size: f32,
        color: Hsla,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            anchor,
            color,
        });
    }
}
