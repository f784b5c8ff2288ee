//! viewport_charts crate: bar/line chart engine rendered with GPUI

pub mod animation;
pub mod axis_renderer;
pub mod axis_values;
pub mod bounds;
pub mod chart;
pub mod config;
pub mod data_types;
pub mod decimation;
pub mod geometry;
pub mod highlighter;
pub mod legend;
pub mod plot_types;
pub mod rendering;
pub mod theme;
pub mod transformer;
pub mod utils;
pub mod view_controller;
pub mod viewport;

pub use animation::{AnimationTick, Animator, Easing};
pub use axis_values::{compute_axis_values, AxisValues, IntervalParams, IntervalVariant};
pub use bounds::{VisibleXRange, XBounds};
pub use chart::BarLineChart;
pub use config::ChartConfig;
pub use data_types::{ChartData, DataSet, Entry, Highlight, SeriesStyle};
pub use highlighter::ChartHighlighter;
pub use legend::{Legend, LegendConfig, LegendEntry};
pub use rendering::{Canvas, RecordingCanvas, WindowCanvas};
pub use transformer::Transformer;
pub use view_controller::{Deceleration, ViewController};
pub use viewport::ViewPortHandler;
