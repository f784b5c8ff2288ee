pub mod axis;
pub mod chart_data;
pub mod data;
pub mod data_set;
pub mod highlight;
pub mod plot_configs;

pub use axis::*;
pub use chart_data::*;
pub use data::*;
pub use data_set::*;
pub use highlight::*;
pub use plot_configs::*;
