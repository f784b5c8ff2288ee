pub mod douglas_peucker;

pub use douglas_peucker::{reduce_with_douglas_peucker, reduce_with_douglas_peucker_into};
