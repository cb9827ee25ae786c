pub mod geometry;
pub mod monitor;

pub use geometry::*;
pub use monitor::*;
