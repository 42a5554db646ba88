pub mod chart;
pub mod window;

pub use chart::{ChartRenderer, ChartSpec};
pub use window::WindowRenderer;
