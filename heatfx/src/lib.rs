mod color;
mod color_map;
mod gradient;

pub use color::{Color, InvalidHexColor};
pub use color_map::ColorMap;
pub use gradient::{interpolate_color, Gradient, GradientError, DEFAULT_COLOR_MAP_SIZE};
