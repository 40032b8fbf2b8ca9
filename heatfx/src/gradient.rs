use std::collections::BTreeMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{Color, ColorMap};

pub const DEFAULT_COLOR_MAP_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradientError {
    #[error("colors and startPoints should be same length")]
    LengthMismatch,

    #[error("No colors have been defined")]
    NoColors,

    #[error("startPoints should be in increasing order")]
    NotIncreasing,

    #[error("start point {value} at index {index} is outside of the [0, 1] range")]
    StartPointOutOfRange { index: usize, value: f64 },

    #[error("color map size should be positive")]
    EmptyColorMap,
}

/// A gradient defined by colors and the fraction of maximum intensity at
/// which each of them starts. Used to generate a [`ColorMap`] of a fixed size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientDefinition", into = "GradientDefinition")]
pub struct Gradient {
    colors: Vec<Color>,
    start_points: Vec<f64>,
    color_map_size: usize,
}

#[derive(Serialize, Deserialize)]
struct GradientDefinition {
    colors: Vec<Color>,
    start_points: Vec<f64>,
    #[serde(default = "default_color_map_size")]
    color_map_size: usize,
}

fn default_color_map_size() -> usize {
    DEFAULT_COLOR_MAP_SIZE
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ColorInterval {
    start_color: Color,
    end_color: Color,
    /// Length of the interval in color map entries. Can be fractional.
    duration: f64,
}

impl ColorInterval {
    fn color_at(&self, offset: f64) -> Color {
        interpolate_color(self.start_color, self.end_color, offset / self.duration)
    }
}

impl Gradient {
    pub fn new(colors: &[Color], start_points: &[f64]) -> Result<Self, GradientError> {
        Self::with_color_map_size(colors, start_points, DEFAULT_COLOR_MAP_SIZE)
    }

    pub fn with_color_map_size(
        colors: &[Color],
        start_points: &[f64],
        color_map_size: usize,
    ) -> Result<Self, GradientError> {
        if colors.len() != start_points.len() {
            return Err(GradientError::LengthMismatch);
        }
        if colors.is_empty() {
            return Err(GradientError::NoColors);
        }
        if start_points.windows(2).any(|w| w[1] <= w[0]) {
            return Err(GradientError::NotIncreasing);
        }
        if let Some((index, &value)) = start_points
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(GradientError::StartPointOutOfRange { index, value });
        }
        if color_map_size == 0 {
            return Err(GradientError::EmptyColorMap);
        }

        Ok(Self {
            colors: colors.to_vec(),
            start_points: start_points.to_vec(),
            color_map_size,
        })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn start_points(&self) -> &[f64] {
        &self.start_points
    }

    pub fn color_map_size(&self) -> usize {
        self.color_map_size
    }

    fn scaled(&self, fraction: f64) -> f64 {
        self.color_map_size as f64 * fraction
    }

    /// Splits the color map into intervals, keyed by the index at which
    /// each of them starts. Key 0 is always present.
    fn color_intervals(&self) -> BTreeMap<usize, ColorInterval> {
        let mut intervals = BTreeMap::new();
        let first = self.colors[0];
        let last = self.colors.len() - 1;

        // Below the first start point the first color fades in from transparent
        if self.start_points[0] != 0.0 {
            intervals.insert(
                0,
                ColorInterval {
                    start_color: first.with_alpha(0),
                    end_color: first,
                    duration: self.scaled(self.start_points[0]),
                },
            );
        }

        for i in 1..self.colors.len() {
            intervals.insert(
                self.scaled(self.start_points[i - 1]) as usize,
                ColorInterval {
                    start_color: self.colors[i - 1],
                    end_color: self.colors[i],
                    duration: self.scaled(self.start_points[i] - self.start_points[i - 1]),
                },
            );
        }

        // Above the last start point the last color persists
        if self.start_points[last] != 1.0 {
            intervals.insert(
                self.scaled(self.start_points[last]) as usize,
                ColorInterval {
                    start_color: self.colors[last],
                    end_color: self.colors[last],
                    duration: self.scaled(1.0 - self.start_points[last]),
                },
            );
        }

        intervals
    }

    /// Generates the color map for this gradient.
    ///
    /// Every alpha value in the result is multiplied by `opacity`, which is
    /// expected to be in the 0.0 to 1.0 range. Resulting alpha values are
    /// clamped to the valid channel range.
    pub fn generate_color_map(&self, opacity: f64) -> ColorMap {
        let intervals = self.color_intervals();
        debug!(
            "Generating color map of {} entries from {} intervals",
            self.color_map_size,
            intervals.len()
        );

        let mut interval = &intervals[&0];
        let mut interval_start = 0;
        let color_map: ColorMap = (0..self.color_map_size)
            .map(|i| {
                if let Some(next) = intervals.get(&i) {
                    trace!("Interval {:?} starts at index {}", next, i);
                    interval = next;
                    interval_start = i;
                }
                interval.color_at((i - interval_start) as f64)
            })
            .into();

        if opacity != 1.0 {
            color_map.map_colors(|c| c.with_alpha(scale_alpha(c.a, opacity)))
        } else {
            color_map
        }
    }
}

impl Default for Gradient {
    /// Green fading in at 20% of the maximum intensity, turning red at full intensity.
    fn default() -> Self {
        Self {
            colors: vec![Color::rgb(102, 225, 0), Color::rgb(255, 0, 0)],
            start_points: vec![0.2, 1.0],
            color_map_size: DEFAULT_COLOR_MAP_SIZE,
        }
    }
}

impl TryFrom<GradientDefinition> for Gradient {
    type Error = GradientError;

    fn try_from(definition: GradientDefinition) -> Result<Self, Self::Error> {
        Self::with_color_map_size(
            &definition.colors,
            &definition.start_points,
            definition.color_map_size,
        )
    }
}

impl From<Gradient> for GradientDefinition {
    fn from(gradient: Gradient) -> Self {
        Self {
            colors: gradient.colors,
            start_points: gradient.start_points,
            color_map_size: gradient.color_map_size,
        }
    }
}

fn scale_alpha(alpha: u8, factor: f64) -> u8 {
    (alpha as f64 * factor).clamp(0.0, 255.0) as u8
}

/// Returns a color between `color1` and `color2`. The ratio determines where
/// the result lies between them, 0.0 meaning `color1` and 1.0 meaning `color2`.
///
/// Alpha is interpolated linearly. The remaining channels are interpolated
/// in HSV space, taking the shorter way around the hue circle. Ratios
/// slightly outside of the 0.0 to 1.0 range extrapolate.
pub fn interpolate_color(color1: Color, color2: Color, ratio: f64) -> Color {
    let lerp = |a: f64, b: f64| a + (b - a) * ratio;

    let alpha = lerp(color1.a as f64, color2.a as f64).clamp(0.0, 255.0) as u8;

    let (mut h1, s1, v1) = color1.to_hsv();
    let (mut h2, s2, v2) = color2.to_hsv();
    if h1 - h2 > 180.0 {
        h2 += 360.0;
    } else if h2 - h1 > 180.0 {
        h1 += 360.0;
    }

    Color::ahsv(alpha, lerp(h1, h2), lerp(s1, s2), lerp(v1, v2))
}
