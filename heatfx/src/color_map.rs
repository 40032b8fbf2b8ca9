use serde::{Deserialize, Serialize};

use crate::Color;

/// A lookup table mapping normalized intensity to a color.
/// Serializes as a plain sequence of colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap {
    colors: Vec<Color>,
}

impl ColorMap {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Looks up the color for an intensity in the 0.0 to 1.0 range.
    /// Intensities outside of this range are clamped. An empty map
    /// yields a transparent color.
    pub fn color_at(&self, intensity: f64) -> Color {
        let Some(last) = self.colors.len().checked_sub(1) else {
            return Color::TRANSPARENT;
        };
        let index = (intensity.clamp(0.0, 1.0) * last as f64) as usize;
        self.colors[index.min(last)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub(crate) fn map_colors(self, f: impl Fn(Color) -> Color) -> Self {
        self.colors.into_iter().map(f).into()
    }
}

impl<T> From<T> for ColorMap
where
    T: Iterator<Item = Color>,
{
    fn from(iter: T) -> Self {
        Self {
            colors: iter.collect(),
        }
    }
}
