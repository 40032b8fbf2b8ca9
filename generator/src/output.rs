use std::io::Write;

use clap::ValueEnum;
use heatfx::{Color, ColorMap};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Cannot write color map: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per entry with intensity and separate channels
    #[default]
    Csv,
    /// Array of `#aarrggbb` strings
    Json,
    /// One `#aarrggbb` per line
    Hex,
}

#[derive(Serialize)]
struct Row {
    index: usize,
    intensity: f64,
    a: u8,
    r: u8,
    g: u8,
    b: u8,
    hex: String,
}

impl Row {
    fn new(index: usize, last: usize, color: Color) -> Self {
        let intensity = if last == 0 {
            0.0
        } else {
            index as f64 / last as f64
        };
        Self {
            index,
            intensity,
            a: color.a,
            r: color.r,
            g: color.g,
            b: color.b,
            hex: color.to_hex_string(),
        }
    }
}

pub fn write_color_map<W: Write>(
    color_map: &ColorMap,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Csv => {
            let last = color_map.len().saturating_sub(1);
            let mut csv_writer = csv::Writer::from_writer(writer);
            for (index, &color) in color_map.iter().enumerate() {
                csv_writer.serialize(Row::new(index, last, color))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, color_map)?;
            writeln!(writer)?;
        }
        OutputFormat::Hex => {
            for color in color_map.iter() {
                writeln!(writer, "{}", color.to_hex_string())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use heatfx::Gradient;

    use super::*;

    fn red_to_blue() -> ColorMap {
        Gradient::with_color_map_size(&[Color::RED, Color::BLUE], &[0.0, 0.5], 4)
            .unwrap()
            .generate_color_map(1.0)
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_color_map(&red_to_blue(), format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn writes_csv_rows() {
        let output = render(OutputFormat::Csv);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "index,intensity,a,r,g,b,hex");
        assert!(lines[1].starts_with("0,0"));
        assert!(lines[1].ends_with(",255,255,0,0,#ffff0000"));
        assert!(lines[4].starts_with("3,1"));
        assert!(lines[4].ends_with(",255,0,0,255,#ff0000ff"));
    }

    #[test]
    fn writes_json_array() {
        let output = render(OutputFormat::Json);
        let colors: Vec<String> = serde_json::from_str(&output).unwrap();

        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], "#ffff0000");
        assert_eq!(colors[3], "#ff0000ff");
    }

    #[test]
    fn writes_hex_lines() {
        let output = render(OutputFormat::Hex);
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec!["#ffff0000", "#ffff00ff", "#ff0000ff", "#ff0000ff"]
        );
    }
}
