mod config;
mod output;

use std::{
    error::Error,
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use clap::Parser;
use config::GeneratorConfig;
use log::{info, LevelFilter};
use output::OutputFormat;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with the gradient definition, default heatmap gradient is used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of entries in the generated color map
    #[arg(short, long)]
    size: Option<usize>,
    /// Factor applied to every alpha value
    #[arg(short, long)]
    opacity: Option<f64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout is reserved for the color map
    CombinedLogger::init(vec![TermLogger::new(
        log_level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    let config = match &cli.config {
        Some(path) => {
            info!("Loading gradient from {}", path.display());
            GeneratorConfig::from_path(path)?
        }
        None => {
            info!("Using default heatmap gradient");
            GeneratorConfig::default()
        }
    }
    .with_overrides(cli.size, cli.opacity)?;

    let color_map = config.gradient.generate_color_map(config.opacity);
    info!(
        "Generated color map with {} entries at opacity {}",
        color_map.len(),
        config.opacity
    );

    match &cli.output {
        Some(path) => {
            output::write_color_map(&color_map, cli.format, BufWriter::new(File::create(path)?))?;
            info!("Color map written to {}", path.display());
        }
        None => output::write_color_map(&color_map, cli.format, io::stdout().lock())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_debug_logs() {
        assert_eq!(log_level(false), LevelFilter::Info);
        assert_eq!(log_level(true), LevelFilter::Debug);
    }
}
