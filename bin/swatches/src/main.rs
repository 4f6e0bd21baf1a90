//! swatches - render Munsell slices and picker grids to PNG.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use munsell::{
    ColorSource, Component, Components, Munsell, MunsellTable, PickerState, Rgb8, Slice,
    SwatchRenderer,
};
use tracing_subscriber::EnvFilter;

/// Space between stacked panels, in pixels.
const PANEL_GAP: u32 = 8;

/// Largest accepted swatch size, in pixels.
const MAX_CELL: u32 = 256;

#[derive(Parser)]
#[command(name = "swatches")]
#[command(version, about = "Render Munsell color slices to PNG")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Load the lookup table from a JSON document instead of the built in one
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output image
    #[arg(short, long, global = true, default_value = "swatches.png")]
    out: PathBuf,

    /// Size of one swatch in pixels
    #[arg(
        long,
        global = true,
        default_value = "24",
        value_parser = clap::value_parser!(u32).range(1..=MAX_CELL as i64)
    )]
    cell: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Values against chromas for a fixed hue index
    Hue { hue: Component },

    /// Hues against chromas for a fixed value index
    Value { value: usize },

    /// Values against hues for a fixed chroma index
    Chroma { chroma: Component },

    /// Everything a picker shows for a pair of colors
    Pick {
        /// Foreground color, #RRGGBB
        #[arg(long)]
        fg: String,

        /// Background color, #RRGGBB
        #[arg(long, default_value = "#FFFFFF")]
        bg: String,
    },

    /// Print the color at fractional table coordinates
    Interpolate {
        hue: Component,
        value: Component,
        chroma: Component,
    },
}

/// Fixed colors given on the command line.
struct HexSource {
    foreground: Components,
    background: Components,
}

impl HexSource {
    fn parse(foreground: &str, background: &str) -> Result<Self> {
        Ok(Self {
            foreground: Rgb8::from_hex(foreground)
                .with_context(|| format!("Invalid foreground color {foreground}"))?
                .to_normalized(),
            background: Rgb8::from_hex(background)
                .with_context(|| format!("Invalid background color {background}"))?
                .to_normalized(),
        })
    }
}

impl ColorSource for HexSource {
    fn foreground(&self) -> Components {
        self.foreground
    }

    fn background(&self) -> Components {
        self.background
    }
}

/// Collects grids as panels and stacks them vertically into one image.
struct PngRenderer {
    cell: u32,
    panels: Vec<RgbImage>,
}

impl PngRenderer {
    fn new(cell: u32) -> Self {
        Self {
            cell: cell.max(1),
            panels: vec![],
        }
    }

    fn push_rows<'a>(&mut self, rows: impl Iterator<Item = &'a [Rgb8]> + Clone) -> Result<()> {
        let columns = rows.clone().map(<[Rgb8]>::len).max().unwrap_or(0).max(1);
        let height = rows.clone().count().max(1);

        let pixels = |n: usize| {
            u32::try_from(n)
                .ok()
                .and_then(|n| n.checked_mul(self.cell))
                .filter(|&n| n <= i32::MAX as u32)
                .with_context(|| format!("{n} swatches of {}px do not fit in an image", self.cell))
        };
        let mut panel = RgbImage::from_pixel(pixels(columns)?, pixels(height)?, Rgb([255; 3]));
        for (y, row) in rows.enumerate() {
            for (x, color) in row.iter().enumerate() {
                let rect = Rect::at(x as i32 * self.cell as i32, y as i32 * self.cell as i32)
                    .of_size(self.cell, self.cell);
                draw_filled_rect_mut(&mut panel, rect, Rgb([color.0, color.1, color.2]));
            }
        }
        self.panels.push(panel);
        Ok(())
    }

    /// Add a flat list of swatches wrapped every `per_row` colors.
    fn push_strip(&mut self, colors: &[Rgb8], per_row: usize) -> Result<()> {
        self.push_rows(colors.chunks(per_row.max(1)))
    }

    fn save(&self, path: &Path) -> Result<()> {
        let width = self.panels.iter().map(RgbImage::width).max().unwrap_or(1);
        let height = self
            .panels
            .iter()
            .try_fold(0u32, |sum, panel| sum.checked_add(panel.height())?.checked_add(PANEL_GAP))
            .context("Too many swatches to fit in an image")?
            .max(1);

        let mut image = RgbImage::from_pixel(width, height, Rgb([255; 3]));
        let mut y = 0;
        for panel in &self.panels {
            image::imageops::overlay(&mut image, panel, 0, y as i64);
            y += panel.height() + PANEL_GAP;
        }

        image
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), panels = self.panels.len(), "wrote swatches");
        Ok(())
    }
}

impl SwatchRenderer for PngRenderer {
    type Error = anyhow::Error;

    fn render(&mut self, slice: &Slice) -> Result<()> {
        let rows: Vec<Vec<Rgb8>> = slice
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|cell| cell.rgb).collect())
            .collect();
        tracing::debug!(fixed = ?slice.fixed, swatches = slice.len(), "rendering slice");
        self.push_rows(rows.iter().map(Vec::as_slice))
    }
}

fn load_table(path: &Path) -> Result<MunsellTable> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let table = MunsellTable::from_json_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load table from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        chartable = table.chartable_count(),
        "loaded lookup table"
    );
    Ok(table)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let loaded;
    let table = match &cli.table {
        Some(path) => {
            loaded = load_table(path)?;
            &loaded
        }
        None => MunsellTable::standard(),
    };

    let coordinates = match &cli.command {
        Commands::Hue { hue } => vec![*hue],
        Commands::Chroma { chroma } => vec![*chroma],
        Commands::Interpolate { hue, value, chroma } => vec![*hue, *value, *chroma],
        _ => vec![],
    };
    anyhow::ensure!(
        coordinates.iter().all(|c| c.is_finite()),
        "Coordinates must be finite numbers"
    );

    let mut renderer = PngRenderer::new(cli.cell);
    match cli.command {
        Commands::Hue { hue } => {
            renderer.render(&table.fixed_hue_slice(hue))?;
        }
        Commands::Value { value } => {
            renderer.render(&table.fixed_value_slice(value))?;
        }
        Commands::Chroma { chroma } => {
            renderer.render(&table.fixed_chroma_slice(chroma))?;
        }
        Commands::Pick { fg, bg } => {
            let source = HexSource::parse(&fg, &bg)?;
            let state = PickerState::poll(table, &source);
            println!(
                "foreground {} (text {})",
                state.foreground.to_hex(),
                state.foreground.contrast_text().to_hex()
            );
            println!(
                "slices at hue {:.2}, value {}, chroma {:.2}",
                state.params.hue, state.params.value, state.params.chroma
            );

            renderer.push_strip(&state.transitions, state.transitions.len())?;
            renderer.push_strip(&state.quick, 5)?;
            state.render(&mut renderer)?;
        }
        Commands::Interpolate { hue, value, chroma } => {
            let point = Munsell::new(hue, value, chroma);
            println!("{} {}", point.to_rgb8(table).to_hex(), point);
            return Ok(());
        }
    }

    renderer.save(&cli.out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_is_bounded() {
        assert!(Cli::try_parse_from(["swatches", "--cell", "0", "value", "9"]).is_err());
        assert!(Cli::try_parse_from(["swatches", "--cell", "4294967295", "value", "9"]).is_err());

        let cli = Cli::try_parse_from(["swatches", "--cell", "256", "value", "9"]).unwrap();
        assert_eq!(cli.cell, MAX_CELL);
    }

    #[test]
    fn oversized_panels_are_errors() {
        let mut renderer = PngRenderer::new(u32::MAX);
        assert!(renderer.push_strip(&[Rgb8::BLACK; 2], 2).is_err());
        assert!(renderer.panels.is_empty());

        let mut renderer = PngRenderer::new(2);
        renderer.push_strip(&[Rgb8(1, 2, 3); 3], 2).unwrap();
        assert_eq!(renderer.panels[0].dimensions(), (4, 4));
        assert_eq!(renderer.panels[0].get_pixel(0, 2), &Rgb([1, 2, 3]));
        assert_eq!(renderer.panels[0].get_pixel(3, 3), &Rgb([255, 255, 255]));
    }
}
