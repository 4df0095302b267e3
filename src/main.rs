use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use image::{DynamicImage, Rgba};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

use distancefield::config::Settings;
use distancefield::pipeline::{Pipeline, load_image};
use distancefield::render::{
    ColorStop, DistanceMode, Outline, RawFormat, parse_color, render_distance_map, write_raw,
};
use distancefield::{DistanceField, Normalization, Threshold};

/// Generate distance fields from images.
///
/// Flags left out fall back to the settings file, then to built-in defaults.
#[derive(Parser)]
#[command(name = "distancefield", version)]
struct Cli {
    /// Source image
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Gray threshold (alpha-weighted luma must reach this to be "inside")
    #[arg(long, global = true)]
    gray: Option<u8>,

    /// Alpha threshold (alpha must reach this to be "inside")
    #[arg(long, global = true)]
    alpha: Option<u8>,

    /// Oversample the image by this factor (power of two)
    #[arg(long, global = true)]
    oversample: Option<u32>,

    /// Pad the image by this many outside pixels on all sides
    #[arg(long, global = true)]
    pad: Option<u32>,

    /// Box-average oversampled distances instead of the legacy factor³ scaling
    #[arg(long, global = true)]
    area_average: bool,

    /// Settings file (default: ~/.config/distancefield/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the distance field as a grayscale image
    Distancefield {
        dest: PathBuf,

        #[arg(long, value_enum)]
        mode: Option<DistanceMode>,

        /// Multiply stored distances
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Create a simple glow from the distance field
    Glow {
        dest: PathBuf,

        /// Glow color ("#rrggbb"). Without it the output is grayscale.
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgba<u8>>,

        /// Multiply outer distances
        #[arg(long)]
        oscale: Option<f32>,

        /// Multiply inner distances
        #[arg(long)]
        iscale: Option<f32>,

        /// Gamma correction value
        #[arg(long)]
        gamma: Option<f32>,
    },

    /// Create a colored outline from the distance field
    Outline {
        dest: PathBuf,

        /// Map a signed distance to a color ("dist:#color"), negative outside the shape
        #[arg(long = "color", required = true, allow_hyphen_values = true)]
        stops: Vec<ColorStop>,
    },

    /// Dump the field as interleaved (outside, inside) little-endian floats
    Raw {
        dest: PathBuf,

        #[arg(long, value_enum, default_value_t = RawFormat::F32)]
        format: RawFormat,
    },

    /// Write the default settings file
    InitConfig,
}

impl Cli {
    fn pipeline(&self, settings: &Settings) -> Pipeline {
        let defaults = Pipeline::from(settings);
        Pipeline {
            threshold: Threshold {
                gray: self.gray.unwrap_or(defaults.threshold.gray),
                alpha: self.alpha.unwrap_or(defaults.threshold.alpha),
            },
            oversample: self.oversample.unwrap_or(defaults.oversample),
            pad: self.pad.unwrap_or(defaults.pad),
            normalization: if self.area_average {
                Normalization::Area
            } else {
                defaults.normalization
            },
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn save_image(img: &DynamicImage, dest: &Path) -> Result<()> {
    img.save(dest)
        .with_context(|| format!("Failed to save {}", dest.display()))?;
    info!("Wrote {}", dest.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(Settings::default_path);
    let settings = config_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let pipeline = cli.pipeline(&settings);

    let compute_field = || -> Result<DistanceField> {
        let source = cli.source.as_deref().context("--source is required")?;
        let image = load_image(source)?;
        pipeline
            .run(&image)
            .with_context(|| format!("Failed to compute distance field for {}", source.display()))
    };

    match cli.command {
        Commands::Distancefield { dest, mode, scale } => {
            let field = compute_field()?;
            let img = render_distance_map(
                &field,
                mode.unwrap_or(settings.distance_mode),
                scale.unwrap_or(settings.distance_scale),
            );
            save_image(&DynamicImage::ImageLuma8(img), &dest)?;
        }
        Commands::Glow {
            dest,
            color,
            oscale,
            iscale,
            gamma,
        } => {
            let field = compute_field()?;
            let mut glow = settings.glow();
            glow.color = color;
            glow.outer_scale = oscale.unwrap_or(glow.outer_scale);
            glow.inner_scale = iscale.unwrap_or(glow.inner_scale);
            glow.gamma = gamma.unwrap_or(glow.gamma);
            save_image(&glow.render(&field), &dest)?;
        }
        Commands::Outline { dest, stops } => {
            let outline = Outline::new(stops).context("Failed to generate outline")?;
            let field = compute_field()?;
            save_image(&DynamicImage::ImageRgba8(outline.render(&field)), &dest)?;
        }
        Commands::Raw { dest, format } => {
            let field = compute_field()?;
            let file = File::create(&dest)
                .with_context(|| format!("Failed to create {}", dest.display()))?;
            write_raw(&field, format, file)
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            info!(
                "Wrote {}x{} {:?} field to {}",
                field.width(),
                field.height(),
                format,
                dest.display()
            );
        }
        Commands::InitConfig => {
            let path = config_path.context("No settings path: set HOME or pass --config")?;
            Settings::default().save(&path)?;
            println!("Wrote default settings to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_outline_stops() {
        let cli = Cli::try_parse_from([
            "distancefield",
            "--source",
            "in.png",
            "outline",
            "out.png",
            "--color",
            "-2:#000",
            "--color",
            "3:#ffffff",
        ])
        .unwrap();
        match cli.command {
            Commands::Outline { stops, .. } => assert_eq!(stops.len(), 2),
            _ => panic!("expected outline"),
        }
    }

    #[test]
    fn test_cli_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "distancefield",
            "distancefield",
            "out.png",
            "--oversample",
            "4",
            "--area-average",
        ])
        .unwrap();
        let settings = Settings {
            pad: 2,
            gray_threshold: 100,
            ..Settings::default()
        };
        let pipeline = cli.pipeline(&settings);
        assert_eq!(pipeline.oversample, 4);
        assert_eq!(pipeline.pad, 2);
        assert_eq!(pipeline.threshold.gray, 100);
        assert_eq!(pipeline.normalization, Normalization::Area);
    }

    #[test]
    fn test_cli_rejects_bad_glow_color() {
        assert!(Cli::try_parse_from(["distancefield", "glow", "out.png", "--color", "red"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
